use std::fmt;

use xias::Xias;

use super::Id;

/// A set of component types, as a bitmask over their [`Id`]s.
///
/// Archetypes and queries are both masks.
/// Superset tests are a single `and` plus a comparison.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mask(u32);

impl Mask {
    /// The maximum number of component types in a universe.
    ///
    /// A universe of `n` types has `2^n` archetypes,
    /// so this also caps the archetype table at 65536 entries.
    pub const CAPACITY: usize = 16;

    /// The mask with no component types.
    pub const EMPTY: Self = Self(0);

    /// Returns the raw bits of the mask.
    pub fn bits(self) -> u32 { self.0 }

    /// Returns this mask with `id` added.
    pub fn with(self, id: Id) -> Self {
        assert!(id.index() < Self::CAPACITY, "Component tag {id} exceeds mask capacity");
        Self(self.0 | 1 << id.index())
    }

    /// Returns true if `id` is in the mask.
    pub fn contains(self, id: Id) -> bool {
        id.index() < Self::CAPACITY && self.0 & 1 << id.index() != 0
    }

    /// Returns true if every component type of `other` is also in `self`.
    pub fn is_superset_of(self, other: Self) -> bool { self.0 & other.0 == other.0 }

    /// Returns true if every component type of `self` is also in `other`.
    pub fn is_subset_of(self, other: Self) -> bool { other.is_superset_of(self) }

    /// Returns the number of component types in the mask.
    pub fn len(self) -> usize { self.0.count_ones().small_int() }

    /// Returns true if the mask has no component types.
    pub fn is_empty(self) -> bool { self.0 == 0 }

    /// Returns the position of `id` among the members of the mask in ascending order,
    /// or `None` if `id` is not a member.
    ///
    /// This is the index of the entity slot that stores the component.
    pub fn slot_of(self, id: Id) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }

        let below = self.0 & ((1 << id.index()) - 1);
        Some(below.count_ones().small_int())
    }

    /// Iterates over the members in ascending order.
    pub fn iter(self) -> impl Iterator<Item = Id> {
        (0..Self::CAPACITY).filter(move |&index| self.0 & 1 << index != 0).map(Id::from_index)
    }
}

impl FromIterator<Id> for Mask {
    fn from_iter<I: IntoIterator<Item = Id>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Mask({:#b})", self.0) }
}
