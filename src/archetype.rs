//! An archetype is a set of component types that an entity is created with.
//!
//! Every subset of the component universe is an archetype,
//! and the full table of archetypes is computed once when the world is built.
//! An entity belongs to exactly one archetype for its whole lifetime,
//! and entities of the same archetype are stored in the same bucket.
//!
//! # Cost
//! A universe of `n` component types has `2^n` archetypes.
//! Adding one component type doubles the table,
//! which is why the universe is capped at [`Mask::CAPACITY`] types.
//! Empty buckets do not allocate, but the table itself is always complete.

use std::fmt;

use bitvec::prelude::BitVec;
use indexmap::IndexSet;
use itertools::Itertools;
use xias::Xias;

use crate::comp::{self, Mask};


/// Identifies an archetype by its position in the archetype table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl Id {
    pub(crate) fn from_index(index: usize) -> Self { Self(index.small_int()) }

    /// The position of this archetype in the table.
    pub fn index(self) -> usize { self.0.small_int() }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "a{}", self.0) }
}

/// Describes one archetype of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Archetype {
    id:   Id,
    mask: Mask,
}

impl Archetype {
    /// The position of the archetype in the table.
    pub fn id(&self) -> Id { self.id }

    /// The component types of the archetype.
    pub fn mask(&self) -> Mask { self.mask }

    /// Returns true if entities of this archetype have every component type in `query`.
    pub fn matches(&self, query: Mask) -> bool { self.mask.is_superset_of(query) }
}

/// Enumerates the power set of a universe of `universe_len` component types.
///
/// Subsets are produced in order of increasing size,
/// so the empty archetype always comes first.
/// A subset reached twice is only kept once.
///
/// The result has exactly `2^universe_len` entries;
/// both time and memory are exponential in `universe_len`.
///
/// # Panics
/// Panics if `universe_len` exceeds [`Mask::CAPACITY`].
pub fn enumerate(universe_len: usize) -> IndexSet<Mask> {
    assert!(
        universe_len <= Mask::CAPACITY,
        "Cannot enumerate archetypes of {universe_len} component types"
    );

    let mut archetypes = IndexSet::with_capacity(1 << universe_len);
    for subset in (0..universe_len).powerset() {
        let mask: Mask = subset.into_iter().map(comp::Id::from_index).collect();
        if !archetypes.insert(mask) {
            log::trace!("Skipping repeated subset {mask:?}");
        }
    }

    debug_assert_eq!(archetypes.len(), 1 << universe_len);
    archetypes
}

/// The complete table of archetypes of a universe.
pub struct Table {
    archetypes: IndexSet<Mask>,
    /// `containing[c][a]` is set if archetype `a` contains component type `c`.
    containing: Vec<BitVec>,
}

impl Table {
    /// Enumerates all archetypes of the universe.
    pub fn new(universe: &comp::Universe) -> Self {
        let archetypes = enumerate(universe.len());

        let mut containing = vec![BitVec::repeat(false, archetypes.len()); universe.len()];
        for (index, mask) in archetypes.iter().enumerate() {
            for id in mask.iter() {
                let bits = containing.get_mut(id.index()).expect("mask is within the universe");
                bits.set(index, true);
            }
        }

        log::debug!(
            "Enumerated {} archetypes over {} component types",
            archetypes.len(),
            universe.len()
        );
        if universe.len() > 12 {
            log::warn!(
                "A universe of {} component types expands to {} archetypes",
                universe.len(),
                archetypes.len()
            );
        }

        Self { archetypes, containing }
    }

    /// Returns the number of archetypes, which is `2^n` for a universe of `n` types.
    pub fn len(&self) -> usize { self.archetypes.len() }

    /// Always false; even the empty universe has the empty archetype.
    pub fn is_empty(&self) -> bool { self.archetypes.is_empty() }

    /// Gets an archetype by ID.
    pub fn get(&self, id: Id) -> Option<Archetype> {
        self.archetypes.get_index(id.index()).map(|&mask| Archetype { id, mask })
    }

    /// Gets the archetype with exactly the component types of `mask`.
    pub fn find(&self, mask: Mask) -> Option<Archetype> {
        let index = self.archetypes.get_index_of(&mask)?;
        Some(Archetype { id: Id::from_index(index), mask })
    }

    /// Iterates over all archetypes in table order.
    pub fn iter(&self) -> impl Iterator<Item = Archetype> + '_ {
        self.archetypes
            .iter()
            .enumerate()
            .map(|(index, &mask)| Archetype { id: Id::from_index(index), mask })
    }

    /// Iterates over the archetypes whose component types are a superset of `query`,
    /// in table order.
    ///
    /// Intersects the per-component membership bitmaps instead of
    /// testing every archetype of the table.
    #[auto_enums::auto_enum(Iterator)]
    pub fn supersets_of(&self, query: Mask) -> impl Iterator<Item = Id> + '_ {
        let mut members = query.iter();
        let first = match members.next() {
            Some(first) => first,
            None => return (0..self.len()).map(Id::from_index),
        };

        let mut matching = self.membership(first).clone();
        for id in members {
            matching &= self.membership(id).as_bitslice();
        }

        marker!(matching.iter_ones().collect_vec().into_iter().map(Id::from_index))
    }

    fn membership(&self, id: comp::Id) -> &BitVec {
        match self.containing.get(id.index()) {
            Some(bits) => bits,
            None => panic!("Component tag {id} is not in the universe of this table"),
        }
    }
}
