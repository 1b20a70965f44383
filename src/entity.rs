//! An entity is a record of one archetype that refers to its components.
//!
//! Components are owned by the component storage of the world, not by the entity.
//! [`World::remove_entity`](crate::World::remove_entity) removes both.
//! Each entity stores, for every component type of its archetype,
//! the [`Key`] of a component instance in the component storage of the world.
//! An entity cannot gain or lose component types after it is created.
//!
//! The identifier of an entity doubles as its key in the bucket of its archetype.
//! Identifiers are allocated by the [`Ealloc`] of the world that owns the entity,
//! so they are unique within a world but not across worlds.

use std::fmt;

use crate::archetype::{self, Archetype};
use crate::comp;
use crate::storage::Key;

mod ealloc;
pub use ealloc::Ealloc;

#[cfg(test)]
mod tests;

/// A copyable handle that identifies an entity in a world.
///
/// The handle does not keep the entity alive.
/// Using a handle after the entity has been removed is reported as
/// [`Error::EntityNotFound`](crate::Error::EntityNotFound).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ref {
    archetype: archetype::Id,
    key:       Key,
}

impl Ref {
    pub(crate) fn new(archetype: archetype::Id, key: Key) -> Self { Self { archetype, key } }

    /// The archetype that the entity belongs to.
    pub fn archetype(&self) -> archetype::Id { self.archetype }

    /// The identifier of the entity, which is also its key in the archetype bucket.
    pub fn id(&self) -> Key { self.key }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.archetype, self.key)
    }
}

/// An entity record, stored in the bucket of its archetype.
#[derive(Debug)]
pub struct Entity {
    id:        Key,
    archetype: Archetype,
    /// One component key per member of the archetype, in ascending [`comp::Id`] order.
    slots:     Box<[Key]>,
}

impl Entity {
    pub(crate) fn new(id: Key, archetype: Archetype, slots: Box<[Key]>) -> Self {
        assert_eq!(
            slots.len(),
            archetype.mask().len(),
            "Entity of archetype {} needs one slot per component type",
            archetype.id()
        );
        Self { id, archetype, slots }
    }

    /// The identifier of the entity.
    pub fn id(&self) -> Key { self.id }

    /// The archetype of the entity.
    pub fn archetype(&self) -> Archetype { self.archetype }

    /// Returns a handle to this entity.
    pub fn handle(&self) -> Ref { Ref::new(self.archetype.id(), self.id) }

    /// Returns true if the archetype of the entity has the component type.
    pub fn has(&self, comp: comp::Id) -> bool { self.archetype.mask().contains(comp) }

    /// Returns the key of the component instance bound to the component type,
    /// or `None` if the component type is not part of the archetype.
    pub fn slot(&self, comp: comp::Id) -> Option<Key> {
        let index = self.archetype.mask().slot_of(comp)?;
        Some(*self.slots.get(index).expect("slot count equals archetype size"))
    }

    /// Iterates over the component types of the archetype with their bound keys.
    pub fn slots(&self) -> impl Iterator<Item = (comp::Id, Key)> + '_ {
        self.archetype.mask().iter().zip(self.slots.iter().copied())
    }
}
