//! The world owns every entity and component of a component universe.
//!
//! A world is made of two storage tables:
//! the component storage table, with one [`OrderedSet`] per component type,
//! and the archetype storage table, with one [`OrderedSet`] of [`Entity`] per archetype.
//! Entities live in the bucket of their exact archetype
//! and refer to their components by [`Key`].
//!
//! # Concurrency
//! Everything that creates, removes or mutates takes `&mut World`,
//! and everything that reads takes `&World`.
//! A world can be read from many threads at once (see
//! [`par_for_each_entity_with_components`](World::par_for_each_entity_with_components)),
//! or wrapped in a [`Shared`] to be handed between threads.

use std::any;
use std::sync::Arc;

use parking_lot::lock_api::{ArcRwLockReadGuard, ArcRwLockWriteGuard};
use parking_lot::{RawRwLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::comp::{self, Mask};
use crate::entity::{self, Ealloc};
use crate::storage::{FreshMut, Key, OrderedSet};
use crate::{archetype, Component, Entity, Error};

mod builder;
pub use builder::Builder;

mod components;
use components::Components;

pub mod query;
pub use query::{EntityMut, EntityView};

#[cfg(test)]
mod tests;

/// Stores the entities and components of one component universe.
pub struct World {
    universe:   comp::Universe,
    archetypes: archetype::Table,
    /// `buckets[a]` holds the entities of archetype `a`, keyed by entity identifier.
    buckets:    Vec<OrderedSet<Entity>>,
    /// The component storage table.
    components: Components,
    ealloc:     Ealloc,
}

impl World {
    /// Starts configuring the component universe of a new world.
    pub fn builder() -> Builder { Builder::default() }

    /// The component universe of this world.
    pub fn universe(&self) -> &comp::Universe { &self.universe }

    /// The archetype table of this world.
    pub fn archetypes(&self) -> &archetype::Table { &self.archetypes }

    /// Returns the number of archetypes, i.e. `2^n` for `n` component types.
    pub fn archetype_count(&self) -> usize { self.archetypes.len() }

    /// Returns the number of live entities.
    pub fn len(&self) -> usize { self.buckets.iter().map(OrderedSet::len).sum() }

    /// Returns true if there are no live entities.
    pub fn is_empty(&self) -> bool { self.buckets.iter().all(OrderedSet::is_empty) }

    /// Reserves space for `capacity` more instances of every component type.
    ///
    /// This is only a performance hint.
    pub fn reserve(&mut self, capacity: usize) { self.components.reserve(capacity); }

    /// Reserves space for `capacity` more entities with exactly the component types of `L`.
    pub fn reserve_archetype<L: comp::List>(&mut self, capacity: usize) -> Result<(), Error> {
        let archetype = self.archetype_of(self.universe.mask_of::<L>()?);
        self.bucket_mut(archetype.id()).reserve(capacity);
        Ok(())
    }

    /// Creates an entity with a default-constructed component for every type in `L`.
    ///
    /// `L` is a tuple of component types, e.g. `(i32, String)`.
    /// The entity joins the archetype of exactly these types;
    /// `()` creates an entity of the empty archetype.
    ///
    /// Fails with [`Error::UnknownComponent`] if a type is not in the universe
    /// and with [`Error::DuplicateComponent`] if a type is listed twice.
    /// Nothing is allocated if the type list is rejected.
    pub fn create_entity<L: comp::List>(&mut self) -> Result<entity::Ref, Error> {
        let mask = self.universe.mask_of::<L>()?;
        Ok(self.create_entity_of(mask))
    }

    fn create_entity_of(&mut self, mask: Mask) -> entity::Ref {
        let archetype = self.archetype_of(mask);

        let components = &mut self.components;
        let slots: Box<[Key]> = mask.iter().map(|comp| components.create_default(comp)).collect();

        let id = self.ealloc.allocate();
        let handle = entity::Ref::new(archetype.id(), id);
        let record = Entity::new(id, archetype, slots);
        if let Err(err) = self.bucket_mut(archetype.id()).insert(id, record) {
            panic!("Entity identifier {id} was allocated twice: {err}");
        }

        log::trace!("Created entity {handle} with components {}", self.universe.describe(mask));
        handle
    }

    /// Removes an entity together with the component instances it refers to.
    ///
    /// Returns false if the entity does not exist.
    pub fn remove_entity(&mut self, entity: entity::Ref) -> bool {
        let record = match self.buckets.get_mut(entity.archetype().index()) {
            Some(bucket) => match bucket.remove(entity.id()) {
                Some(record) => record,
                None => return false,
            },
            None => return false,
        };

        for (comp, key) in record.slots() {
            if !self.components.remove(comp, key) {
                log::trace!(
                    "Component {} of entity {entity} was already removed",
                    self.universe.type_of(comp)
                );
            }
        }

        log::trace!("Removed entity {entity}");
        true
    }

    /// Gets an entity record, or `None` if the entity does not exist.
    pub fn entity(&self, entity: entity::Ref) -> Option<&Entity> {
        self.buckets.get(entity.archetype().index())?.get(entity.id())
    }

    fn try_entity(&self, entity: entity::Ref) -> Result<&Entity, Error> {
        self.entity(entity).ok_or(Error::EntityNotFound { entity })
    }

    /// Gets a component of an entity.
    ///
    /// Fails if the entity does not exist, if its archetype does not contain `C`,
    /// or if its instance of `C` has been removed from the component storage.
    pub fn try_get_component<C: Component>(&self, entity: entity::Ref) -> Result<&C, Error> {
        let record = self.try_entity(entity)?;
        self.components.get::<C>(&self.universe, record)
    }

    /// Gets a component of an entity.
    ///
    /// # Panics
    /// Panics if [`try_get_component`](Self::try_get_component) fails.
    #[track_caller]
    pub fn get_component<C: Component>(&self, entity: entity::Ref) -> &C {
        expect_component::<C, _>(entity, self.try_get_component(entity))
    }

    /// Gets a component of an entity mutably.
    ///
    /// Fails under the same conditions as [`try_get_component`](Self::try_get_component).
    pub fn try_get_component_mut<C: Component>(
        &mut self,
        entity: entity::Ref,
    ) -> Result<&mut C, Error> {
        let record = match self.buckets.get(entity.archetype().index()) {
            Some(bucket) => bucket.get(entity.id()),
            None => None,
        };
        let record = record.ok_or(Error::EntityNotFound { entity })?;
        self.components.get_mut::<C>(&self.universe, record)
    }

    /// Gets a component of an entity mutably.
    ///
    /// # Panics
    /// Panics if [`try_get_component_mut`](Self::try_get_component_mut) fails.
    #[track_caller]
    pub fn get_component_mut<C: Component>(&mut self, entity: entity::Ref) -> &mut C {
        expect_component::<C, _>(entity, self.try_get_component_mut(entity))
    }

    /// Replaces a component of an entity, returning the previous value.
    ///
    /// Fails under the same conditions as [`try_get_component`](Self::try_get_component).
    pub fn try_set_component<C: Component>(
        &mut self,
        entity: entity::Ref,
        value: C,
    ) -> Result<C, Error> {
        let slot = self.try_get_component_mut::<C>(entity)?;
        Ok(std::mem::replace(slot, value))
    }

    /// Replaces a component of an entity, returning the previous value.
    ///
    /// # Panics
    /// Panics if [`try_set_component`](Self::try_set_component) fails.
    #[track_caller]
    pub fn set_component<C: Component>(&mut self, entity: entity::Ref, value: C) -> C {
        expect_component::<C, _>(entity, self.try_set_component(entity, value))
    }

    /// The component storage bucket of `C`.
    pub fn components<C: Component>(&self) -> Result<&OrderedSet<C>, Error> {
        let comp = self.universe.try_id_of::<C>()?;
        Ok(self.components.storage::<C>(comp))
    }

    /// The component storage bucket of `C`, mutably.
    ///
    /// Removing an instance that an entity still refers to is allowed;
    /// later accesses through that entity fail with [`Error::DanglingComponent`].
    /// New instances only receive fresh keys, so a removed key stays dangling.
    pub fn components_mut<C: Component>(&mut self) -> Result<FreshMut<'_, C>, Error> {
        let comp = self.universe.try_id_of::<C>()?;
        Ok(FreshMut::new(self.components.storage_mut::<C>(comp)))
    }

    /// The bucket holding the entities with exactly the component types of `L`.
    pub fn archetype_storage<L: comp::List>(&self) -> Result<&OrderedSet<Entity>, Error> {
        let archetype = self.archetype_of(self.universe.mask_of::<L>()?);
        Ok(self.bucket(archetype.id()))
    }

    fn archetype_of(&self, mask: Mask) -> archetype::Archetype {
        self.archetypes.find(mask).expect("every subset of the universe is an archetype")
    }

    fn bucket(&self, id: archetype::Id) -> &OrderedSet<Entity> {
        self.buckets.get(id.index()).expect("one bucket per archetype")
    }

    fn bucket_mut(&mut self, id: archetype::Id) -> &mut OrderedSet<Entity> {
        self.buckets.get_mut(id.index()).expect("one bucket per archetype")
    }
}

#[track_caller]
fn expect_component<C, T>(entity: entity::Ref, result: Result<T, Error>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!(
            "Cannot access component {} of entity {entity}: {err}",
            any::type_name::<C>()
        ),
    }
}

/// A world shared between threads behind a read-write lock.
///
/// Any number of readers or a single writer may hold the world at a time.
#[derive(Clone)]
pub struct Shared(Arc<RwLock<World>>);

impl Shared {
    /// Moves a world behind the lock.
    pub fn new(world: World) -> Self { Self(Arc::new(RwLock::new(world))) }

    /// Locks the world for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, World> { self.0.read() }

    /// Locks the world for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, World> { self.0.write() }

    /// Locks the world for reading with a guard that keeps the world alive on its own.
    pub fn read_arc(&self) -> ArcRwLockReadGuard<RawRwLock, World> { self.0.read_arc() }

    /// Locks the world for writing with a guard that keeps the world alive on its own.
    pub fn write_arc(&self) -> ArcRwLockWriteGuard<RawRwLock, World> { self.0.write_arc() }
}
