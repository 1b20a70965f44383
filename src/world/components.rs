use std::any;

use crate::comp::{self, Universe};
use crate::storage::{AnyStorage, Key, OrderedSet};
use crate::{Component, Entity, Error};

/// The component storage table: one type-erased bucket per component type,
/// indexed by [`comp::Id`].
pub(super) struct Components {
    storages: Vec<Box<dyn AnyStorage>>,
}

impl Components {
    pub(super) fn new(storages: Vec<Box<dyn AnyStorage>>) -> Self { Self { storages } }

    pub(super) fn reserve(&mut self, additional: usize) {
        for storage in &mut self.storages {
            storage.reserve(additional);
        }
    }

    pub(super) fn create_default(&mut self, comp: comp::Id) -> Key {
        self.erased_mut(comp).create_default()
    }

    /// Drops a component instance, returning whether it existed.
    pub(super) fn remove(&mut self, comp: comp::Id, key: Key) -> bool {
        self.erased_mut(comp).remove_key(key)
    }

    pub(super) fn storage<C: Component>(&self, comp: comp::Id) -> &OrderedSet<C> {
        let storage = self.storages.get(comp.index()).expect("one storage per component type");
        storage.downcast_ref::<C>()
    }

    pub(super) fn storage_mut<C: Component>(&mut self, comp: comp::Id) -> &mut OrderedSet<C> {
        self.erased_mut(comp).downcast_mut::<C>()
    }

    fn erased_mut(&mut self, comp: comp::Id) -> &mut (dyn AnyStorage + 'static) {
        &mut **self.storages.get_mut(comp.index()).expect("one storage per component type")
    }

    /// Gets the instance of `C` that `entity` refers to.
    pub(super) fn get<C: Component>(
        &self,
        universe: &Universe,
        entity: &Entity,
    ) -> Result<&C, Error> {
        let (comp, key) = resolve::<C>(universe, entity)?;
        self.storage::<C>(comp).get(key).ok_or_else(|| dangling::<C>(entity))
    }

    /// Gets the instance of `C` that `entity` refers to, mutably.
    pub(super) fn get_mut<C: Component>(
        &mut self,
        universe: &Universe,
        entity: &Entity,
    ) -> Result<&mut C, Error> {
        let (comp, key) = resolve::<C>(universe, entity)?;
        self.storage_mut::<C>(comp).get_mut(key).ok_or_else(|| dangling::<C>(entity))
    }
}

/// Finds the slot of `C` in the archetype of `entity`.
fn resolve<C: Component>(universe: &Universe, entity: &Entity) -> Result<(comp::Id, Key), Error> {
    let comp = universe.try_id_of::<C>()?;
    match entity.slot(comp) {
        Some(key) => Ok((comp, key)),
        None => Err(Error::OutOfArchetype {
            comp:      any::type_name::<C>(),
            archetype: universe.describe(entity.archetype().mask()),
        }),
    }
}

fn dangling<C: Component>(entity: &Entity) -> Error {
    Error::DanglingComponent { comp: any::type_name::<C>(), entity: entity.handle() }
}
