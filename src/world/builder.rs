use super::{Components, World};
use crate::entity::Ealloc;
use crate::storage::{self, AnyStorage, OrderedSet};
use crate::util::DbgTypeId;
use crate::{archetype, comp, Component, Error};

/// This type is used to build a world.
///
/// The component universe is fixed once the world is built.
/// Component types are assigned [`comp::Id`]s in registration order.
#[derive(Default)]
pub struct Builder {
    /// Registered component types with the constructor of their storage.
    storages: Vec<(DbgTypeId, fn() -> Box<dyn AnyStorage>)>,
    /// Number of instances to reserve in every component storage.
    capacity: usize,
}

impl Builder {
    /// Adds a component type to the universe.
    pub fn component<C: Component>(mut self) -> Self {
        self.storages.push((DbgTypeId::of::<C>(), storage::any_builder::<C> as fn() -> _));
        self
    }

    /// Reserves space for `capacity` instances of every component type when the world is built.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Constructs the world, enumerating every archetype of the universe.
    ///
    /// Fails if a component type is registered twice
    /// or if more than [`comp::Mask::CAPACITY`] types are registered.
    pub fn build(self) -> Result<World, Error> {
        let universe = comp::Universe::new(self.storages.iter().map(|&(ty, _)| ty))?;
        let archetypes = archetype::Table::new(&universe);
        let buckets = (0..archetypes.len()).map(|_| OrderedSet::new()).collect();

        let mut components =
            Components::new(self.storages.iter().map(|&(_, builder)| builder()).collect());
        if self.capacity > 0 {
            components.reserve(self.capacity);
        }

        log::debug!(
            "Built world with components {}",
            universe.describe(universe.full_mask())
        );

        Ok(World { universe, archetypes, buckets, components, ealloc: Ealloc::default() })
    }
}
