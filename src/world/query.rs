//! Superset queries over the archetype storage table.
//!
//! A query is a list of component types.
//! It visits every entity whose archetype contains all of the queried types,
//! in table order of the matching archetypes
//! and in key order within each archetype.

use rayon::prelude::*;

use super::{expect_component, Components, World};
use crate::comp::{self, Universe};
use crate::{archetype, entity, Component, Entity, Error};

/// Read access to one entity visited by a query.
#[derive(Clone, Copy)]
pub struct EntityView<'w> {
    world:  &'w World,
    entity: &'w Entity,
}

impl<'w> EntityView<'w> {
    /// The entity record.
    pub fn entity(&self) -> &'w Entity { self.entity }

    /// A handle to the entity.
    pub fn handle(&self) -> entity::Ref { self.entity.handle() }

    /// Gets a component of the entity.
    pub fn try_get<C: Component>(&self) -> Result<&'w C, Error> {
        self.world.components.get::<C>(&self.world.universe, self.entity)
    }

    /// Gets a component of the entity.
    ///
    /// # Panics
    /// Panics if the archetype of the entity does not contain `C`.
    #[track_caller]
    pub fn get<C: Component>(&self) -> &'w C {
        expect_component::<C, _>(self.handle(), self.try_get::<C>())
    }
}

/// Mutable access to the components of one entity visited by a query.
pub struct EntityMut<'w> {
    universe:   &'w Universe,
    components: &'w mut Components,
    entity:     &'w Entity,
}

impl<'w> EntityMut<'w> {
    /// The entity record.
    pub fn entity(&self) -> &'w Entity { self.entity }

    /// A handle to the entity.
    pub fn handle(&self) -> entity::Ref { self.entity.handle() }

    /// Gets a component of the entity.
    pub fn try_get<C: Component>(&self) -> Result<&C, Error> {
        self.components.get::<C>(self.universe, self.entity)
    }

    /// Gets a component of the entity.
    ///
    /// # Panics
    /// Panics if the archetype of the entity does not contain `C`.
    #[track_caller]
    pub fn get<C: Component>(&self) -> &C {
        expect_component::<C, _>(self.handle(), self.try_get::<C>())
    }

    /// Gets a component of the entity mutably.
    pub fn try_get_mut<C: Component>(&mut self) -> Result<&mut C, Error> {
        self.components.get_mut::<C>(self.universe, self.entity)
    }

    /// Gets a component of the entity mutably.
    ///
    /// # Panics
    /// Panics if the archetype of the entity does not contain `C`.
    #[track_caller]
    pub fn get_mut<C: Component>(&mut self) -> &mut C {
        let entity = self.handle();
        expect_component::<C, _>(entity, self.try_get_mut::<C>())
    }
}

impl World {
    /// Calls `f` once for every entity whose archetype contains all types of `Q`.
    ///
    /// `Q` is a tuple of component types; `()` visits every entity.
    /// Fails with [`Error::UnknownComponent`] before visiting anything
    /// if a type of `Q` is not in the universe.
    pub fn for_each_entity_with_components<Q: comp::List>(
        &self,
        mut f: impl FnMut(EntityView<'_>),
    ) -> Result<(), Error> {
        let query = self.universe.mask_of::<Q>()?;
        for archetype in self.archetypes.supersets_of(query) {
            let bucket = self.bucket(archetype);
            log::trace!("Query visits {} entities of archetype {archetype}", bucket.len());
            for (_, entity) in bucket.iter() {
                f(EntityView { world: self, entity });
            }
        }
        Ok(())
    }

    /// Like [`for_each_entity_with_components`](Self::for_each_entity_with_components),
    /// but `f` may mutate the components of the visited entities.
    pub fn for_each_entity_with_components_mut<Q: comp::List>(
        &mut self,
        mut f: impl FnMut(EntityMut<'_>),
    ) -> Result<(), Error> {
        let query = self.universe.mask_of::<Q>()?;
        let Self { universe, archetypes, buckets, components, .. } = self;
        for archetype in archetypes.supersets_of(query) {
            let bucket = buckets.get(archetype.index()).expect("one bucket per archetype");
            log::trace!("Query visits {} entities of archetype {archetype}", bucket.len());
            for (_, entity) in bucket.iter() {
                f(EntityMut { universe: &*universe, components: &mut *components, entity });
            }
        }
        Ok(())
    }

    /// Like [`for_each_entity_with_components`](Self::for_each_entity_with_components),
    /// but visits the matching entities in parallel on the rayon thread pool.
    ///
    /// The order of calls is unspecified.
    pub fn par_for_each_entity_with_components<Q: comp::List>(
        &self,
        f: impl Fn(EntityView<'_>) + Send + Sync,
    ) -> Result<(), Error> {
        let query = self.universe.mask_of::<Q>()?;
        let archetypes: Vec<archetype::Id> = self.archetypes.supersets_of(query).collect();
        archetypes.into_par_iter().for_each(|archetype| {
            let bucket = self.bucket(archetype);
            log::trace!("Query visits {} entities of archetype {archetype}", bucket.len());
            bucket.par_iter().for_each(|(_, entity)| f(EntityView { world: self, entity }));
        });
        Ok(())
    }

    /// Calls `f` once for every entity with exactly the component types of `L`.
    pub fn apply_to_entities_of_archetype<L: comp::List>(
        &self,
        mut f: impl FnMut(EntityView<'_>),
    ) -> Result<(), Error> {
        let bucket = self.archetype_storage::<L>()?;
        for (_, entity) in bucket.iter() {
            f(EntityView { world: self, entity });
        }
        Ok(())
    }
}
