//! An archetype-partitioned entity/component store.
//!
//! # Entities, components and archetypes
//! Objects ("Entities") store their data in "Components".
//! The set of component types an entity has is its "archetype".
//! In archec, the component types are declared once, when the [`World`] is built,
//! and form a closed "universe".
//! Every subset of the universe is an archetype,
//! so the world knows about all archetypes before the first entity is created.
//!
//! ```
//! let mut world = archec::World::builder()
//!     .component::<i32>()
//!     .component::<String>()
//!     .build()
//!     .unwrap();
//!
//! let entity = world.create_entity::<(i32, String)>().unwrap();
//! world.set_component::<String>(entity, "hello".into());
//!
//! world
//!     .for_each_entity_with_components::<(String,)>(|view| {
//!         assert_eq!(view.get::<String>(), "hello");
//!     })
//!     .unwrap();
//! ```
//!
//! # Entities cannot change their archetype
//! An entity is created with a fixed list of component types
//! and keeps exactly these components until it is removed.
//! Entities of the same archetype are stored together,
//! and every component type has a storage of its own.
//! Components are created default-constructed and modified afterwards.
//!
//! # Queries are superset queries
//! A query names a list of component types
//! and visits every entity whose archetype contains all of them,
//! no matter what else the archetype contains.
//! The archetype table keeps a membership bitmap per component type,
//! so a query only walks the buckets of matching archetypes.
//!
//! # The universe is small
//! A universe of `n` types has `2^n` archetypes.
//! This is cheap for the handful of types a world usually has,
//! but the table doubles with every type added.
//! The universe is therefore capped at [`comp::Mask::CAPACITY`] types.
//!
//! # Ordering is deterministic
//! All storages are [`OrderedSet`]s keyed by a creation sequence number.
//! Iteration order within one archetype is creation order,
//! and does not depend on where elements were allocated.

#![cfg_attr(not(debug_assertions), deny(missing_docs))]
#![cfg_attr(doc, warn(missing_docs))]

pub mod archetype;
pub use archetype::Archetype;

pub mod comp;
pub use comp::Component;

pub mod entity;
pub use entity::Entity;

mod error;
pub use error::Error;

pub mod storage;
pub use storage::OrderedSet;

#[cfg(any(test, feature = "internal-bench"))]
pub mod test_util;

pub mod world;
pub use world::World;

pub mod util;
