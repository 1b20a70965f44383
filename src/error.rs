//! Errors reported by the world and its storages.
//!
//! Lookups that simply find nothing are not errors;
//! they return `None` (or `false`) instead.

use crate::{entity, storage};

/// Errors returned by archec operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A component type was requested that is not declared in the universe.
    #[error("component type `{comp}` is not declared in the component universe")]
    UnknownComponent {
        /// Name of the requested type.
        comp: &'static str,
    },

    /// A component type was listed more than once.
    #[error("component type `{comp}` is listed more than once")]
    DuplicateComponent {
        /// Name of the repeated type.
        comp: &'static str,
    },

    /// The universe has more component types than an archetype mask can hold.
    #[error(
        "a component universe of {len} types exceeds the limit of {} types",
        crate::comp::Mask::CAPACITY
    )]
    UniverseTooLarge {
        /// Number of registered types.
        len: usize,
    },

    /// A component was accessed on an entity whose archetype does not contain it.
    #[error("component type `{comp}` is not part of the archetype {archetype}")]
    OutOfArchetype {
        /// Name of the requested type.
        comp:      &'static str,
        /// Human-readable description of the entity's archetype.
        archetype: String,
    },

    /// The entity handle does not refer to a live entity.
    #[error("entity {entity} does not exist")]
    EntityNotFound {
        /// The stale handle.
        entity: entity::Ref,
    },

    /// The component instance referenced by an entity slot has been removed.
    #[error("component `{comp}` of entity {entity} was removed from component storage")]
    DanglingComponent {
        /// Name of the component type.
        comp:   &'static str,
        /// The entity holding the dangling slot.
        entity: entity::Ref,
    },

    /// An ordered set already contains an element with the key.
    #[error("an element with key {key} already exists")]
    DuplicateKey {
        /// The colliding key.
        key: storage::Key,
    },

    /// The key marks the end of the key sequence and cannot be stored.
    #[error("key {key} is reserved as the end of the key sequence")]
    ReservedKey {
        /// The rejected key.
        key: storage::Key,
    },

    /// A batch passed to an ordered merge is not strictly increasing.
    #[error("batch is not strictly increasing: {next} follows {previous}")]
    UnsortedBatch {
        /// The earlier key in the batch.
        previous: storage::Key,
        /// The later key, which is not greater than `previous`.
        next:     storage::Key,
    },
}
