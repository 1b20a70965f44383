//! Allocates entity identifiers.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::storage::Key;

/// Allocates unique entity identifiers for one world.
///
/// Allocation only needs a shared reference,
/// so identifiers can be reserved from several threads at once.
/// Identifiers are never reused, even after the entity is removed.
#[derive(Debug)]
pub struct Ealloc {
    /// The next identifier to allocate.
    gauge: AtomicU64,
}

impl Default for Ealloc {
    fn default() -> Self { Self { gauge: AtomicU64::new(Key::FIRST.get()) } }
}

impl Ealloc {
    /// Allocates a new identifier.
    pub fn allocate(&self) -> Key {
        let id = self.gauge.fetch_add(1, Ordering::SeqCst);
        assert!(id != u64::MAX, "Entity identifiers exhausted");
        Key::new(id)
    }
}
