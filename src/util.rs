//! Miscellaneous utilities used across the crate.

use std::any::{self, TypeId};
use std::{cmp, fmt, hash};

/// A [`TypeId`] that also remembers the name of the type it was created from.
///
/// Equality, ordering and hashing only consider the [`TypeId`].
#[derive(Clone, Copy)]
pub struct DbgTypeId {
    /// The actual type ID.
    pub id:   TypeId,
    /// The name of the type, from [`any::type_name`].
    pub name: &'static str,
}

impl DbgTypeId {
    /// Creates a new [`DbgTypeId`] representing the type `T`.
    pub fn of<T: 'static>() -> Self { Self { id: TypeId::of::<T>(), name: any::type_name::<T>() } }
}

impl fmt::Debug for DbgTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.name) }
}

impl fmt::Display for DbgTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name) }
}

impl PartialEq for DbgTypeId {
    fn eq(&self, other: &Self) -> bool { self.id == other.id }
}

impl Eq for DbgTypeId {}

impl PartialOrd for DbgTypeId {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> { Some(self.cmp(other)) }
}

impl Ord for DbgTypeId {
    fn cmp(&self, other: &Self) -> cmp::Ordering { self.id.cmp(&other.id) }
}

impl hash::Hash for DbgTypeId {
    fn hash<H: hash::Hasher>(&self, state: &mut H) { self.id.hash(state); }
}
