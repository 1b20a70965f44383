//! The heap-owning ordered set that backs every storage bucket.
//!
//! Both the per-component buckets and the per-archetype entity buckets
//! are [`OrderedSet`]s.
//! Elements are boxed, so growing or shifting the backing vector
//! never moves an element that is already stored.
//!
//! # Ordering
//! Elements are ordered by their [`Key`], which is a creation sequence number.
//! The order is therefore deterministic across runs
//! and identical to insertion order for elements created by [`OrderedSet::create_new`].
//! Fresh keys are never reused within a set, even after removal or [`OrderedSet::clear`].
//! Explicit-key insertion may name any key that is not currently stored;
//! [`FreshMut`] is a view of a set that only stores elements under fresh keys,
//! so a removed key stays absent for as long as the view is the only writer.

use std::{fmt, mem};

use itertools::{EitherOrBoth, Itertools};
use rayon::prelude::*;

use crate::Error;

mod any;
pub(crate) use any::{builder as any_builder, AnyStorage};

mod fresh;
pub use fresh::FreshMut;


/// The identity key of an element in an [`OrderedSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(u64);

impl Key {
    /// The first key allocated by a fresh sequence.
    pub const FIRST: Self = Self(1);

    /// The end of the key sequence.
    ///
    /// No element can be stored under this key, because no fresh key could follow it.
    pub const END: Self = Self(u64::MAX);

    /// Wraps a raw key value.
    pub const fn new(value: u64) -> Self { Self(value) }

    /// Returns the raw key value.
    pub const fn get(self) -> u64 { self.0 }

    pub(crate) fn next(self) -> Self {
        Self(self.0.checked_add(1).expect("Key::END is never stored"))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "#{}", self.0) }
}

/// A collection of boxed `T` kept sorted by [`Key`] with no duplicate keys.
///
/// Lookup by key is a binary search.
/// Insertion and removal shift the (boxed) entries behind the affected position.
pub struct OrderedSet<T> {
    entries:  Vec<(Key, Box<T>)>,
    /// Strictly greater than every key that has ever been stored.
    next_key: Key,
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self { Self::new() }
}

impl<T> OrderedSet<T> {
    /// Creates an empty set.
    pub fn new() -> Self { Self { entries: Vec::new(), next_key: Key::FIRST } }

    /// Creates an empty set with space for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity), next_key: Key::FIRST }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize { self.entries.len() }

    /// Returns true if the set has no elements.
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Reserves space for at least `additional` more elements.
    ///
    /// This is only a performance hint.
    pub fn reserve(&mut self, additional: usize) { self.entries.reserve(additional); }

    /// Drops all elements. Keys of the dropped elements are not reused.
    pub fn clear(&mut self) { self.entries.clear(); }

    /// The key that the next [`create_new`](Self::create_new) call will assign.
    pub fn next_key(&self) -> Key { self.next_key }

    fn search(&self, key: Key) -> Result<usize, usize> {
        self.entries.binary_search_by_key(&key, |&(entry_key, _)| entry_key)
    }

    /// Returns the position of the element with the given key,
    /// or `None` if no such element exists.
    pub fn find(&self, key: Key) -> Option<usize> { self.search(key).ok() }

    /// Returns true if an element with the given key exists.
    pub fn contains(&self, key: Key) -> bool { self.search(key).is_ok() }

    /// Gets the element with the given key.
    pub fn get(&self, key: Key) -> Option<&T> {
        let position = self.find(key)?;
        self.entries.get(position).map(|(_, value)| &**value)
    }

    /// Gets the element with the given key mutably.
    pub fn get_mut(&mut self, key: Key) -> Option<&mut T> {
        let position = self.find(key)?;
        self.entries.get_mut(position).map(|(_, value)| &mut **value)
    }

    /// Gets the element at a position in key order.
    pub fn get_index(&self, position: usize) -> Option<(Key, &T)> {
        self.entries.get(position).map(|(key, value)| (*key, &**value))
    }

    /// Allocates a default-constructed element under a fresh key.
    ///
    /// # Panics
    /// Panics if the key sequence is exhausted.
    pub fn create_new(&mut self) -> (Key, &mut T)
    where
        T: Default,
    {
        self.emplace(T::default())
    }

    /// Stores `value` under a fresh key.
    ///
    /// # Panics
    /// Panics if the key sequence is exhausted.
    pub fn emplace(&mut self, value: T) -> (Key, &mut T) {
        let key = self.next_key;
        match self.insert(key, value) {
            Ok(value) => (key, value),
            Err(err) => panic!("Cannot allocate a fresh key: {err}"),
        }
    }

    /// Stores `value` under an explicit key.
    ///
    /// Fails with [`Error::DuplicateKey`] if the key is already in use
    /// and with [`Error::ReservedKey`] if the key is [`Key::END`].
    pub fn insert(&mut self, key: Key, value: T) -> Result<&mut T, Error> {
        if key == Key::END {
            return Err(Error::ReservedKey { key });
        }

        let position = match self.search(key) {
            Ok(_) => return Err(Error::DuplicateKey { key }),
            Err(position) => position,
        };

        self.advance_past(key);
        self.entries.insert(position, (key, Box::new(value)));
        let (_, value) = self.entries.get_mut(position).expect("just inserted");
        Ok(&mut **value)
    }

    /// Stores every value of the iterator under fresh keys, returning the keys in order.
    pub fn extend(&mut self, values: impl IntoIterator<Item = T>) -> Vec<Key> {
        let values = values.into_iter();
        self.entries.reserve(values.size_hint().0);
        values.map(|value| self.emplace(value).0).collect()
    }

    /// Merges a batch whose keys are strictly increasing.
    ///
    /// Runs in `O(n + m)`.
    /// Nothing is inserted if the batch is out of order or repeats a key
    /// ([`Error::UnsortedBatch`]), shares a key with the set ([`Error::DuplicateKey`])
    /// or ends with [`Key::END`] ([`Error::ReservedKey`]).
    pub fn insert_sorted_unique(&mut self, batch: Vec<(Key, T)>) -> Result<(), Error> {
        for (previous, next) in batch.iter().map(|&(key, _)| key).tuple_windows() {
            if previous >= next {
                return Err(Error::UnsortedBatch { previous, next });
            }
        }

        if let Some(&(key, _)) = batch.last() {
            if key == Key::END {
                return Err(Error::ReservedKey { key });
            }
        }

        let collision = self
            .keys()
            .merge_join_by(batch.iter().map(|&(key, _)| key), Ord::cmp)
            .find_map(|pair| match pair {
                EitherOrBoth::Both(key, _) => Some(key),
                _ => None,
            });
        if let Some(key) = collision {
            return Err(Error::DuplicateKey { key });
        }

        if let Some(&(last, _)) = batch.last() {
            self.advance_past(last);
        }

        let existing = mem::take(&mut self.entries);
        let mut merged = Vec::with_capacity(existing.len() + batch.len());
        merged.extend(
            existing
                .into_iter()
                .merge_by(batch.into_iter().map(|(key, value)| (key, Box::new(value))), |a, b| {
                    a.0 < b.0
                }),
        );
        self.entries = merged;

        Ok(())
    }

    /// Merges a batch in any order.
    ///
    /// The batch is stably sorted by key first.
    /// If the batch repeats a key, only its first occurrence is kept.
    pub fn insert_batch(&mut self, mut batch: Vec<(Key, T)>) -> Result<(), Error> {
        batch.sort_by_key(|&(key, _)| key);
        batch.dedup_by_key(|&mut (key, _)| key);
        self.insert_sorted_unique(batch)
    }

    /// Removes the element at a position in key order.
    ///
    /// # Panics
    /// Panics if `position` is out of bounds.
    pub fn remove_at(&mut self, position: usize) -> (Key, T) {
        let (key, value) = self.entries.remove(position);
        (key, *value)
    }

    /// Removes the element whose key equals `key`, or returns `None` if there is none.
    pub fn remove(&mut self, key: Key) -> Option<T> {
        let position = self.find(key)?;
        Some(self.remove_at(position).1)
    }

    /// Projects every element satisfying `predicate`, in key order.
    ///
    /// The set is not modified.
    pub fn all_satisfying<U>(
        &self,
        mut predicate: impl FnMut(&T) -> bool,
        mut projector: impl FnMut(Key, &T) -> U,
    ) -> Vec<U> {
        self.iter()
            .filter(|(_, value)| predicate(value))
            .map(|(key, value)| projector(key, value))
            .collect()
    }

    /// Iterates over the keys in order.
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.entries.iter().map(|&(key, _)| key)
    }

    /// Iterates over the elements in key order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Key, &T)> + ExactSizeIterator + '_ {
        self.entries.iter().map(|(key, value)| (*key, &**value))
    }

    /// Iterates mutably over the elements in key order.
    pub fn iter_mut(
        &mut self,
    ) -> impl DoubleEndedIterator<Item = (Key, &mut T)> + ExactSizeIterator + '_ {
        self.entries.iter_mut().map(|(key, value)| (*key, &mut **value))
    }

    /// Iterates over the elements in parallel.
    pub(crate) fn par_iter(&self) -> impl IndexedParallelIterator<Item = (Key, &T)> + '_
    where
        T: Sync,
    {
        self.entries.par_iter().map(|(key, value)| (*key, &**value))
    }

    fn advance_past(&mut self, key: Key) {
        if key >= self.next_key {
            self.next_key = key.next();
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
