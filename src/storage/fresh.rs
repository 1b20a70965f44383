use std::ops::Deref;

use super::{Key, OrderedSet};

/// Mutable access to an [`OrderedSet`] that only stores elements under fresh keys.
///
/// Everything that reads the set is available through [`Deref`].
/// Elements can be modified and removed,
/// but a removed key can never be filled again through this view,
/// so whoever still holds that key observes it as missing.
pub struct FreshMut<'a, T> {
    set: &'a mut OrderedSet<T>,
}

impl<'a, T> FreshMut<'a, T> {
    pub(crate) fn new(set: &'a mut OrderedSet<T>) -> Self { Self { set } }

    /// Gets the element with the given key mutably.
    pub fn get_mut(&mut self, key: Key) -> Option<&mut T> { self.set.get_mut(key) }

    /// Iterates mutably over the elements in key order.
    pub fn iter_mut(
        &mut self,
    ) -> impl DoubleEndedIterator<Item = (Key, &mut T)> + ExactSizeIterator + '_ {
        self.set.iter_mut()
    }

    /// Allocates a default-constructed element under a fresh key.
    pub fn create_new(&mut self) -> (Key, &mut T)
    where
        T: Default,
    {
        self.set.create_new()
    }

    /// Stores `value` under a fresh key.
    pub fn emplace(&mut self, value: T) -> (Key, &mut T) { self.set.emplace(value) }

    /// Stores each value under a fresh key, returning the keys in order.
    pub fn extend(&mut self, values: impl IntoIterator<Item = T>) -> Vec<Key> {
        self.set.extend(values)
    }

    /// Removes the element whose key equals `key`, or returns `None` if there is none.
    pub fn remove(&mut self, key: Key) -> Option<T> { self.set.remove(key) }

    /// Drops all elements.
    pub fn clear(&mut self) { self.set.clear(); }

    /// Reserves space for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) { self.set.reserve(additional); }
}

impl<'a, T> Deref for FreshMut<'a, T> {
    type Target = OrderedSet<T>;

    fn deref(&self) -> &OrderedSet<T> { self.set }
}
