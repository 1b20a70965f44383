use std::any::{self, Any};

use super::{Key, OrderedSet};
use crate::Component;

/// Constructor for the type-erased storage of component `C`.
pub(crate) fn builder<C: Component>() -> Box<dyn AnyStorage> { Box::new(OrderedSet::<C>::new()) }

/// An [`OrderedSet`] of some component type, with the component type erased.
///
/// The world keeps one of these per component type of the universe.
pub(crate) trait AnyStorage: Send + Sync {
    fn as_any(&self) -> &(dyn Any + Send + Sync);

    fn as_any_mut(&mut self) -> &mut (dyn Any + Send + Sync);

    /// Name of the erased component type.
    fn comp_name(&self) -> &'static str;

    /// Allocates a default-constructed component and returns its key.
    fn create_default(&mut self) -> Key;

    /// Drops the component with the given key, returning whether it existed.
    fn remove_key(&mut self, key: Key) -> bool;

    fn reserve(&mut self, additional: usize);
}

impl dyn AnyStorage {
    pub(crate) fn downcast_ref<C: Component>(&self) -> &OrderedSet<C> {
        match self.as_any().downcast_ref::<OrderedSet<C>>() {
            Some(storage) => storage,
            None => panic!(
                "TypeId mismatch: storage of `{}` requested as `{}`",
                self.comp_name(),
                any::type_name::<C>()
            ),
        }
    }

    pub(crate) fn downcast_mut<C: Component>(&mut self) -> &mut OrderedSet<C> {
        let comp_name = self.comp_name();
        match self.as_any_mut().downcast_mut::<OrderedSet<C>>() {
            Some(storage) => storage,
            None => panic!(
                "TypeId mismatch: storage of `{}` requested as `{}`",
                comp_name,
                any::type_name::<C>()
            ),
        }
    }
}

impl<C: Component> AnyStorage for OrderedSet<C> {
    fn as_any(&self) -> &(dyn Any + Send + Sync) { self }

    fn as_any_mut(&mut self) -> &mut (dyn Any + Send + Sync) { self }

    fn comp_name(&self) -> &'static str { any::type_name::<C>() }

    fn create_default(&mut self) -> Key { self.create_new().0 }

    fn remove_key(&mut self, key: Key) -> bool { self.remove(key).is_some() }

    fn reserve(&mut self, additional: usize) { OrderedSet::reserve(self, additional) }
}
