//! Components and the closed universe of component types.
//!
//! The universe is the ordered list of component types a [`World`](crate::World) is built with.
//! Each type in the universe is identified by a small tag, its [`Id`],
//! which is simply its position in the registration order.
//! Sets of component types (archetypes and queries) are [`Mask`]s over these tags.
//!
//! Any `Default + Send + Sync + 'static` type can be a component;
//! there is nothing to derive or implement.
//! Component instances are created default-constructed
//! and mutated through the world afterwards.

use std::fmt;

use indexmap::IndexSet;
use xias::Xias;

use crate::util::DbgTypeId;
use crate::Error;

mod list;
pub use list::List;

mod mask;
pub use mask::Mask;

/// A type that can be stored as a component.
///
/// This trait is blanket-implemented for every eligible type.
pub trait Component: Default + Send + Sync + 'static {}

impl<T: Default + Send + Sync + 'static> Component for T {}

/// The tag of a component type, i.e. its position in the universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u8);

impl Id {
    pub(crate) fn from_index(index: usize) -> Self { Self(index.small_int()) }

    /// The position of this component type in the universe.
    pub fn index(self) -> usize { self.0.small_int() }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "c{}", self.0) }
}

/// The ordered, immutable list of component types a world is configured with.
#[derive(Debug, Clone)]
pub struct Universe {
    types: IndexSet<DbgTypeId>,
}

impl Universe {
    /// Creates a universe from types in registration order.
    ///
    /// Fails if a type is repeated or there are more than [`Mask::CAPACITY`] types.
    pub fn new(types: impl IntoIterator<Item = DbgTypeId>) -> Result<Self, Error> {
        let mut set = IndexSet::new();
        for ty in types {
            if !set.insert(ty) {
                return Err(Error::DuplicateComponent { comp: ty.name });
            }
        }

        if set.len() > Mask::CAPACITY {
            return Err(Error::UniverseTooLarge { len: set.len() });
        }

        Ok(Self { types: set })
    }

    /// Returns the number of component types.
    pub fn len(&self) -> usize { self.types.len() }

    /// Returns true if the universe has no component types.
    pub fn is_empty(&self) -> bool { self.types.is_empty() }

    /// Looks up the tag of a component type.
    pub fn id_of_type(&self, ty: DbgTypeId) -> Option<Id> {
        self.types.get_index_of(&ty).map(Id::from_index)
    }

    /// Looks up the tag of the component type `C`.
    pub fn id_of<C: 'static>(&self) -> Option<Id> { self.id_of_type(DbgTypeId::of::<C>()) }

    /// Like [`id_of`](Self::id_of), but reports unknown types as [`Error::UnknownComponent`].
    pub fn try_id_of<C: 'static>(&self) -> Result<Id, Error> {
        let ty = DbgTypeId::of::<C>();
        self.id_of_type(ty).ok_or(Error::UnknownComponent { comp: ty.name })
    }

    /// Returns the type registered under a tag.
    ///
    /// # Panics
    /// Panics if the tag does not belong to this universe.
    pub fn type_of(&self, id: Id) -> DbgTypeId {
        match self.types.get_index(id.index()) {
            Some(&ty) => ty,
            None => panic!("Component tag {id} is out of range for a universe of {}", self.len()),
        }
    }

    /// The mask containing every component type of the universe.
    pub fn full_mask(&self) -> Mask { (0..self.len()).map(Id::from_index).collect() }

    /// Converts a list of types into a mask.
    ///
    /// Every type must belong to the universe and appear at most once.
    pub fn mask_of_types(&self, types: &[DbgTypeId]) -> Result<Mask, Error> {
        let mut mask = Mask::EMPTY;
        for &ty in types {
            let id = self.id_of_type(ty).ok_or(Error::UnknownComponent { comp: ty.name })?;
            if mask.contains(id) {
                return Err(Error::DuplicateComponent { comp: ty.name });
            }
            mask = mask.with(id);
        }
        Ok(mask)
    }

    /// Converts a [`List`] of types into a mask.
    pub fn mask_of<L: List>(&self) -> Result<Mask, Error> { self.mask_of_types(&L::type_ids()) }

    /// Formats a mask as the list of its type names.
    pub fn describe(&self, mask: Mask) -> String {
        let names: Vec<_> = mask.iter().map(|id| self.type_of(id).name).collect();
        format!("{{{}}}", names.join(", "))
    }
}
