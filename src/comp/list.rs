use crate::util::DbgTypeId;
use crate::Component;

/// A compile-time list of component types, written as a tuple.
///
/// `()` is the empty list and `(C,)` is a list of one type.
/// This trait is implemented for tuples of up to 16 [`Component`]s.
pub trait List: 'static {
    /// Returns the types of the list in declaration order.
    fn type_ids() -> Vec<DbgTypeId>;
}

macro_rules! impl_list {
    ($($comps:ident),* $(,)?) => {
        impl<$($comps: Component,)*> List for ($($comps,)*) {
            fn type_ids() -> Vec<DbgTypeId> {
                vec![$(DbgTypeId::of::<$comps>(),)*]
            }
        }
    }
}

macro_rules! impl_list_accumulate {
    () => {
        impl_list!();
    };
    ($first:ident $(, $rest:ident)* $(,)?) => {
        impl_list_accumulate!($($rest),*);
        impl_list!($first $(, $rest)*);
    }
}
impl_list_accumulate!(P1, P2, P3, P4, P5, P6, P7, P8, P9, P10, P11, P12, P13, P14, P15, P16);
