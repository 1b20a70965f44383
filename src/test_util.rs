//! Utilities shared by unit tests and benchmarks.

#![allow(missing_docs)]

use parking_lot::Once;

use crate::comp::Universe;
use crate::storage::OrderedSet;
use crate::util::DbgTypeId;
use crate::{world, World};

/// Installs `env_logger` once per process.
pub fn init() {
    static SET_LOGGER_ONCE: Once = Once::new();
    SET_LOGGER_ONCE.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// An integer component.
pub type Int = i32;
/// A text component.
pub type Text = String;
/// A component that is itself an ordered set of integers.
pub type IntSet = OrderedSet<i32>;

/// The universe `{Int, Text, IntSet}`, in that order.
pub fn universe() -> Universe {
    Universe::new([DbgTypeId::of::<Int>(), DbgTypeId::of::<Text>(), DbgTypeId::of::<IntSet>()])
        .expect("test universe has distinct types")
}

/// Builds a world over the universe `{Int, Text, IntSet}`.
pub fn world() -> World {
    init();
    world::Builder::default()
        .component::<Int>()
        .component::<Text>()
        .component::<IntSet>()
        .build()
        .expect("test universe has distinct types")
}

/// A numbered component type for benchmarks with wide universes.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CompN<const N: usize>(pub i64);

/// Builds a world over `CompN<1>` to `CompN<8>`.
pub fn world_n8() -> World {
    init();
    world::Builder::default()
        .component::<CompN<1>>()
        .component::<CompN<2>>()
        .component::<CompN<3>>()
        .component::<CompN<4>>()
        .component::<CompN<5>>()
        .component::<CompN<6>>()
        .component::<CompN<7>>()
        .component::<CompN<8>>()
        .build()
        .expect("CompN types are distinct")
}
