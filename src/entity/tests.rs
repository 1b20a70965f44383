use std::collections::HashSet;

use rayon::prelude::*;

use super::{Ealloc, Entity, Ref};
use crate::archetype::Table;
use crate::storage::Key;
use crate::test_util;

static_assertions::assert_impl_all!(Ref: Copy, Send, Sync);
// Entities hold the keys of the components they own; copying one would alias them.
static_assertions::assert_not_impl_any!(Entity: Clone);
static_assertions::assert_impl_all!(Ealloc: Send, Sync);

#[test]
fn test_ealloc_sequential() {
    let ealloc = Ealloc::default();
    let first = ealloc.allocate();
    let second = ealloc.allocate();
    assert_eq!(first, Key::FIRST);
    assert_eq!(second, Key::new(2));
    assert_eq!(ealloc.allocate(), Key::new(3));
}

#[test]
fn test_ealloc_concurrent_unique() {
    let ealloc = Ealloc::default();
    let ids: Vec<Key> = (0..4096).into_par_iter().map(|_| ealloc.allocate()).collect();
    let distinct: HashSet<Key> = ids.iter().copied().collect();
    assert_eq!(distinct.len(), ids.len());
}

#[test]
fn test_independent_ealloc() {
    let a = Ealloc::default();
    let b = Ealloc::default();
    a.allocate();
    a.allocate();
    assert_eq!(b.allocate(), Key::FIRST, "worlds must not share identifier sequences");
}

#[test]
fn test_slots_follow_component_order() {
    let universe = test_util::universe();
    let table = Table::new(&universe);
    let mask = universe.mask_of::<(test_util::IntSet, test_util::Int)>().expect("known types");
    let archetype = table.find(mask).expect("every subset is an archetype");

    let int = universe.id_of::<test_util::Int>().expect("known type");
    let text = universe.id_of::<test_util::Text>().expect("known type");
    let int_set = universe.id_of::<test_util::IntSet>().expect("known type");

    let entity =
        Entity::new(Key::new(9), archetype, vec![Key::new(1), Key::new(2)].into_boxed_slice());
    assert_eq!(entity.slot(int), Some(Key::new(1)));
    assert_eq!(entity.slot(int_set), Some(Key::new(2)));
    assert_eq!(entity.slot(text), None);
    assert!(!entity.has(text));

    assert_eq!(
        entity.slots().collect::<Vec<_>>(),
        vec![(int, Key::new(1)), (int_set, Key::new(2))]
    );
    assert_eq!(entity.handle().id(), Key::new(9));
    assert_eq!(entity.handle().archetype(), archetype.id());
}

#[test]
#[should_panic = "needs one slot per component type"]
fn test_slot_count_mismatch() {
    let universe = test_util::universe();
    let table = Table::new(&universe);
    let mask = universe.mask_of::<(test_util::Int,)>().expect("known types");
    let archetype = table.find(mask).expect("every subset is an archetype");
    Entity::new(Key::new(1), archetype, Box::new([]));
}
