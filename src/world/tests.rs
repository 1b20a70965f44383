use super::{Shared, World};
use crate::entity;
use crate::test_util::{self, Int, IntSet, Text};
use crate::Error;

mod query;

static_assertions::assert_impl_all!(World: Send, Sync);
static_assertions::assert_impl_all!(Shared: Clone, Send, Sync);

/// The entities `A {Text}`, `B {Int, Text}` and `C {Text, IntSet}`.
struct Abc {
    world: World,
    a:     entity::Ref,
    b:     entity::Ref,
    c:     entity::Ref,
}

fn abc() -> Abc {
    let mut world = test_util::world();
    let a = world.create_entity::<(Text,)>().expect("Text is in the universe");
    let b = world.create_entity::<(Int, Text)>().expect("Int and Text are in the universe");
    let c = world.create_entity::<(Text, IntSet)>().expect("Text and IntSet are in the universe");
    Abc { world, a, b, c }
}

#[test]
fn test_build_enumerates_archetypes() {
    let world = test_util::world();
    assert_eq!(world.archetype_count(), 8);
    assert_eq!(world.universe().len(), 3);
    assert!(world.is_empty());
}

#[test]
fn test_build_rejects_duplicate_type() {
    let result = World::builder().component::<Int>().component::<Int>().build();
    assert_eq!(result.err(), Some(Error::DuplicateComponent { comp: "i32" }));
}

#[test]
fn test_build_rejects_large_universe() {
    use test_util::CompN;

    let result = World::builder()
        .component::<CompN<0>>()
        .component::<CompN<1>>()
        .component::<CompN<2>>()
        .component::<CompN<3>>()
        .component::<CompN<4>>()
        .component::<CompN<5>>()
        .component::<CompN<6>>()
        .component::<CompN<7>>()
        .component::<CompN<8>>()
        .component::<CompN<9>>()
        .component::<CompN<10>>()
        .component::<CompN<11>>()
        .component::<CompN<12>>()
        .component::<CompN<13>>()
        .component::<CompN<14>>()
        .component::<CompN<15>>()
        .component::<CompN<16>>()
        .build();
    assert_eq!(result.err(), Some(Error::UniverseTooLarge { len: 17 }));
}

#[test]
fn test_create_entity_joins_exact_archetype() {
    let Abc { world, a, b, c } = abc();
    assert_eq!(world.len(), 3);

    let b_bucket = world.archetype_storage::<(Text, Int)>().expect("known types");
    assert_eq!(b_bucket.keys().collect::<Vec<_>>(), vec![b.id()]);
    assert_eq!(world.archetype_storage::<(Text,)>().expect("known types").len(), 1);
    assert!(world.archetype_storage::<(Int,)>().expect("known types").is_empty());

    assert_ne!(a.archetype(), c.archetype());
    assert!(a.id() < b.id() && b.id() < c.id(), "identifiers follow creation order");
}

#[test]
fn test_create_entity_rejects_unknown_type() {
    let mut world = test_util::world();
    assert_eq!(
        world.create_entity::<(Int, u64)>(),
        Err(Error::UnknownComponent { comp: "u64" })
    );
    assert_eq!(
        world.create_entity::<(Text, Text)>(),
        Err(Error::DuplicateComponent { comp: "alloc::string::String" })
    );
    assert!(world.is_empty());
    assert!(world.components::<Int>().expect("Int is in the universe").is_empty());
}

#[test]
fn test_create_empty_entity() {
    let mut world = test_util::world();
    let entity = world.create_entity::<()>().expect("empty list is valid");
    let record = world.entity(entity).expect("entity was just created");
    assert!(record.archetype().mask().is_empty());
    assert_eq!(record.slots().count(), 0);
}

#[test]
fn test_remove_entity_drops_components() {
    let Abc { mut world, a, b, c } = abc();
    assert!(world.remove_entity(b));
    assert!(!world.remove_entity(b), "entity was already removed");

    assert_eq!(world.len(), 2);
    assert!(world.entity(b).is_none());
    assert!(world.components::<Int>().expect("known type").is_empty());
    assert_eq!(world.components::<Text>().expect("known type").len(), 2);
    assert_eq!(world.try_get_component::<Int>(b), Err(Error::EntityNotFound { entity: b }));

    assert!(world.entity(a).is_some());
    assert!(world.entity(c).is_some());
}

#[test]
fn test_identifiers_are_per_world() {
    let mut first = test_util::world();
    let mut second = test_util::world();
    first.create_entity::<(Int,)>().expect("known type");
    first.create_entity::<(Int,)>().expect("known type");

    let entity = second.create_entity::<(Int,)>().expect("known type");
    assert_eq!(entity.id(), crate::storage::Key::FIRST);
}

#[test]
fn test_reserve_is_invisible() {
    let Abc { mut world, b, .. } = abc();
    world.reserve(1024);
    world.reserve_archetype::<(Int, Text)>(64).expect("known types");
    assert_eq!(world.len(), 3);
    assert_eq!(world.get_component::<Int>(b), &0);
    assert_eq!(
        world.reserve_archetype::<(u64,)>(1),
        Err(Error::UnknownComponent { comp: "u64" })
    );
}

#[test]
fn test_shared_world() {
    let Abc { world, b, .. } = abc();
    let shared = Shared::new(world);

    let writer = shared.clone();
    std::thread::spawn(move || {
        writer.write().set_component::<Int>(b, 5);
    })
    .join()
    .expect("writer thread panicked");

    let reader = shared.clone();
    let value = std::thread::spawn(move || {
        let world = reader.read();
        *world.get_component::<Int>(b)
    })
    .join()
    .expect("reader thread panicked");
    assert_eq!(value, 5);

    let guard = shared.read_arc();
    drop(shared);
    assert_eq!(guard.len(), 3, "owned guard outlives the handle");
}
