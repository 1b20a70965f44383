//! Tests superset queries.

use std::collections::BTreeSet;

use parking_lot::Mutex;

use super::{abc, Abc};
use crate::test_util::{self, Int, IntSet, Text};
use crate::{comp, entity, Error, World};

fn visit<Q: comp::List>(world: &World) -> Vec<entity::Ref> {
    let mut visited = Vec::new();
    world
        .for_each_entity_with_components::<Q>(|view| visited.push(view.handle()))
        .expect("query types are in the universe");
    visited
}

fn set(entities: &[entity::Ref]) -> BTreeSet<entity::Ref> { entities.iter().copied().collect() }

#[test]
fn test_superset_queries() {
    let Abc { world, a, b, c } = abc();

    let text = visit::<(Text,)>(&world);
    assert_eq!(text.len(), 3, "each entity is visited once");
    assert_eq!(set(&text), set(&[a, b, c]));

    assert_eq!(visit::<(Int,)>(&world), vec![b]);
    assert_eq!(visit::<(IntSet,)>(&world), vec![c]);
    assert_eq!(visit::<(Int, Text)>(&world), vec![b]);
    assert_eq!(visit::<(Text, Int)>(&world), vec![b], "query order is irrelevant");
    assert!(visit::<(Int, IntSet)>(&world).is_empty());
}

#[test]
fn test_empty_query_visits_everything() {
    let Abc { mut world, a, b, c } = abc();
    let empty = world.create_entity::<()>().expect("empty list is valid");

    let all = visit::<()>(&world);
    assert_eq!(all.len(), 4);
    assert_eq!(set(&all), set(&[a, b, c, empty]));
}

#[test]
fn test_query_sees_removal() {
    let Abc { mut world, a, b, c } = abc();
    world.remove_entity(a);
    assert_eq!(set(&visit::<(Text,)>(&world)), set(&[b, c]));
}

#[test]
fn test_query_within_archetype_follows_creation_order() {
    let mut world = test_util::world();
    let created: Vec<_> = (0..16)
        .map(|_| world.create_entity::<(Int, Text)>().expect("known types"))
        .collect();
    assert_eq!(visit::<(Int,)>(&world), created);
}

#[test]
fn test_query_unknown_type() {
    let Abc { world, .. } = abc();
    let mut calls = 0;
    let result = world.for_each_entity_with_components::<(Text, u64)>(|_| calls += 1);
    assert_eq!(result, Err(Error::UnknownComponent { comp: "u64" }));
    assert_eq!(calls, 0);
}

#[test]
fn test_query_reads_components() {
    let Abc { mut world, b, c, .. } = abc();
    world.set_component::<Text>(b, "b".into());
    world.set_component::<Text>(c, "c".into());

    let mut texts = Vec::new();
    world
        .for_each_entity_with_components::<(Text,)>(|view| {
            texts.push(view.get::<Text>().clone());
            assert_eq!(view.try_get::<Int>().is_ok(), view.handle() == b);
        })
        .expect("known types");
    texts.sort();
    assert_eq!(texts, vec!["", "b", "c"]);
}

#[test]
fn test_mutable_query() {
    let Abc { mut world, a, b, c } = abc();
    world
        .for_each_entity_with_components_mut::<(Text,)>(|mut view| {
            let id = view.handle().id().get();
            *view.get_mut::<Text>() = format!("entity {id}");
            if let Ok(int) = view.try_get_mut::<Int>() {
                *int = 42;
            }
        })
        .expect("known types");

    for entity in [a, b, c] {
        assert_eq!(world.get_component::<Text>(entity), &format!("entity {}", entity.id().get()));
    }
    assert_eq!(world.get_component::<Int>(b), &42);
}

#[test]
fn test_apply_to_exact_archetype() {
    let Abc { world, a, .. } = abc();
    let mut visited = Vec::new();
    world
        .apply_to_entities_of_archetype::<(Text,)>(|view| visited.push(view.handle()))
        .expect("known types");
    assert_eq!(visited, vec![a], "supersets of the archetype are not visited");
}

#[test]
fn test_parallel_query() {
    let mut world = test_util::world();
    let mut expected = BTreeSet::new();
    for i in 0..300 {
        let entity = match i % 3 {
            0 => world.create_entity::<(Int,)>(),
            1 => world.create_entity::<(Int, Text)>(),
            _ => world.create_entity::<(Text,)>(),
        };
        let entity = entity.expect("known types");
        if i % 3 != 2 {
            expected.insert(entity);
        }
    }

    let visited = Mutex::new(Vec::new());
    world
        .par_for_each_entity_with_components::<(Int,)>(|view| visited.lock().push(view.handle()))
        .expect("known types");

    let visited = visited.into_inner();
    assert_eq!(visited.len(), expected.len());
    assert_eq!(set(&visited), expected);
}
