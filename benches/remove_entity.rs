use archec::test_util::{self, CompN};
use criterion::*;
use xias::Xias;

fn remove_entity(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove entity");

    macro_rules! remove_entity_batch {
        ($num_comps:literal; $($comps:ty),* $(,)?) => {
            for log_entities in (0..=8).step_by(4) {
                let entities = 1 << log_entities;
                group.throughput(Throughput::Elements(entities));
                group.bench_with_input(BenchmarkId::new(format!("{} components", $num_comps), format!("{entities} entities")), &entities, |b, &entities| {
                    b.iter_batched(
                        || {
                            let mut world = test_util::world_n8();
                            let mut vec = Vec::with_capacity(entities.small_int());
                            for _ in 0..entities {
                                let entity = world.create_entity::<($($comps,)*)>().expect("CompN types are registered");
                                vec.push(entity);
                            }
                            (world, vec)
                        },
                        |(mut world, vec)| {
                            for entity in vec {
                                world.remove_entity(entity);
                            }
                            world
                        },
                        BatchSize::SmallInput,
                    );
                });
            }
        }
    }

    remove_entity_batch!(0; );
    remove_entity_batch!(1; CompN<1>);
    remove_entity_batch!(2; CompN<1>, CompN<2>);
    remove_entity_batch!(4; CompN<1>, CompN<2>, CompN<3>, CompN<4>);
    remove_entity_batch!(8; CompN<1>, CompN<2>, CompN<3>, CompN<4>, CompN<5>, CompN<6>, CompN<7>, CompN<8>);
}

criterion_group!(benches, remove_entity);
criterion_main!(benches);
