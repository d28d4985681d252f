mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use track_forge::scatter::{scatter_trees, TreeScatterConfig};

const TREE_COUNTS: [usize; 3] = [100, 200, 400];

fn fixed_circuit(points: usize) -> Vec<Vec2> {
    (0..points)
        .map(|i| {
            let a = i as f32 / points as f32 * std::f32::consts::TAU;
            Vec2::from_angle(a) * 130.0
        })
        .collect()
}

fn scatter_benches(c: &mut Criterion) {
    let track = fixed_circuit(96);
    let mut group = c.benchmark_group("scatter/trees");

    for &count in &TREE_COUNTS {
        let config = TreeScatterConfig::default().with_tree_count(count);
        let mut rng = StdRng::seed_from_u64(0x57A77E2_u64 ^ count as u64);

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                let trees = scatter_trees(&track, &config, &mut rng);
                black_box(trees.len());
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = scatter_benches
}
criterion_main!(benches);
