mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use track_forge::circuit::{CircuitGenerator, GeneratorConfig};
use track_forge::track::{Track, TrackConfig};

const ATTEMPT_BUDGETS: [usize; 3] = [1, 3, 5];

fn circuit_generation_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation/circuit");

    for &attempts in &ATTEMPT_BUDGETS {
        let config = GeneratorConfig::default().with_max_attempts(attempts);
        let generator = CircuitGenerator::try_new(config).expect("valid config");
        let mut rng = StdRng::seed_from_u64(0xC1C711_u64 ^ attempts as u64);

        group.bench_with_input(BenchmarkId::from_parameter(attempts), &attempts, |b, _| {
            b.iter(|| {
                let (points, report) = generator.generate(&mut rng);
                black_box((points.len(), report.quality.score));
            });
        });
    }

    group.finish();
}

fn full_track_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation/track");
    let mut rng = StdRng::seed_from_u64(0x7240CC_u64);

    group.bench_function("default_config", |b| {
        b.iter(|| {
            let (track, _) =
                Track::generate(TrackConfig::default(), &mut rng).expect("valid config");
            black_box(track.points().len());
        });
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = circuit_generation_benches, full_track_benches
}
criterion_main!(benches);
