mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use wish_tree::prelude::*;

const FOLIAGE_COUNTS: [usize; 3] = [1_000, 4_500, 20_000];
const WISHES: [&str; 3] = ["", "peace", "a much longer wish for a snowy winter night"];

fn theme_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("theme/generate");
    for wish in WISHES {
        group.bench_with_input(BenchmarkId::from_parameter(wish.len()), &wish, |b, wish| {
            b.iter(|| black_box(generate_theme(black_box(wish))));
        });
    }
    group.finish();
}

fn foliage_benches(c: &mut Criterion) {
    let theme = common::bench_theme();
    let mut group = c.benchmark_group("dataset/foliage");

    for &count in &FOLIAGE_COUNTS {
        group.throughput(common::elements_throughput(count));
        let entity_count = common::entity_count(count);
        let mut rng = Mulberry32::new(0xF0_11A6E ^ count as u32);

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                let dataset = build_foliage(&theme, entity_count, SCATTER_RADIUS, &mut rng);
                black_box(dataset.len());
            });
        });
    }

    group.finish();
}

fn formations_benches(c: &mut Criterion) {
    let config = SceneConfig::default();
    let mut group = c.benchmark_group("dataset/formations");
    group.throughput(common::elements_throughput(
        config.foliage_count + config.sphere_count + config.box_count,
    ));
    group.bench_function("default_config", |b| {
        let theme = common::bench_theme();
        b.iter(|| {
            let formations = Formations::build(&theme, &config).expect("valid config");
            black_box(formations.foliage.len());
        });
    });
    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = theme_benches, foliage_benches, formations_benches
}
criterion_main!(benches);
