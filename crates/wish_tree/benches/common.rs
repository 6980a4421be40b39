use std::time::Duration;

use criterion::{Criterion, Throughput};
use wish_tree::prelude::{generate_theme, EntityCount, Theme};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

/// Wish used by every bench that needs a concrete theme.
pub const BENCH_WISH: &str = "peace";
/// Frame step of the simulated 60 Hz loop.
#[allow(dead_code)]
pub const FRAME_DT: f32 = 1.0 / 60.0;

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

pub fn bench_theme() -> Theme {
    generate_theme(BENCH_WISH)
}

pub fn entity_count(count: usize) -> EntityCount {
    EntityCount::new(count).expect("bench counts are non-zero")
}
