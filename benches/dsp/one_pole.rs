//! Benchmarks for the TPT one-pole stage.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ladder_dsp::OnePoleFilter;

use crate::{ramp, BLOCK_SIZES};

pub fn bench_one_pole(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/one_pole");

    for &size in BLOCK_SIZES {
        let input = ramp(size);

        let mut filter = OnePoleFilter::lowpass(1_000.0, 48_000.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer));
            })
        });

        let mut filter = OnePoleFilter::highpass(1_000.0, 48_000.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("highpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
