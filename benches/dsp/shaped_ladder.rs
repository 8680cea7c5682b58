//! Benchmarks for the shaped ladder.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ladder_dsp::dsp::{Shaper, ShapedLadder, ShaperSet};

use crate::{ramp, BLOCK_SIZES};

pub fn bench_shaped_ladder(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/shaped_ladder");

    for &size in BLOCK_SIZES {
        let input = ramp(size);

        for (name, shaper) in [("linear", Shaper::Linear), ("tanh", Shaper::Tanh), ("cos", Shaper::Cos)] {
            let mut filter = ShapedLadder::new();
            filter.set_parameters(1_000.0, 5.0, 1.0, 0.0, 48_000.0);
            filter.set_shapers(ShaperSet::uniform(shaper));
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    filter.render(black_box(&mut buffer));
                })
            });
        }
    }

    group.finish();
}
