//! Benchmarks for the four-pole ladder.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ladder_dsp::{FilterType, MoogLadderFilter};

use crate::{ramp, BLOCK_SIZES};

pub fn bench_ladder(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/ladder");

    for &size in BLOCK_SIZES {
        let input = ramp(size);

        // The mix is five multiplies regardless of type, so one lowpass and
        // one highpass cover the table.
        for (name, filter_type) in [("lpf4", FilterType::Lpf4), ("hpf4", FilterType::Hpf4)] {
            let mut filter = MoogLadderFilter::with_type(filter_type);
            filter.set_parameters(1_000.0, 5.0, 1.0, 0.0, 48_000.0);
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    filter.render(black_box(&mut buffer));
                })
            });
        }

        // tanh on every sample
        let mut filter = MoogLadderFilter::with_type(FilterType::Lpf4);
        filter.set_parameters(1_000.0, 5.0, 1.5, 0.0, 48_000.0);
        filter.set_use_nonlinear_processing(true);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("lpf4_nonlinear", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer));
            })
        });

        // set_parameters with a fresh cutoff every sample
        let mut filter = MoogLadderFilter::with_type(FilterType::Lpf4);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("lpf4_sweep", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                for (i, sample) in buffer.iter_mut().enumerate() {
                    let cutoff = 200.0 + i as f32 * 10.0;
                    filter.set_parameters(black_box(cutoff), 5.0, 1.0, 0.0, 48_000.0);
                    *sample = filter.process(*sample);
                }
            })
        });
    }

    group.finish();
}
