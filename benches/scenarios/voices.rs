//! Benchmarks for host-driven filter voices.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ladder_dsp::graph::{GraphNode, LadderNode, LadderParam, Modulatable};
#[cfg(feature = "rtrb")]
use ladder_dsp::synth::{FilterVoice, LadderMessage};
use ladder_dsp::LadderConfig;

use crate::{ramp, BLOCK_SIZES};

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let config = LadderConfig::default().with_resonance(6.0);

    for &size in BLOCK_SIZES {
        let input = ramp(size);

        // === ADAPTER ===
        // clamping, noise injection and output sanitising on top of the core
        let mut node = LadderNode::new(config.clone(), 48_000.0).expect("default config builds");
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("node", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                node.render_block(black_box(&mut buffer));
            })
        });

        // === ENVELOPE SWEEP ===
        // cutoff modulated every sample, forcing a coefficient recompute
        let mut swept = LadderNode::new(config.clone(), 48_000.0).expect("default config builds");
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("cutoff_sweep", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                for (i, sample) in buffer.iter_mut().enumerate() {
                    let env = 1.0 - i as f32 / size as f32;
                    swept.apply_modulation(LadderParam::Cutoff, 300.0, env * 4_000.0);
                    *sample = swept.process(*sample);
                }
            })
        });

        #[cfg(feature = "rtrb")]
        {
            // === MESSAGE-DRIVEN VOICE ===
            // one control message per block through the lock-free queue
            let (mut producer, consumer) = rtrb::RingBuffer::<LadderMessage>::new(64);
            let node = LadderNode::new(config.clone(), 48_000.0).expect("default config builds");
            let mut voice = FilterVoice::new(node, consumer);
            let mut buffer = input.clone();
            let mut cutoff = 200.0;
            group.bench_with_input(BenchmarkId::new("voice", size), &size, |b, _| {
                b.iter(|| {
                    cutoff = if cutoff > 8_000.0 { 200.0 } else { cutoff * 1.01 };
                    let _ = producer.push(LadderMessage::SetCutoff(cutoff));
                    buffer.copy_from_slice(&input);
                    voice.render(black_box(&mut buffer));
                })
            });
        }
    }

    group.finish();
}
