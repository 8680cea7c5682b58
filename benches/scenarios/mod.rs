//! Host-side scenario benchmarks.
//!
//! These run the filter the way a host drives it: through the clamping
//! adapter, under modulation, and with control messages arriving per block.

mod voices;

pub use voices::bench_voices;
