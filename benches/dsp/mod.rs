//! Benchmarks for the filter core.

mod ladder;
mod one_pole;
mod shaped_ladder;

pub use ladder::bench_ladder;
pub use one_pole::bench_one_pole;
pub use shaped_ladder::bench_shaped_ladder;
