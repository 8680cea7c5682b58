//! Low-level DSP primitives for the ladder filter.
//!
//! Everything here is allocation-free after construction and realtime-safe,
//! so filters can live directly inside voice structs. Parameter range
//! discipline belongs to the caller; the graph layer performs it.

/// Filter response types and the shared bilinear prewarp.
pub mod filter;
/// Four-pole zero-delay-feedback ladder with Oberheim pole mixing.
pub mod ladder;
/// Seedable noise floor used to bootstrap self-oscillation.
pub mod noise;
/// Topology-preserving one-pole stage.
pub mod one_pole;
/// Ladder variant with per-stage cutoffs and selectable nonlinearities.
pub mod shaped_ladder;
/// Saturation curves used inside the feedback loop.
pub mod shaper;

pub use filter::FilterType;
pub use ladder::{LadderOutputs, MoogLadderFilter, PoleMix};
pub use noise::NoiseSource;
pub use one_pole::OnePoleFilter;
pub use shaped_ladder::{ShapedLadder, ShaperSet};
pub use shaper::Shaper;
