pub mod analysis; // Impulse/FFT measurement helpers
pub mod config;
pub mod dsp;
pub mod graph; // Host-facing nodes wrapping the filter core
pub mod synth; // Control messages and the per-voice wrapper

pub use config::{ConfigError, LadderConfig, LadderLimits};
pub use dsp::filter::FilterType;
pub use dsp::ladder::MoogLadderFilter;
pub use dsp::one_pole::OnePoleFilter;

/// Fraction of the sample rate the host adapter keeps cutoff below, so the
/// prewarp `tan()` never reaches its pole at Nyquist.
pub(crate) const NYQUIST_MARGIN: f32 = 0.49;
