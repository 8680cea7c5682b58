use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/*
| type | one-pole stage | ladder (mix of U, f1, f2, f3, f4) |
| ---- | -------------- | --------------------------------- |
| LPF1 | lowpass output | pass-through                      |
| HPF1 | highpass out   | pass-through                      |
| LPF2 | pass-through   | 0,  0,  1,  0, 0                  |
| HPF2 | pass-through   | 1, -2,  1,  0, 0                  |
| BPF2 | pass-through   | 0,  2, -2,  0, 0                  |
| BSF2 | pass-through   | pass-through                      |
| LPF4 | pass-through   | 0,  0,  0,  0, 1                  |
| HPF4 | pass-through   | 1, -4,  6, -4, 1                  |
| BPF4 | pass-through   | 0,  0,  4, -8, 4                  |
*/

pub const CUTOFF_MIN: f32 = 20.0;
pub const CUTOFF_MAX: f32 = 20_000.0;
pub const CUTOFF_DEFAULT: f32 = 20_000.0;
pub const Q_DEFAULT: f32 = 0.707;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterType {
    Lpf1,
    Hpf1,
    Lpf2,
    Hpf2,
    Bpf2,
    Bsf2,
    Lpf4,
    Hpf4,
    Bpf4,
}

impl FilterType {
    pub const ALL: [FilterType; 9] = [
        FilterType::Lpf1,
        FilterType::Hpf1,
        FilterType::Lpf2,
        FilterType::Hpf2,
        FilterType::Bpf2,
        FilterType::Bsf2,
        FilterType::Lpf4,
        FilterType::Hpf4,
        FilterType::Bpf4,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterType::Lpf1 => "LPF1",
            FilterType::Hpf1 => "HPF1",
            FilterType::Lpf2 => "LPF2",
            FilterType::Hpf2 => "HPF2",
            FilterType::Bpf2 => "BPF2",
            FilterType::Bsf2 => "BSF2",
            FilterType::Lpf4 => "LPF4",
            FilterType::Hpf4 => "HPF4",
            FilterType::Bpf4 => "BPF4",
        }
    }

    pub fn is_lowpass(self) -> bool {
        matches!(self, FilterType::Lpf1 | FilterType::Lpf2 | FilterType::Lpf4)
    }

    pub fn is_highpass(self) -> bool {
        matches!(self, FilterType::Hpf1 | FilterType::Hpf2 | FilterType::Hpf4)
    }

    pub fn is_bandpass(self) -> bool {
        matches!(self, FilterType::Bpf2 | FilterType::Bpf4)
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for FilterType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterType::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownType(s.to_string()))
    }
}

/// Bilinear-transform integrator gain `g` with the cutoff prewarped so the
/// analog and digital responses agree at `cutoff_hz`.
///
/// `g = wa·T/2` where `wa = (2/T)·tan(wd·T/2)` and `wd = 2π·cutoff`. The
/// cutoff must stay strictly inside `(0, sample_rate / 2)`.
#[inline]
pub fn prewarp(cutoff_hz: f32, sample_rate: f32) -> f32 {
    let wd = TAU * cutoff_hz;
    let t = 1.0 / sample_rate;
    let wa = (2.0 / t) * (wd * t / 2.0).tan();
    wa * t / 2.0
}
