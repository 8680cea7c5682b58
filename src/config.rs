//! Host-side configuration for a ladder instance.
//!
//! Everything here runs off the audio thread: build a [`LadderConfig`],
//! `validate()` it, then hand it to [`LadderNode`](crate::graph::LadderNode).

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::filter::{CUTOFF_MAX, CUTOFF_MIN};
use crate::dsp::noise::DEFAULT_NOISE_LEVEL;
use crate::dsp::{FilterType, MoogLadderFilter};

/// Middle C.
pub const CUTOFF_C4: f32 = 261.6256;
pub const DRIVE_DEFAULT: f32 = 0.6;
pub const NOISE_SEED_DEFAULT: u64 = 99;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown filter type {0:?}")]
    UnknownType(String),
    #[error("{0} cannot be synthesised by the ladder mix")]
    NotMixable(FilterType),
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    #[error("{field} = {value} outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("sample rate {0} Hz is not usable")]
    InvalidSampleRate(f32),
}

/// Ranges the host adapter clamps incoming parameters to.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LadderLimits {
    pub min_cutoff_hz: f32,
    pub max_cutoff_hz: f32,
    pub max_resonance: f32,
    pub max_drive: f32,
}

impl Default for LadderLimits {
    fn default() -> Self {
        Self {
            min_cutoff_hz: CUTOFF_MIN,
            max_cutoff_hz: CUTOFF_MAX,
            max_resonance: 10.0,
            max_drive: 2.0,
        }
    }
}

impl LadderLimits {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_finite("limits.min_cutoff_hz", self.min_cutoff_hz)?;
        check_finite("limits.max_cutoff_hz", self.max_cutoff_hz)?;
        check_finite("limits.max_resonance", self.max_resonance)?;
        check_finite("limits.max_drive", self.max_drive)?;

        check_range("limits.min_cutoff_hz", self.min_cutoff_hz, f32::MIN_POSITIVE, self.max_cutoff_hz)?;
        check_range("limits.max_resonance", self.max_resonance, 0.0, f32::MAX)?;
        check_range("limits.max_drive", self.max_drive, 0.0, f32::MAX)
    }

    /// Upper cutoff bound at `sample_rate`, kept clear of Nyquist.
    pub fn cutoff_ceiling(&self, sample_rate: f32) -> f32 {
        self.max_cutoff_hz.min(crate::NYQUIST_MARGIN * sample_rate)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct LadderConfig {
    pub filter_type: FilterType,
    pub cutoff_hz: f32,
    pub resonance: f32,
    pub drive: f32,
    pub aux: f32,
    pub nonlinear: bool,
    pub noise_level: f32,
    pub noise_seed: u64,
    pub limits: LadderLimits,
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            filter_type: MoogLadderFilter::TYPES[0],
            cutoff_hz: CUTOFF_C4,
            resonance: 0.0,
            drive: DRIVE_DEFAULT,
            aux: 0.0,
            nonlinear: true,
            noise_level: DEFAULT_NOISE_LEVEL,
            noise_seed: NOISE_SEED_DEFAULT,
            limits: LadderLimits::default(),
        }
    }
}

impl LadderConfig {
    pub fn with_type(mut self, filter_type: FilterType) -> Self {
        self.filter_type = filter_type;
        self
    }

    pub fn with_cutoff(mut self, cutoff_hz: f32) -> Self {
        self.cutoff_hz = cutoff_hz;
        self
    }

    pub fn with_resonance(mut self, resonance: f32) -> Self {
        self.resonance = resonance;
        self
    }

    pub fn with_drive(mut self, drive: f32) -> Self {
        self.drive = drive;
        self
    }

    pub fn with_nonlinear(mut self, nonlinear: bool) -> Self {
        self.nonlinear = nonlinear;
        self
    }

    pub fn with_noise(mut self, level: f32, seed: u64) -> Self {
        self.noise_level = level;
        self.noise_seed = seed;
        self
    }

    /// Position of `filter_type` in the host mode list, if the ladder can
    /// synthesise it.
    pub fn mode_index(&self) -> Option<usize> {
        MoogLadderFilter::TYPES
            .iter()
            .position(|t| *t == self.filter_type)
    }

    /// Checks the config is something a node can start from. Parameter
    /// values outside the limits are accepted here; the node clamps them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.limits.validate()?;

        if self.mode_index().is_none() {
            return Err(ConfigError::NotMixable(self.filter_type));
        }

        check_finite("cutoff_hz", self.cutoff_hz)?;
        check_finite("resonance", self.resonance)?;
        check_finite("drive", self.drive)?;
        check_finite("aux", self.aux)?;
        check_finite("noise_level", self.noise_level)?;
        check_range("noise_level", self.noise_level, 0.0, 1.0)
    }
}

/// Rejects rates the prewarp cannot use.
pub fn validate_sample_rate(sample_rate: f32) -> Result<(), ConfigError> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSampleRate(sample_rate))
    }
}

fn check_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
