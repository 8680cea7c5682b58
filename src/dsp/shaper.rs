//! Waveshaping inside the ladder loop.
//!
//! The plain ladder only ever uses `tanh` on the resolved cascade input. The
//! shaped ladder can place a curve at the input, in the resonance path and in
//! front of every stage, each one of:
//!
//! ```text
//!   Linear   f(x) = x                       (no clamp, no drive)
//!   Tanh     f(x) = tanh(drive·x)
//!   Tanh2    f(x) = tanh(2·drive·x)
//!   Cos      f(x) = cos(π·drive·x)
//! ```
//!
//! Every curve except `Linear` first clamps its argument to ±1.2, so a runaway
//! loop saturates instead of producing inf.

use std::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Clamp applied before every non-linear curve.
pub const SHAPER_RANGE: f32 = 1.2;

/// Hyperbolic-tangent saturation used by the plain ladder.
#[inline]
pub fn saturate(x: f32) -> f32 {
    x.tanh()
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shaper {
    #[default]
    Linear,
    Tanh,
    Tanh2,
    Cos,
}

impl Shaper {
    pub const ALL: [Shaper; 4] = [Shaper::Linear, Shaper::Tanh, Shaper::Tanh2, Shaper::Cos];

    #[inline]
    pub fn apply(self, x: f32, drive: f32) -> f32 {
        if self == Shaper::Linear {
            return x;
        }
        let x = x.clamp(-SHAPER_RANGE, SHAPER_RANGE) * drive;
        match self {
            Shaper::Linear => x,
            Shaper::Tanh => saturate(x),
            Shaper::Tanh2 => saturate(2.0 * x),
            Shaper::Cos => (PI * x).cos(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Shaper::Linear => "linear",
            Shaper::Tanh => "tanh",
            Shaper::Tanh2 => "tanh2",
            Shaper::Cos => "cos",
        }
    }
}
