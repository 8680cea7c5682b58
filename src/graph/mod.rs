//! Host-facing wrappers around the filter core.
//!
//! The DSP types trust their caller. Nodes here are that caller: they clamp
//! parameters, inject the noise floor and sanitise output, behind a small
//! trait a host can drive without knowing which processor it holds.

/// Clamping, noise-injecting adapter around `MoogLadderFilter`.
pub mod ladder;
/// Core traits shared by all graph nodes.
pub mod node;

pub use ladder::{LadderNode, LadderParam};
pub use node::{GraphNode, Modulatable, RenderCtx};
