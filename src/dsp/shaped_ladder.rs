//! Ladder with per-stage cutoffs, a blendable feedback source and a shaper at
//! every node of the loop.
//!
//! The loop is solved the same way as [`MoogLadderFilter`](super::MoogLadderFilter),
//! with the betas generalised to unequal stages:
//!
//! ```text
//!   beta_i = (G_{i+1} · … · G_4) / (1 + g_i)
//!   gamma  = G_1 · G_2 · G_3 · G_4
//! ```
//!
//! Per sample:
//!
//! ```text
//!   sigma = lerp(k · Σ feedback_contribution_i, y[n-1], feedback_path)
//!   sigma = resonance_shaper(sigma)
//!   xn    = input_shaper(x) · (1 + aux·k)
//!   U     = (xn - sigma) · alpha
//!   U     = stage_shaper_1(U)
//!   f_i   = stage_shaper_{i+1}(stage_i(f_{i-1}))  with f_0 = U, f4 unshaped
//!   y     = mix(U, f1, f2, f3, f4)
//! ```
//!
//! With equal cutoffs, `Linear` shapers and `feedback_path = 0` it produces
//! the same samples as the plain ladder's LPF4.

use super::filter::{prewarp, FilterType, CUTOFF_DEFAULT, Q_DEFAULT};
use super::ladder::{LadderOutputs, PoleMix};
use super::one_pole::OnePoleFilter;
use super::shaper::Shaper;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which curve sits at each node of the loop.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShaperSet {
    pub input: Shaper,
    pub resonance: Shaper,
    pub stages: [Shaper; 4],
}

impl ShaperSet {
    pub const LINEAR: ShaperSet = ShaperSet {
        input: Shaper::Linear,
        resonance: Shaper::Linear,
        stages: [Shaper::Linear; 4],
    };

    /// The same curve everywhere.
    pub fn uniform(shaper: Shaper) -> Self {
        Self {
            input: shaper,
            resonance: shaper,
            stages: [shaper; 4],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShapedLadder {
    stages: [OnePoleFilter; 4],
    cutoffs: [f32; 4],
    q: f32,
    saturation: f32,
    aux: f32,
    sample_rate: f32,

    k: f32,
    gamma: f32,
    alpha: f32,
    mix: PoleMix,
    shapers: ShaperSet,
    feedback_path: f32,

    z1: f32, // previous output
}

impl Default for ShapedLadder {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapedLadder {
    pub fn new() -> Self {
        Self {
            stages: Default::default(),
            cutoffs: [CUTOFF_DEFAULT; 4],
            q: Q_DEFAULT,
            saturation: 1.0,
            aux: 0.0,
            sample_rate: 0.0,
            k: 0.0,
            gamma: 0.0,
            alpha: 1.0,
            mix: PoleMix::LPF4,
            shapers: ShaperSet::LINEAR,
            feedback_path: 0.0,
            z1: 0.0,
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.calc_coeffs();
    }

    /// One cutoff for all four stages. Always recomputes.
    pub fn set_parameters(
        &mut self,
        cutoff_hz: f32,
        q: f32,
        saturation: f32,
        aux: f32,
        sample_rate: f32,
    ) {
        self.sample_rate = sample_rate;
        self.aux = aux;
        self.set_stage_cutoffs([cutoff_hz; 4], q, saturation);
    }

    /// Independent cutoffs, first stage first.
    pub fn set_stage_cutoffs(&mut self, cutoffs_hz: [f32; 4], q: f32, saturation: f32) {
        self.cutoffs = cutoffs_hz;
        self.q = q;
        self.saturation = saturation;
        self.calc_coeffs();
    }

    pub fn set_aux(&mut self, aux: f32) {
        self.aux = aux;
    }

    pub fn set_mix(&mut self, mix: PoleMix) {
        self.mix = mix;
    }

    pub fn set_type(&mut self, filter_type: FilterType) {
        self.mix = PoleMix::for_type(filter_type);
    }

    /// Blend of the feedback source: 0 takes the summed stage states, 1 the
    /// previous output sample.
    pub fn set_feedback_path(&mut self, path: f32) {
        self.feedback_path = path.clamp(0.0, 1.0);
    }

    pub fn set_shapers(&mut self, shapers: ShaperSet) {
        self.shapers = shapers;
    }

    fn calc_coeffs(&mut self) {
        self.k = 4.0 * (self.q - 1.0) / 9.0;
        if self.sample_rate <= 0.0 {
            return;
        }

        let mut downstream = 1.0;
        for (stage, &cutoff) in self.stages.iter_mut().zip(self.cutoffs.iter()).rev() {
            stage.set_parameters(cutoff, 0.0, 0.0, self.sample_rate);
            let g = prewarp(cutoff, self.sample_rate);
            stage.set_beta(downstream / (1.0 + g));
            downstream *= stage.feed_forward();
        }

        self.gamma = downstream;
        self.alpha = 1.0 / (1.0 + self.k * self.gamma);
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let taps = self.next_sample(input);
        self.z1 = self.mix.apply(&taps);
        self.z1
    }

    #[inline]
    pub fn next_sample(&mut self, input: f32) -> LadderOutputs {
        let drive = self.saturation;

        let mut sigma = self.stages[0].feedback_contribution()
            + self.stages[1].feedback_contribution()
            + self.stages[2].feedback_contribution()
            + self.stages[3].feedback_contribution();
        sigma *= self.k;
        sigma += self.feedback_path * (self.z1 - sigma);
        sigma = self.shapers.resonance.apply(sigma, drive);

        let xn = self.shapers.input.apply(input, drive) * (1.0 + self.aux * self.k);
        let u = (xn - sigma) * self.alpha;

        // each shaped value feeds both the next stage and the mix
        let u = self.shapers.stages[0].apply(u, drive);
        let f1 = self.shapers.stages[1].apply(self.stages[0].process(u), drive);
        let f2 = self.shapers.stages[2].apply(self.stages[1].process(f1), drive);
        let f3 = self.shapers.stages[3].apply(self.stages[2].process(f2), drive);
        let f4 = self.stages[3].process(f3);

        LadderOutputs {
            input: u,
            stage1: f1,
            stage2: f2,
            stage3: f3,
            stage4: f4,
        }
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Clears the stages and the stored output sample.
    pub fn reset(&mut self) {
        for stage in self.stages.iter_mut() {
            stage.reset();
        }
        self.z1 = 0.0;
    }

    pub fn cutoffs(&self) -> [f32; 4] {
        self.cutoffs
    }

    pub fn k(&self) -> f32 {
        self.k
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    pub fn mix(&self) -> PoleMix {
        self.mix
    }

    pub fn shapers(&self) -> ShaperSet {
        self.shapers
    }

    pub fn feedback_path(&self) -> f32 {
        self.feedback_path
    }

    pub fn stages(&self) -> &[OnePoleFilter; 4] {
        &self.stages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::MoogLadderFilter;

    fn test_signal(len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| if i == 0 { 1.0 } else { ((i * 13 % 29) as f32 / 29.0 - 0.5) * 0.2 })
            .collect()
    }

    #[test]
    fn test_linear_equal_cutoffs_match_plain_ladder() {
        for q in [0.5, 1.0, 4.0, 9.0] {
            let mut plain = MoogLadderFilter::with_type(FilterType::Lpf4);
            plain.set_parameters(1_200.0, q, 1.0, 0.25, 48_000.0);
            let mut shaped = ShapedLadder::new();
            shaped.set_parameters(1_200.0, q, 1.0, 0.25, 48_000.0);

            assert_eq!(shaped.alpha(), plain.alpha());
            assert_eq!(shaped.gamma(), plain.gamma());
            for (a, b) in shaped.stages().iter().zip(plain.stages()) {
                assert_eq!(a.beta(), b.beta());
            }

            for x in test_signal(1_024) {
                assert_eq!(shaped.process(x), plain.process(x), "q = {q}");
            }
        }
    }

    #[test]
    fn test_k_is_ready_before_alpha() {
        // A single call must leave alpha consistent with the new Q.
        let mut shaped = ShapedLadder::new();
        shaped.set_parameters(1_000.0, 7.0, 1.0, 0.0, 44_100.0);
        assert_eq!(shaped.alpha(), 1.0 / (1.0 + shaped.k() * shaped.gamma()));
        assert!(shaped.alpha() < 1.0);
    }

    #[test]
    fn test_stage_cutoffs_generalise_betas() {
        let cutoffs = [500.0, 1_000.0, 2_000.0, 4_000.0];
        let sr = 48_000.0;
        let mut shaped = ShapedLadder::new();
        shaped.set_sample_rate(sr);
        shaped.set_stage_cutoffs(cutoffs, 2.0, 1.0);

        let gs: Vec<f32> = cutoffs.iter().map(|&fc| prewarp(fc, sr)).collect();
        let big: Vec<f32> = gs.iter().map(|g| g / (1.0 + g)).collect();

        let betas: Vec<f32> = shaped.stages().iter().map(|s| s.beta()).collect();
        assert_eq!(betas[3], 1.0 / (1.0 + gs[3]));
        assert!((betas[0] - big[3] * big[2] * big[1] / (1.0 + gs[0])).abs() < 1e-7);
        assert!((shaped.gamma() - big.iter().product::<f32>()).abs() < 1e-7);
        assert_eq!(shaped.cutoffs(), cutoffs);
    }

    #[test]
    fn test_output_feedback_path_stays_bounded() {
        let mut shaped = ShapedLadder::new();
        shaped.set_parameters(800.0, 6.0, 1.0, 0.0, 44_100.0);
        shaped.set_feedback_path(1.0);
        shaped.set_shapers(ShaperSet::uniform(Shaper::Tanh));

        let mut buffer = test_signal(8_192);
        shaped.render(&mut buffer);
        assert!(buffer.iter().all(|s| s.is_finite() && s.abs() < 10.0));
    }

    #[test]
    fn test_feedback_path_is_clamped() {
        let mut shaped = ShapedLadder::new();
        shaped.set_feedback_path(3.0);
        assert_eq!(shaped.feedback_path(), 1.0);
        shaped.set_feedback_path(-1.0);
        assert_eq!(shaped.feedback_path(), 0.0);
    }

    #[test]
    fn test_mix_sees_shaped_taps() {
        let mut shaped = ShapedLadder::new();
        shaped.set_parameters(1_000.0, 3.0, 1.0, 0.0, 48_000.0);
        shaped.set_type(FilterType::Hpf4);
        shaped.set_shapers(ShaperSet {
            stages: [Shaper::Tanh; 4],
            ..ShaperSet::LINEAR
        });

        // from rest the feedback sum is zero, so the raw U is the scaled input
        let raw_u = 5.0 * shaped.alpha();
        let shaped_u = Shaper::Tanh.apply(raw_u, 1.0);
        let mut first_stage = shaped.stages()[0].clone();
        let shaped_f1 = Shaper::Tanh.apply(first_stage.process(shaped_u), 1.0);

        let taps = shaped.clone().next_sample(5.0);
        assert_eq!(taps.input, shaped_u);
        assert_eq!(taps.stage1, shaped_f1);
        assert!(taps.input.abs() < 1.0);

        let y = shaped.process(5.0);
        assert_eq!(y, PoleMix::HPF4.apply(&taps));
        assert!((y - raw_u).abs() > 1.0);
    }

    #[test]
    fn test_shapers_change_the_output() {
        let mut linear = ShapedLadder::new();
        linear.set_parameters(1_000.0, 3.0, 1.0, 0.0, 48_000.0);
        let mut driven = linear.clone();
        driven.set_shapers(ShaperSet::uniform(Shaper::Tanh2));

        let mut a = vec![0.9; 256];
        let mut b = a.clone();
        linear.render(&mut a);
        driven.render(&mut b);
        assert_ne!(a, b);
    }

    #[test]
    fn test_reset_clears_output_memory() {
        let mut shaped = ShapedLadder::new();
        shaped.set_parameters(1_000.0, 3.0, 1.0, 0.0, 48_000.0);
        shaped.set_feedback_path(0.5);
        let mut buffer = vec![1.0; 64];
        shaped.render(&mut buffer);
        shaped.reset();

        let mut fresh = ShapedLadder::new();
        fresh.set_parameters(1_000.0, 3.0, 1.0, 0.0, 48_000.0);
        fresh.set_feedback_path(0.5);
        for x in test_signal(64) {
            assert_eq!(shaped.process(x), fresh.process(x));
        }
    }
}
