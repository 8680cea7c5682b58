use super::filter::{prewarp, FilterType, CUTOFF_DEFAULT, Q_DEFAULT};
use super::one_pole::OnePoleFilter;
use super::shaper::saturate;

/*
Zero-Delay-Feedback Ladder
==========================

Four identical one-pole lowpass stages in series, with the last stage's
output fed back (inverted, scaled by k) to the input:

            ┌──────────────────── k ◄──────────────────────┐
            ▼                                               │
   x ──► (x - k·y) ──U──► [LP1] ─f1─► [LP2] ─f2─► [LP3] ─f3─► [LP4] ─f4─► y

Vocabulary
----------

  G       Delay-free gain of one TPT stage, g / (1 + g). The same for all
          four stages because they share one cutoff.

  beta    How much of a stage's stored state reaches the ladder output
          without passing through another stage's delay-free path:
          G³, G², G, 1 for stages 1..4, each divided by (1 + g).

  sigma   Sum of the four stages' `feedback_contribution()`. The ladder
          output is y = gamma·U + sigma, where sigma depends only on
          stored state.

  gamma   G⁴, the delay-free gain from U to the ladder output.

  alpha   1 / (1 + k·gamma).

The Implicit Loop
-----------------

The cascade input U depends on y, which depends on U in the same sample:

    U = x - k·y = x - k·(gamma·U + sigma)

Collecting U on one side:

    U = (x - k·sigma) / (1 + k·gamma) = (x - k·sigma) · alpha

So every sample costs one sum and one multiply to resolve the loop; no
iteration, no extra unit delay in the feedback path.

Resonance
---------

    k = 4·(Q - 1) / 9

Q = 1 gives k = 0 (no feedback). Q = 10 gives k = 4, where the loop gain at
the cutoff reaches unity and the ladder starts to self-oscillate. Q below 1
makes k negative, which flattens the knee. With nonlinear processing on, U
passes through tanh(saturation·U), which bounds the oscillation.

Pole Mixing
-----------

Highpass and bandpass responses come from weighting the tap outputs rather
than rewiring stages (Oberheim Xpander style):

    y = A·U + B·f1 + C·f2 + D·f3 + E·f4

The weights are the binomial expansions of (1 - H)ⁿ·Hᵐ, e.g.
HPF4 = (1 - H)⁴ = 1, -4, 6, -4, 1.
*/

/// Oberheim pole-mixing weights over `{U, f1, f2, f3, f4}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoleMix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
}

impl PoleMix {
    pub const LPF4: PoleMix = PoleMix::new(0.0, 0.0, 0.0, 0.0, 1.0);
    pub const LPF2: PoleMix = PoleMix::new(0.0, 0.0, 1.0, 0.0, 0.0);
    pub const BPF4: PoleMix = PoleMix::new(0.0, 0.0, 4.0, -8.0, 4.0);
    pub const BPF2: PoleMix = PoleMix::new(0.0, 2.0, -2.0, 0.0, 0.0);
    pub const HPF4: PoleMix = PoleMix::new(1.0, -4.0, 6.0, -4.0, 1.0);
    pub const HPF2: PoleMix = PoleMix::new(1.0, -2.0, 1.0, 0.0, 0.0);

    pub const fn new(a: f32, b: f32, c: f32, d: f32, e: f32) -> Self {
        Self { a, b, c, d, e }
    }

    /// Weights for a response type. Types the ladder cannot mix fall back
    /// to LPF4.
    pub fn for_type(filter_type: FilterType) -> Self {
        match filter_type {
            FilterType::Lpf4 => Self::LPF4,
            FilterType::Lpf2 => Self::LPF2,
            FilterType::Bpf4 => Self::BPF4,
            FilterType::Bpf2 => Self::BPF2,
            FilterType::Hpf4 => Self::HPF4,
            FilterType::Hpf2 => Self::HPF2,
            _ => Self::LPF4,
        }
    }

    #[inline]
    pub fn apply(&self, taps: &LadderOutputs) -> f32 {
        self.a * taps.input
            + self.b * taps.stage1
            + self.c * taps.stage2
            + self.d * taps.stage3
            + self.e * taps.stage4
    }
}

/// Tap values for one sample: the resolved cascade input and each stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LadderOutputs {
    pub input: f32,
    pub stage1: f32,
    pub stage2: f32,
    pub stage3: f32,
    pub stage4: f32,
}

#[derive(Debug, Clone)]
pub struct MoogLadderFilter {
    stages: [OnePoleFilter; 4],
    filter_type: FilterType,

    cutoff: f32,
    q: f32,
    saturation: f32,
    aux: f32,
    sample_rate: f32,

    k: f32,
    gamma: f32,
    alpha: f32,
    mix: PoleMix,
    use_nonlinear: bool,
}

impl Default for MoogLadderFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl MoogLadderFilter {
    /// Types the ladder synthesises, in host mode order.
    pub const TYPES: [FilterType; 6] = [
        FilterType::Lpf2,
        FilterType::Lpf4,
        FilterType::Hpf2,
        FilterType::Hpf4,
        FilterType::Bpf2,
        FilterType::Bpf4,
    ];

    pub fn new() -> Self {
        Self {
            stages: [
                OnePoleFilter::new(FilterType::Lpf1),
                OnePoleFilter::new(FilterType::Lpf1),
                OnePoleFilter::new(FilterType::Lpf1),
                OnePoleFilter::new(FilterType::Lpf1),
            ],
            filter_type: FilterType::Lpf4,
            cutoff: CUTOFF_DEFAULT,
            q: Q_DEFAULT,
            saturation: 1.0,
            aux: 0.0,
            // 0 Hz never equals a valid rate, so the first set_parameters always computes
            sample_rate: 0.0,
            k: 0.0,
            gamma: 0.0,
            alpha: 1.0,
            mix: PoleMix::LPF4,
            use_nonlinear: false,
        }
    }

    pub fn with_type(filter_type: FilterType) -> Self {
        let mut filter = Self::new();
        filter.set_type(filter_type);
        filter
    }

    pub fn types() -> &'static [FilterType] {
        &Self::TYPES
    }

    pub fn set_type(&mut self, filter_type: FilterType) {
        self.filter_type = filter_type;
        self.calc_coeffs();
    }

    pub fn set_use_nonlinear_processing(&mut self, enabled: bool) {
        self.use_nonlinear = enabled;
    }

    /// Apply new parameters. Returns early, touching nothing, when cutoff,
    /// Q, saturation and sample rate all equal the last applied values.
    /// `aux` is only picked up alongside a change; see [`Self::set_aux`].
    pub fn set_parameters(
        &mut self,
        cutoff_hz: f32,
        q: f32,
        saturation: f32,
        aux: f32,
        sample_rate: f32,
    ) {
        if cutoff_hz == self.cutoff
            && q == self.q
            && saturation == self.saturation
            && sample_rate == self.sample_rate
        {
            return;
        }

        self.cutoff = cutoff_hz;
        self.aux = aux;
        self.q = q;
        self.sample_rate = sample_rate;
        self.saturation = saturation;
        for stage in self.stages.iter_mut() {
            stage.set_parameters(cutoff_hz, 0.0, 0.0, sample_rate);
        }

        self.k = 4.0 * (q - 1.0) / 9.0;
        self.calc_coeffs();
    }

    /// Input pre-boost `1 + aux·k`. Read per sample, so no recompute.
    pub fn set_aux(&mut self, aux: f32) {
        self.aux = aux;
    }

    fn calc_coeffs(&mut self) {
        self.mix = PoleMix::for_type(self.filter_type);
        if self.sample_rate <= 0.0 {
            // not configured yet
            return;
        }

        let g = prewarp(self.cutoff, self.sample_rate);
        let big_g = g / (1.0 + g);
        let one_plus_g = 1.0 + g;

        for stage in self.stages.iter_mut() {
            stage.set_feed_forward(big_g);
        }

        self.stages[0].set_beta(big_g * big_g * big_g / one_plus_g);
        self.stages[1].set_beta(big_g * big_g / one_plus_g);
        self.stages[2].set_beta(big_g / one_plus_g);
        self.stages[3].set_beta(1.0 / one_plus_g);

        self.gamma = big_g * big_g * big_g * big_g;
        self.alpha = 1.0 / (1.0 + self.k * self.gamma);
    }

    /// True for the types `process` passes straight through.
    #[inline]
    pub fn is_bypassed(&self) -> bool {
        matches!(
            self.filter_type,
            FilterType::Bsf2 | FilterType::Lpf1 | FilterType::Hpf1
        )
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        if self.is_bypassed() {
            return input;
        }
        let taps = self.next_sample(input);
        self.mix.apply(&taps)
    }

    /// Advance the cascade one sample and return every tap, unmixed.
    #[inline]
    pub fn next_sample(&mut self, input: f32) -> LadderOutputs {
        let sigma = self.stages[0].feedback_contribution()
            + self.stages[1].feedback_contribution()
            + self.stages[2].feedback_contribution()
            + self.stages[3].feedback_contribution();

        let xn = input * (1.0 + self.aux * self.k);
        let mut u = (xn - self.k * sigma) * self.alpha;

        if self.use_nonlinear {
            u = saturate(self.saturation * u);
        }

        let f1 = self.stages[0].process(u);
        let f2 = self.stages[1].process(f1);
        let f3 = self.stages[2].process(f2);
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

    /// Clears the four stage states. Coefficients and type are kept.
    pub fn reset(&mut self) {
        for stage in self.stages.iter_mut() {
            stage.reset();
        }
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    pub fn uses_nonlinear_processing(&self) -> bool {
        self.use_nonlinear
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    pub fn q(&self) -> f32 {
        self.q
    }

    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    pub fn aux(&self) -> f32 {
        self.aux
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn k(&self) -> f32 {
        self.k
    }

    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn mix(&self) -> PoleMix {
        self.mix
    }

    pub fn stages(&self) -> &[OnePoleFilter; 4] {
        &self.stages
    }

    pub fn stage_states(&self) -> [f32; 4] {
        [
            self.stages[0].state(),
            self.stages[1].state(),
            self.stages[2].state(),
            self.stages[3].state(),
        ]
    }
}
