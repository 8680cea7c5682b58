//! Topology-preserving transform (TPT) one-pole filter.
//!
//! The analog integrator is discretised with the trapezoidal rule, which
//! leaves a single state variable `z1` and a delay-free path through the
//! gain `G = g / (1 + g)`:
//!
//! ```text
//!   v  = (x - z1) · G
//!   lp = v + z1
//!   hp = x - lp
//!   z1 = v + lp
//! ```
//!
//! On its own the stage is a 6 dB/oct lowpass or highpass. Inside the ladder
//! it is always a lowpass, and the ladder reads [`OnePoleFilter::feedback_contribution`]
//! (the part of the next output already fixed by `z1`) so the resonance loop
//! can be solved before any stage runs.

use super::filter::{prewarp, FilterType, CUTOFF_DEFAULT, Q_DEFAULT};

#[derive(Debug, Clone)]
pub struct OnePoleFilter {
    filter_type: FilterType,
    cutoff: f32,
    q: f32,
    aux: f32,
    sample_rate: f32,

    feed_forward: f32,
    beta: f32,
    pre_gain: f32,
    feedback_in: f32,
    feedback_out: f32,
    input_gain: f32,
    feedback: f32,

    z1: f32, // integrator state
}

impl Default for OnePoleFilter {
    fn default() -> Self {
        Self::new(FilterType::Lpf1)
    }
}

impl OnePoleFilter {
    pub fn new(filter_type: FilterType) -> Self {
        Self {
            filter_type,
            cutoff: CUTOFF_DEFAULT,
            q: Q_DEFAULT,
            aux: 0.0,
            sample_rate: 1.0,
            feed_forward: 1.0,
            beta: 0.0,
            pre_gain: 1.0,
            feedback_in: 0.0,
            feedback_out: 0.0,
            input_gain: 1.0,
            feedback: 0.0,
            z1: 0.0,
        }
    }

    pub fn lowpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        let mut filter = Self::new(FilterType::Lpf1);
        filter.set_parameters(cutoff_hz, 0.0, 0.0, sample_rate);
        filter
    }

    pub fn highpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        let mut filter = Self::new(FilterType::Hpf1);
        filter.set_parameters(cutoff_hz, 0.0, 0.0, sample_rate);
        filter
    }

    /// Recompute the feed-forward gain. `q` and `aux` are stored only; a
    /// single pole has no resonance.
    pub fn set_parameters(&mut self, cutoff_hz: f32, q: f32, aux: f32, sample_rate: f32) {
        debug_assert!(sample_rate > 0.0, "sample rate must be positive");
        debug_assert!(
            cutoff_hz > 0.0 && cutoff_hz < sample_rate * 0.5,
            "cutoff {cutoff_hz} Hz outside (0, {}) Hz",
            sample_rate * 0.5
        );

        self.cutoff = cutoff_hz;
        self.q = q;
        self.aux = aux;
        self.sample_rate = sample_rate;
        self.calc_coeffs();
    }

    fn calc_coeffs(&mut self) {
        let g = prewarp(self.cutoff, self.sample_rate);
        self.feed_forward = g / (1.0 + g);
    }

    /// Run one sample. Types other than LPF1/HPF1 pass the input through.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        if !matches!(self.filter_type, FilterType::Lpf1 | FilterType::Hpf1) {
            return input;
        }

        let xn = input * self.pre_gain + self.feedback + self.feedback_out * self.feedback_contribution();
        let vn = (self.input_gain * xn - self.z1) * self.feed_forward;

        let lp = vn + self.z1;
        let hp = xn - lp;
        self.z1 = vn + lp;

        match self.filter_type {
            FilterType::Lpf1 => lp,
            _ => hp,
        }
    }

    /// Contribution of the current state to this stage's next output,
    /// independent of the next input.
    #[inline]
    pub fn feedback_contribution(&self) -> f32 {
        self.beta * (self.z1 + self.feedback * self.feedback_in)
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    pub fn set_type(&mut self, filter_type: FilterType) {
        self.filter_type = filter_type;
    }

    pub fn set_feed_forward(&mut self, feed_forward: f32) {
        self.feed_forward = feed_forward;
    }

    pub fn set_beta(&mut self, beta: f32) {
        self.beta = beta;
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback;
    }

    pub fn set_pre_gain(&mut self, pre_gain: f32) {
        self.pre_gain = pre_gain;
    }

    /// Clears `z1` and the feedback sample. Coefficients are kept.
    pub fn reset(&mut self) {
        self.z1 = 0.0;
        self.feedback = 0.0;
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    pub fn q(&self) -> f32 {
        self.q
    }

    pub fn aux(&self) -> f32 {
        self.aux
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn feed_forward(&self) -> f32 {
        self.feed_forward
    }

    pub fn beta(&self) -> f32 {
        self.beta
    }

    pub fn state(&self) -> f32 {
        self.z1
    }
}
