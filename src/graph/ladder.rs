use crate::{
    config::{validate_sample_rate, ConfigError, LadderConfig, LadderLimits},
    dsp::{FilterType, MoogLadderFilter, NoiseSource},
    graph::node::{GraphNode, Modulatable, RenderCtx},
    synth::message::LadderMessage,
};

/*
Ladder Host Adapter
===================

`MoogLadderFilter` trusts its caller: it never clamps, never checks for NaN
and never injects anything into its input. `LadderNode` is the caller that
makes those promises, so a host (plugin wrapper, voice, offline renderer) can
feed it raw control values.

What the node guarantees:
-------------------------

Cutoff:     clamped to [min_cutoff, min(max_cutoff, 0.49 · sample_rate)].
            The prewarp tan() has a pole at Nyquist; 0.49 keeps clear of it
            at every sample rate.

Resonance:  clamped to [0, max_resonance]. It is handed to the ladder as Q,
            so 10 is the self-oscillation threshold (k = 4).

Drive:      clamped to [0, max_drive]. Becomes the ladder's saturation, the
            gain in front of tanh() when nonlinear processing is on.

Mode:       an index into MoogLadderFilter::types(), clamped to the list.
            0 = LPF2, 1 = LPF4, 2 = HPF2, 3 = HPF4, 4 = BPF2, 5 = BPF4.

Noise:      a seeded floor (default ±1e-6, about -120 dB) is added to every
            input sample. A resonant ladder fed exact silence stays silent
            forever; the floor gives it something to ring on.

Output:     a non-finite sample is replaced with 0 and the stages are
            cleared, so one bad input cannot latch the voice into NaN.

Example usage:
  let mut node = LadderNode::new(LadderConfig::default().with_resonance(4.0), 48_000.0)?;
  node.set_mode(1);                 // LPF4
  node.render_block(&mut buffer);

  // Envelope sweep on top of a base cutoff
  node.apply_modulation(LadderParam::Cutoff, 400.0, env * 3_000.0);
*/

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LadderParam {
    Cutoff,
    Resonance,
    Drive,
}

#[derive(Debug, Clone)]
pub struct LadderNode {
    filter: MoogLadderFilter,
    noise: NoiseSource,
    limits: LadderLimits,
    sample_rate: f32,

    base_cutoff: f32,
    base_resonance: f32,
    base_drive: f32,
    cutoff: f32,
    resonance: f32,
    drive: f32,
    mode: usize,
}

impl LadderNode {
    pub fn new(config: LadderConfig, sample_rate: f32) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate().and(validate_sample_rate(sample_rate)) {
            log::warn!("rejected ladder config: {err}");
            return Err(err);
        }

        let mode = config
            .mode_index()
            .ok_or(ConfigError::NotMixable(config.filter_type))?;

        let mut filter = MoogLadderFilter::with_type(config.filter_type);
        filter.set_use_nonlinear_processing(config.nonlinear);

        let mut node = Self {
            filter,
            noise: NoiseSource::with_level(config.noise_seed, config.noise_level),
            limits: config.limits,
            sample_rate,
            base_cutoff: config.cutoff_hz,
            base_resonance: config.resonance,
            base_drive: config.drive,
            cutoff: 0.0,
            resonance: 0.0,
            drive: 0.0,
            mode,
        };
        node.update(config.cutoff_hz, config.resonance, config.drive);
        node.filter.set_aux(config.aux);

        log::debug!(
            "ladder node: {} at {} Hz, cutoff {} Hz, resonance {}, drive {}",
            node.filter_type(),
            sample_rate,
            node.cutoff,
            node.resonance,
            node.drive
        );
        Ok(node)
    }

    /// Clamp and push the effective values into the filter.
    fn update(&mut self, cutoff_hz: f32, resonance: f32, drive: f32) {
        self.cutoff = cutoff_hz
            .max(self.limits.min_cutoff_hz)
            .min(self.limits.cutoff_ceiling(self.sample_rate));
        self.resonance = resonance.max(0.0).min(self.limits.max_resonance);
        self.drive = drive.max(0.0).min(self.limits.max_drive);

        let aux = self.filter.aux();
        self.filter
            .set_parameters(self.cutoff, self.resonance, self.drive, aux, self.sample_rate);
    }

    fn refresh(&mut self) {
        self.update(self.base_cutoff, self.base_resonance, self.base_drive);
    }

    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.apply_modulation(LadderParam::Cutoff, cutoff_hz, 0.0);
    }

    pub fn set_resonance(&mut self, resonance: f32) {
        self.apply_modulation(LadderParam::Resonance, resonance, 0.0);
    }

    pub fn set_drive(&mut self, drive: f32) {
        self.apply_modulation(LadderParam::Drive, drive, 0.0);
    }

    pub fn set_aux(&mut self, aux: f32) {
        self.filter.set_aux(aux);
    }

    /// Select a response by host mode index, clamped to the mode list.
    pub fn set_mode(&mut self, mode: i32) {
        let last = MoogLadderFilter::TYPES.len() as i32 - 1;
        let mode = mode.clamp(0, last) as usize;
        if mode != self.mode || self.filter.filter_type() != MoogLadderFilter::TYPES[mode] {
            self.mode = mode;
            self.filter.set_type(MoogLadderFilter::TYPES[mode]);
        }
    }

    /// Select a response directly. Types outside the mode list put the
    /// filter into pass-through.
    pub fn set_type(&mut self, filter_type: FilterType) {
        if let Some(mode) = MoogLadderFilter::TYPES.iter().position(|t| *t == filter_type) {
            self.mode = mode;
        }
        self.filter.set_type(filter_type);
    }

    pub fn set_nonlinear(&mut self, enabled: bool) {
        self.filter.set_use_nonlinear_processing(enabled);
    }

    pub fn handle(&mut self, message: LadderMessage) {
        match message {
            LadderMessage::SetType(filter_type) => self.set_type(filter_type),
            LadderMessage::SetMode(mode) => self.set_mode(mode),
            LadderMessage::SetCutoff(hz) => self.set_cutoff(hz),
            LadderMessage::SetResonance(res) => self.set_resonance(res),
            LadderMessage::SetDrive(drive) => self.set_drive(drive),
            LadderMessage::SetAux(aux) => self.set_aux(aux),
            LadderMessage::SetNonLinear(enabled) => self.set_nonlinear(enabled),
            LadderMessage::Reset => self.reset(),
        }
    }

    pub fn filter(&self) -> &MoogLadderFilter {
        &self.filter
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter.filter_type()
    }

    pub fn mode(&self) -> usize {
        self.mode
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Effective cutoff after clamping.
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    pub fn resonance(&self) -> f32 {
        self.resonance
    }

    pub fn drive(&self) -> f32 {
        self.drive
    }

    pub fn noise(&self) -> &NoiseSource {
        &self.noise
    }
}

impl Modulatable for LadderNode {
    type Param = LadderParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            LadderParam::Cutoff => self.base_cutoff,
            LadderParam::Resonance => self.base_resonance,
            LadderParam::Drive => self.base_drive,
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        let final_value = base + modulation;
        let (mut cutoff, mut resonance, mut drive) = (self.cutoff, self.resonance, self.drive);
        match param {
            LadderParam::Cutoff => {
                self.base_cutoff = base;
                cutoff = final_value;
            }
            LadderParam::Resonance => {
                self.base_resonance = base;
                resonance = final_value;
            }
            LadderParam::Drive => {
                self.base_drive = base;
                drive = final_value;
            }
        }
        self.update(cutoff, resonance, drive);
    }
}

impl GraphNode for LadderNode {
    fn configure(&mut self, ctx: &RenderCtx) {
        if let Err(err) = validate_sample_rate(ctx.sample_rate) {
            log::warn!("ladder node keeps {} Hz: {err}", self.sample_rate);
            return;
        }
        if ctx.sample_rate != self.sample_rate {
            self.sample_rate = ctx.sample_rate;
            self.refresh();
        }
    }

    #[inline]
    fn process(&mut self, frame: f32) -> f32 {
        let out = self.filter.process(frame + self.noise.next_sample());
        if out.is_finite() {
            out
        } else {
            self.filter.reset();
            0.0
        }
    }

    /// Clears the stages and restarts the noise sequence.
    fn reset(&mut self) {
        self.filter.reset();
        self.noise.restart();
    }
}
