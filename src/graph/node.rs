/// Context handed to nodes when the host (re)configures them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCtx {
    pub sample_rate: f32,
}

impl RenderCtx {
    pub fn new(sample_rate: f32) -> Self {
        Self { sample_rate }
    }
}

/// Trait for nodes that support parameter modulation
pub trait Modulatable: Send {
    type Param: Copy + Send;

    fn get_param(&self, param: Self::Param) -> f32;

    /// Set the base value of `param` and apply `base + modulation`.
    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32);
}

/// Audio-thread interface between a host and a processor.
///
/// `configure` may recompute coefficients but must not allocate. `process`
/// and `render_block` never block, allocate or fail.
pub trait GraphNode: Send {
    fn configure(&mut self, ctx: &RenderCtx);

    fn process(&mut self, frame: f32) -> f32;

    /// Filter `buffer` in place.
    fn render_block(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Clear signal state. Parameters are kept.
    fn reset(&mut self);
}

/// Allow boxed graph nodes to be used as graph nodes (for dynamic dispatch)
impl GraphNode for Box<dyn GraphNode> {
    fn configure(&mut self, ctx: &RenderCtx) {
        (**self).configure(ctx)
    }

    fn process(&mut self, frame: f32) -> f32 {
        (**self).process(frame)
    }

    fn render_block(&mut self, buffer: &mut [f32]) {
        (**self).render_block(buffer)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
