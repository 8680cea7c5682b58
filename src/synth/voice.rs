use crate::graph::{
    ladder::LadderNode,
    node::{GraphNode, RenderCtx},
};
use crate::synth::message::MessageReceiver;

/// One filter channel: a `LadderNode` plus the queue that controls it.
///
/// Pending messages are applied at block boundaries, so a parameter change
/// lands on the first sample of the next `render` call.
pub struct FilterVoice<R: MessageReceiver> {
    node: LadderNode,
    receiver: R,
}

impl<R: MessageReceiver> FilterVoice<R> {
    pub fn new(node: LadderNode, receiver: R) -> Self {
        Self { node, receiver }
    }

    /// Apply every queued message. Returns how many were handled.
    pub fn drain_messages(&mut self) -> usize {
        let mut handled = 0;
        while let Some(message) = self.receiver.pop() {
            self.node.handle(message);
            handled += 1;
        }
        handled
    }

    /// Drain pending messages, then filter `buffer` in place.
    pub fn render(&mut self, buffer: &mut [f32]) {
        self.drain_messages();
        self.node.render_block(buffer);
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.node.configure(&RenderCtx::new(sample_rate));
    }

    pub fn reset(&mut self) {
        self.node.reset();
    }

    pub fn node(&self) -> &LadderNode {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut LadderNode {
        &mut self.node
    }
}
