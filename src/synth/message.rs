#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::dsp::FilterType;

/// Control change sent from a UI or sequencer thread to the audio thread.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LadderMessage {
    SetType(FilterType),
    /// Index into `MoogLadderFilter::types()`, clamped on arrival.
    SetMode(i32),
    SetCutoff(f32),
    SetResonance(f32),
    SetDrive(f32),
    SetAux(f32),
    SetNonLinear(bool),
    Reset,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<LadderMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<LadderMessage> {
    fn pop(&mut self) -> Option<LadderMessage> {
        Consumer::pop(self).ok()
    }
}

/// Receiver that never yields, for voices driven only through direct calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMessages;

impl MessageReceiver for NoMessages {
    fn pop(&mut self) -> Option<LadderMessage> {
        None
    }
}
