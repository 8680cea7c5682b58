// Purpose: control-rate plumbing between other threads and the audio thread
// Messages arrive through a lock-free queue and are applied per block

pub mod message;
pub mod voice;

pub use message::{LadderMessage, MessageReceiver, NoMessages};
pub use voice::FilterVoice;
