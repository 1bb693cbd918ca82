// Purpose: host-facing driver. Binds a delay line to the vectors of one
// audio callback and applies control messages between callbacks.

pub mod message;
pub mod processor;

pub use message::{DelayMessage, MessageReceiver};
pub use processor::BlockProcessor;
