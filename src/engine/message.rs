use std::collections::VecDeque;

#[cfg(feature = "rtrb")]
use rtrb::Consumer;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::DelayLength;

/// Control operations issued between blocks.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DelayMessage {
    SetDelay { tap: usize, length: DelayLength },
    Clear,
    Resize { capacity: i64 },
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<DelayMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<DelayMessage> {
    fn pop(&mut self) -> Option<DelayMessage> {
        Consumer::pop(self).ok()
    }
}

impl MessageReceiver for VecDeque<DelayMessage> {
    fn pop(&mut self) -> Option<DelayMessage> {
        self.pop_front()
    }
}
