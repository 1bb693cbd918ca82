use crate::dsp::{
    buffer::SampleBuffer,
    interpolate::{clamp_delay, linear, split_delay},
    playhead::Playhead,
};

/// One reader of a shared delay buffer.
///
/// The tap only remembers its held delay; where it reads from is derived
/// from the writer's position every sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayTap {
    requested_delay: f32,
}

impl DelayTap {
    pub fn new(delay_samples: f32, capacity: usize) -> Self {
        Self {
            requested_delay: clamp_delay(delay_samples, capacity),
        }
    }

    /// Held delay in samples, used when no control signal drives the tap.
    pub fn requested_delay(&self) -> f32 {
        self.requested_delay
    }

    pub fn set_delay(&mut self, delay_samples: f32, capacity: usize) {
        self.requested_delay = clamp_delay(delay_samples, capacity);
    }

    /// Re-clamp after the buffer changed size.
    pub(crate) fn rebind(&mut self, capacity: usize) {
        self.requested_delay = clamp_delay(self.requested_delay, capacity);
    }

    /// Read `delay` samples behind `writer`, interpolating between the
    /// sample at the whole delay and the one just before it.
    #[inline]
    pub fn read(buffer: &SampleBuffer, writer: Playhead, delay: f32) -> f32 {
        let capacity = buffer.capacity();
        let (whole, frac) = split_delay(clamp_delay(delay, capacity), capacity);

        let reader = writer.index() - whole as isize;
        let y1 = buffer.read(reader);
        let y2 = buffer.read(reader - 1);

        linear(y1, y2, frac)
    }
}
