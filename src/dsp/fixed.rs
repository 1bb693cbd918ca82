use tracing::debug;

use crate::{
    config::{checked_capacity, checked_sample_rate, DelayLength, ResolvedConfig},
    dsp::{buffer::SampleBuffer, interpolate::max_delay, playhead::Playhead},
};

/// Whole-sample delay with a persistent read playhead.
///
/// Reader and writer advance in lockstep, so the delay only changes when
/// [`set_delay`](Self::set_delay) moves the reader. A fresh line has
/// reader == writer: each sample is read just before being overwritten,
/// giving a delay of the full capacity.
pub struct FixedDelay {
    buffer: SampleBuffer,
    writer: Playhead,
    reader: Playhead,
    sample_rate: f32,
    clear_on_prepare: bool,
}

impl FixedDelay {
    pub fn new(capacity: isize, sample_rate: f32) -> Self {
        let sample_rate = checked_sample_rate(sample_rate);
        let buffer = SampleBuffer::allocate(checked_capacity(capacity, sample_rate));
        let capacity = buffer.capacity();

        Self {
            buffer,
            writer: Playhead::new(capacity),
            reader: Playhead::new(capacity),
            sample_rate,
            clear_on_prepare: false,
        }
    }

    /// Build from the first tap of a resolved config.
    ///
    /// Without an initial delay the line keeps its full-capacity delay.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut delay = Self::new(config.capacity as isize, config.sample_rate);
        delay.clear_on_prepare = config.clear_on_prepare;
        if let Some(Some(samples)) = config.delays.first() {
            delay.set_delay(DelayLength::Samples(*samples));
        }
        delay
    }

    pub fn with_clear_on_prepare(mut self, clear: bool) -> Self {
        self.clear_on_prepare = clear;
        self
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = checked_sample_rate(sample_rate);
    }

    /// Current delay in samples, `capacity` when reader and writer coincide.
    pub fn delay(&self) -> usize {
        let capacity = self.capacity();
        match (self.writer.position() + capacity - self.reader.position()) % capacity.max(1) {
            0 => capacity,
            delay => delay,
        }
    }

    /// Move the reader `length` whole samples behind the writer.
    ///
    /// Fractions are truncated; the result is clamped to `[1, capacity - 1]`.
    pub fn set_delay(&mut self, length: DelayLength) {
        let samples = length.to_samples(self.sample_rate);
        let upper = max_delay(self.capacity());
        let whole = if samples.is_nan() {
            1
        } else {
            (samples as usize).clamp(1, upper)
        };
        self.reader = self.writer.behind(whole);
    }

    /// Called when the host (re)starts processing.
    pub fn prepare(&mut self) {
        if self.clear_on_prepare {
            self.buffer.clear();
            self.writer.reset();
            self.reader.reset();
        }
    }

    /// Zero the buffer. Playheads keep their positions.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Reallocate, discarding history. Both playheads restart at 0.
    pub fn resize(&mut self, new_capacity: isize) {
        self.buffer
            .resize(checked_capacity(new_capacity, self.sample_rate));
        let capacity = self.buffer.capacity();
        self.writer.rebind(capacity);
        self.reader.rebind(capacity);
        debug!(capacity, "fixed delay resized");
    }

    #[inline]
    pub fn next_sample(&mut self, input: f32) -> f32 {
        let delayed = self.buffer.read(self.reader.index());
        self.buffer.write(self.writer.index(), input);

        self.writer.advance();
        self.reader.advance();

        delayed
    }

    pub fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        for (out, &x) in output.iter_mut().zip(input) {
            *out = self.next_sample(x);
        }
    }

    pub fn process_in_place(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample);
        }
    }
}
