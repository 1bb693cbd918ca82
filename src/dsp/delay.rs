use tracing::{debug, warn};

use crate::{
    config::{checked_capacity, checked_sample_rate, DelayLength, ResolvedConfig},
    dsp::{buffer::SampleBuffer, playhead::Playhead, tap::DelayTap},
    error::DelayError,
};

/*
Interpolated Multi-Tap Delay Line
=================================

One writer, K readers, one circular buffer.

  input ──→ [write playhead] ──→ ┌──────────────────────────┐
                                 │  SampleBuffer (N slots)  │
                    tap 0 ←──────┤ read at write - d0       │
                    tap 1 ←──────┤ read at write - d1       │
                    tap K ←──────┤ read at write - dK       │
                                 └──────────────────────────┘

Every tap has its own delay, either held (set between blocks) or driven
sample by sample from a control vector. Taps never see each other; they
only share the buffer's history.


Per-Sample Order
----------------

For each sample of the block:

  1. take the input sample x, do not store it yet
  2. snapshot every tap's delay for this sample
  3. for every tap: clamp to [1, N-1], split into whole + fraction, read
     the two neighbouring samples behind the writer, interpolate
  4. store x at the write playhead
  5. advance the write playhead

Step 2 happens for *all* taps before step 3 stores anything: a host may hand
us the same memory as a tap's control input and another tap's output.

Reading before writing is what makes a delay of 1 return the previous
sample rather than the current one.


Lifecycle
---------

  Unconfigured ──new──→ Allocated ──first block──→ Processing
                            ↑                          │
                            └──── clear / resize ──────┘

A line whose storage could not be allocated stays Unconfigured and
outputs silence.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    /// No usable storage; output is silence.
    Unconfigured,
    /// Storage is zeroed and ready, no block processed since.
    Allocated,
    Processing,
}

pub struct DelayLine {
    buffer: SampleBuffer,
    writer: Playhead,
    taps: Vec<DelayTap>,
    // Per-sample scratch, sized to the tap count at construction.
    snapshot: Vec<f32>,
    frame: Vec<f32>,
    sample_rate: f32,
    state: LineState,
}

impl DelayLine {
    /// Create a line of `capacity` samples read by `tap_count` taps.
    ///
    /// A non-positive capacity is replaced by 100ms at `sample_rate` and a
    /// tap count of 0 by a single tap; both are logged, neither fails.
    pub fn new(capacity: isize, tap_count: usize, sample_rate: f32) -> Self {
        let sample_rate = checked_sample_rate(sample_rate);
        let capacity = checked_capacity(capacity, sample_rate);

        let tap_count = if tap_count == 0 {
            warn!("{}; using a single tap", DelayError::InvalidTapCount(0));
            1
        } else {
            tap_count
        };

        let buffer = SampleBuffer::allocate(capacity);
        let state = if buffer.is_valid() {
            LineState::Allocated
        } else {
            LineState::Unconfigured
        };
        let capacity = buffer.capacity();

        Self {
            buffer,
            writer: Playhead::new(capacity),
            taps: vec![DelayTap::new(1.0, capacity); tap_count],
            snapshot: vec![0.0; tap_count],
            frame: vec![0.0; tap_count],
            sample_rate,
            state,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut line = Self::new(
            config.capacity as isize,
            config.tap_count,
            config.sample_rate,
        );
        let capacity = line.capacity();
        for (tap, delay) in line.taps.iter_mut().zip(&config.delays) {
            if let Some(delay) = *delay {
                tap.set_delay(delay, capacity);
            }
        }
        line
    }

    pub fn state(&self) -> LineState {
        self.state
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn tap_count(&self) -> usize {
        self.taps.len()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Used to convert millisecond lengths; does not touch the buffer.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = checked_sample_rate(sample_rate);
    }

    pub fn write_position(&self) -> usize {
        self.writer.position()
    }

    /// Held delay of `tap` in samples.
    pub fn tap_delay(&self, tap: usize) -> Option<f32> {
        self.taps.get(tap).map(DelayTap::requested_delay)
    }

    /// Set the held delay of one tap. Out-of-range lengths are clamped.
    pub fn set_delay(&mut self, tap: usize, length: DelayLength) -> Result<(), DelayError> {
        let capacity = self.capacity();
        let samples = length.to_samples(self.sample_rate);
        let taps = self.taps.len();

        let target = self
            .taps
            .get_mut(tap)
            .ok_or(DelayError::TapOutOfRange { tap, taps })?;
        target.set_delay(samples, capacity);
        Ok(())
    }

    /// Zero the buffer. Capacity and write position are kept.
    pub fn clear(&mut self) {
        self.buffer.clear();
        if self.buffer.is_valid() {
            self.state = LineState::Allocated;
        }
        debug!(capacity = self.capacity(), "delay line cleared");
    }

    /// Reallocate storage, discarding all history and rewinding to 0.
    pub fn resize(&mut self, new_capacity: isize) {
        let capacity = checked_capacity(new_capacity, self.sample_rate);
        self.buffer.resize(capacity);

        let capacity = self.buffer.capacity();
        self.writer.rebind(capacity);
        for tap in &mut self.taps {
            tap.rebind(capacity);
        }

        self.state = if self.buffer.is_valid() {
            LineState::Allocated
        } else {
            LineState::Unconfigured
        };
        debug!(capacity, "delay line resized");
    }

    /// Process one sample through tap 0 at its held delay.
    pub fn next_sample(&mut self, input: f32) -> f32 {
        for (slot, tap) in self.snapshot.iter_mut().zip(&self.taps) {
            *slot = tap.requested_delay();
        }
        self.tick(input);
        self.frame[0]
    }

    /// Delay `buffer` in place through tap 0 at its held delay.
    pub fn render(&mut self, buffer: &mut [f32]) {
        self.begin_block();
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample);
        }
    }

    /// Process one block.
    ///
    /// Tap `j` follows `controls[j]` sample by sample (delay in samples);
    /// taps without a control vector, or past its end, use their held
    /// delay. `outputs[j]` receives tap `j`. `input.len()` samples are
    /// processed; output samples past that are zeroed.
    pub fn process_block(
        &mut self,
        input: &[f32],
        controls: &[&[f32]],
        outputs: &mut [&mut [f32]],
    ) {
        self.run(input, controls, outputs);
    }

    /// [`process_block`](Self::process_block) over owned channel buffers.
    pub fn process_channels(
        &mut self,
        input: &[f32],
        controls: &[Vec<f32>],
        outputs: &mut [Vec<f32>],
    ) {
        self.run(input, controls, outputs);
    }

    /// Process one block where each tap's control and output share memory.
    ///
    /// On entry `io[j]` holds tap `j`'s delay control; on return it holds
    /// that tap's output.
    pub fn process_block_in_place(&mut self, input: &[f32], io: &mut [&mut [f32]]) {
        self.begin_block();

        for (i, &x) in input.iter().enumerate() {
            for (j, (slot, tap)) in self.snapshot.iter_mut().zip(&self.taps).enumerate() {
                *slot = control_at(io.get(j).map(|c| &**c), i, tap);
            }

            self.tick(x);

            for (out, &y) in io.iter_mut().zip(&self.frame) {
                if let Some(slot) = out.get_mut(i) {
                    *slot = y;
                }
            }
        }

        for out in io.iter_mut() {
            silence_tail(out, input.len());
        }
    }

    /// Process one block over a pool of host vectors that may alias.
    ///
    /// `pool[signal]` is the input, tap `j` reads its control from
    /// `pool[controls[j]]` and writes to `pool[outputs[j]]`. Any of these
    /// indices may coincide, e.g. tap 0's output reusing tap 1's control
    /// buffer. The block is as long as the signal vector; indices that do
    /// not name a vector are skipped.
    pub fn process_shared(
        &mut self,
        pool: &mut [Vec<f32>],
        signal: usize,
        controls: &[usize],
        outputs: &[usize],
    ) {
        self.begin_block();
        let len = pool.get(signal).map_or(0, Vec::len);

        for i in 0..len {
            let x = pool[signal][i];
            for (j, (slot, tap)) in self.snapshot.iter_mut().zip(&self.taps).enumerate() {
                let control = controls.get(j).and_then(|&c| pool.get(c));
                *slot = control_at(control.map(Vec::as_slice), i, tap);
            }

            self.tick(x);

            for (&o, &y) in outputs.iter().zip(&self.frame) {
                if let Some(slot) = pool.get_mut(o).and_then(|out| out.get_mut(i)) {
                    *slot = y;
                }
            }
        }

        for &o in outputs {
            if let Some(out) = pool.get_mut(o) {
                silence_tail(out, len);
            }
        }
    }

    fn run<C: AsRef<[f32]>, O: AsMut<[f32]>>(
        &mut self,
        input: &[f32],
        controls: &[C],
        outputs: &mut [O],
    ) {
        self.begin_block();

        for (i, &x) in input.iter().enumerate() {
            for (j, (slot, tap)) in self.snapshot.iter_mut().zip(&self.taps).enumerate() {
                *slot = control_at(controls.get(j).map(|c| c.as_ref()), i, tap);
            }

            self.tick(x);

            for (out, &y) in outputs.iter_mut().zip(&self.frame) {
                if let Some(slot) = out.as_mut().get_mut(i) {
                    *slot = y;
                }
            }
        }

        for out in outputs.iter_mut() {
            silence_tail(out.as_mut(), input.len());
        }
    }

    fn begin_block(&mut self) {
        if self.state == LineState::Allocated {
            self.state = LineState::Processing;
        }
    }

    /// Steps 3-5 for one sample; delays must already be in `snapshot`.
    #[inline]
    fn tick(&mut self, input: f32) {
        for (out, &delay) in self.frame.iter_mut().zip(&self.snapshot) {
            *out = DelayTap::read(&self.buffer, self.writer, delay);
        }

        self.buffer.write(self.writer.index(), input);
        self.writer.advance();
    }
}

/// Zero whatever an output holds past the processed samples.
fn silence_tail(out: &mut [f32], processed: usize) {
    if let Some(tail) = out.get_mut(processed..) {
        tail.fill(0.0);
    }
}

#[inline]
fn control_at(control: Option<&[f32]>, index: usize, tap: &DelayTap) -> f32 {
    control
        .and_then(|c| c.get(index))
        .copied()
        .unwrap_or_else(|| tap.requested_delay())
}
