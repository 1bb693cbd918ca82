use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::{
    config::{checked_sample_rate, DelayConfig},
    dsp::delay::{DelayLine, LineState},
    engine::message::{DelayMessage, MessageReceiver},
    io::{AudioInput, AudioOutput},
    DEFAULT_SAMPLE_RATE,
};

/// Per-callback driver binding a [`DelayLine`] to the host's vectors.
///
/// The line is built lazily from the [`DelayConfig`] once the sample rate is
/// known, either through [`prepare`](Self::prepare) or on the first block.
/// Pending control messages are applied before the first sample of a block,
/// never in the middle of one. Messages handled before the line exists are
/// held back until [`prepare`](Self::prepare) knows the host's rate.
pub struct BlockProcessor {
    config: DelayConfig,
    line: Option<DelayLine>,
    sample_rate: f32,
    rx: Option<Box<dyn MessageReceiver + Send>>,
    pending: VecDeque<DelayMessage>,
}

impl BlockProcessor {
    pub fn new(config: DelayConfig) -> Self {
        if let Err(err) = config.validate() {
            warn!("delay config: {err}; defaults will be substituted");
        }

        Self {
            config,
            line: None,
            sample_rate: DEFAULT_SAMPLE_RATE,
            rx: None,
            pending: VecDeque::new(),
        }
    }

    /// Attach a queue of control messages drained at every block start.
    pub fn with_receiver<R: MessageReceiver + Send + 'static>(mut self, rx: R) -> Self {
        self.rx = Some(Box::new(rx));
        self
    }

    /// The host is about to start processing at `sample_rate`.
    pub fn prepare(&mut self, sample_rate: f32) {
        let sample_rate = checked_sample_rate(sample_rate);
        self.sample_rate = sample_rate;

        match self.line.as_mut() {
            None => {
                let resolved = self.config.resolve(sample_rate);
                debug!(
                    capacity = resolved.capacity,
                    taps = resolved.tap_count,
                    sample_rate,
                    "allocating delay line"
                );
                self.line = Some(DelayLine::from_config(&resolved));

                let mut pending = std::mem::take(&mut self.pending);
                self.drain(&mut pending);
            }
            Some(line) => {
                line.set_sample_rate(sample_rate);
                if self.config.clear_on_prepare {
                    line.clear();
                }
            }
        }
    }

    pub fn state(&self) -> LineState {
        self.line
            .as_ref()
            .map_or(LineState::Unconfigured, DelayLine::state)
    }

    pub fn line(&self) -> Option<&DelayLine> {
        self.line.as_ref()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Apply one control message, or queue it until the line is prepared.
    pub fn handle(&mut self, msg: DelayMessage) {
        let Some(line) = self.line.as_mut() else {
            self.pending.push_back(msg);
            return;
        };
        match msg {
            DelayMessage::SetDelay { tap, length } => {
                if let Err(err) = line.set_delay(tap, length) {
                    warn!("ignoring delay change: {err}");
                }
            }
            DelayMessage::Clear => line.clear(),
            DelayMessage::Resize { capacity } => {
                line.resize(isize::try_from(capacity).unwrap_or(isize::MAX));
            }
        }
    }

    /// Apply every message waiting in `rx`.
    pub fn drain<R: MessageReceiver + ?Sized>(&mut self, rx: &mut R) {
        while let Some(msg) = rx.pop() {
            self.handle(msg);
        }
    }

    /// Process one block with separate control and output vectors.
    pub fn process(
        &mut self,
        input: &[f32],
        controls: &[&[f32]],
        outputs: &mut [&mut [f32]],
        sample_rate: f32,
    ) {
        self.begin_block(sample_rate);
        self.line_mut().process_block(input, controls, outputs);
    }

    /// Process one block where `io[j]` carries tap `j`'s control on entry
    /// and its output on return.
    pub fn process_in_place(&mut self, input: &[f32], io: &mut [&mut [f32]], sample_rate: f32) {
        self.begin_block(sample_rate);
        self.line_mut().process_block_in_place(input, io);
    }

    /// Process one block over host vectors that may share memory.
    ///
    /// See [`DelayLine::process_shared`] for the index layout.
    pub fn process_shared(
        &mut self,
        pool: &mut [Vec<f32>],
        signal: usize,
        controls: &[usize],
        outputs: &[usize],
        sample_rate: f32,
    ) {
        self.begin_block(sample_rate);
        self.line_mut()
            .process_shared(pool, signal, controls, outputs);
    }

    /// Process one block laid out as host channel buffers.
    ///
    /// `input.buffers[0]` is the signal, `input.buffers[1..]` the tap
    /// controls. `output` is reshaped to one buffer per tap.
    pub fn process_block(&mut self, input: &AudioInput, output: &mut AudioOutput) {
        let sample_rate = self.sample_rate;
        self.begin_block(sample_rate);

        let line = self.line_mut();
        output.ensure_shape(line.tap_count(), input.block_len());

        if let Some((signal, controls)) = input.buffers.split_first() {
            line.process_channels(signal, controls, &mut output.buffers);
        }
    }

    fn begin_block(&mut self, sample_rate: f32) {
        if self.line.is_none() {
            self.prepare(sample_rate);
        } else if sample_rate != self.sample_rate {
            let sample_rate = checked_sample_rate(sample_rate);
            self.sample_rate = sample_rate;
            if let Some(line) = self.line.as_mut() {
                line.set_sample_rate(sample_rate);
            }
        }

        if let Some(mut rx) = self.rx.take() {
            self.drain(&mut *rx);
            self.rx = Some(rx);
        }
    }

    fn line_mut(&mut self) -> &mut DelayLine {
        let config = &self.config;
        let sample_rate = self.sample_rate;
        self.line
            .get_or_insert_with(|| DelayLine::from_config(&config.resolve(sample_rate)))
    }
}
