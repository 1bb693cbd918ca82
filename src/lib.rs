pub mod config; // Construction-time options and default substitution
pub mod dsp;
pub mod engine; // Host-facing block driver and control messages
pub mod error;
pub mod graph; // Composable audio graph nodes
pub mod io;

pub use config::{DelayConfig, DelayLength, ResolvedConfig};
pub use dsp::delay::{DelayLine, LineState};
pub use dsp::fixed::FixedDelay;
pub use engine::{BlockProcessor, DelayMessage, MessageReceiver};
pub use error::DelayError;

pub const DEFAULT_SAMPLE_RATE: f32 = 48_000.0;
/// Buffer length substituted when no usable capacity is configured.
pub const DEFAULT_CAPACITY_MS: f32 = 100.0;

/// Capacity in samples equivalent to [`DEFAULT_CAPACITY_MS`] at `sample_rate`.
///
/// Never returns less than one sample, even for a nonsensical sample rate.
pub fn default_capacity(sample_rate: f32) -> usize {
    let sample_rate = if sample_rate.is_finite() && sample_rate > 0.0 {
        sample_rate
    } else {
        DEFAULT_SAMPLE_RATE
    };
    ((DEFAULT_CAPACITY_MS / 1000.0 * sample_rate) as usize).max(1)
}
