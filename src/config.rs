//! Construction-time configuration for delay lines.
//!
//! A [`DelayConfig`] is what a host hands over when it creates a delay
//! object: it may be incomplete or contain nonsense (a zero capacity, a
//! negative tap count). [`DelayConfig::resolve`] turns it into a
//! [`ResolvedConfig`] that is always usable, substituting defaults and
//! logging a warning for every value it had to replace.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{default_capacity, error::DelayError, DEFAULT_SAMPLE_RATE};

/// A delay length expressed either in samples or in milliseconds.
///
/// Millisecond lengths are converted with the sample rate that is current
/// when the value is applied.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DelayLength {
    Samples(f32),
    #[cfg_attr(feature = "serde", serde(rename = "ms"))]
    Millis(f32),
}

impl DelayLength {
    pub fn to_samples(self, sample_rate: f32) -> f32 {
        match self {
            DelayLength::Samples(samples) => samples,
            DelayLength::Millis(ms) => ms * sample_rate / 1000.0,
        }
    }
}

impl From<f32> for DelayLength {
    fn from(samples: f32) -> Self {
        DelayLength::Samples(samples)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct DelayConfig {
    /// Buffer size in samples. `None` means 100ms at the host sample rate.
    pub capacity: Option<i64>,
    /// Number of taps reading from the shared buffer.
    pub tap_count: i64,
    /// Initial held delay per tap, in tap order.
    pub delays: Vec<DelayLength>,
    /// Wipe the buffer every time the host (re)starts processing.
    pub clear_on_prepare: bool,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            capacity: None,
            tap_count: 1,
            delays: Vec::new(),
            clear_on_prepare: false,
        }
    }
}

impl DelayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, samples: i64) -> Self {
        self.capacity = Some(samples);
        self
    }

    pub fn with_taps(mut self, tap_count: i64) -> Self {
        self.tap_count = tap_count;
        self
    }

    /// Append the initial delay of the next tap.
    pub fn with_delay(mut self, length: impl Into<DelayLength>) -> Self {
        self.delays.push(length.into());
        self
    }

    pub fn with_clear_on_prepare(mut self, clear: bool) -> Self {
        self.clear_on_prepare = clear;
        self
    }

    /// Report the first value [`resolve`](Self::resolve) would have to replace.
    pub fn validate(&self) -> Result<(), DelayError> {
        if let Some(capacity) = self.capacity {
            if capacity <= 0 {
                return Err(DelayError::InvalidCapacity(capacity));
            }
        }
        if self.tap_count < 1 {
            return Err(DelayError::InvalidTapCount(self.tap_count));
        }
        Ok(())
    }

    /// Substitute defaults for every unusable value.
    ///
    /// Never fails; each substitution is logged once at `warn` level.
    pub fn resolve(&self, sample_rate: f32) -> ResolvedConfig {
        let sample_rate = checked_sample_rate(sample_rate);

        let capacity = match self.capacity {
            None => default_capacity(sample_rate),
            Some(capacity) if capacity > 0 => capacity as usize,
            Some(capacity) => {
                let fallback = default_capacity(sample_rate);
                warn!(
                    "{}; using {} samples (100ms) instead",
                    DelayError::InvalidCapacity(capacity),
                    fallback
                );
                fallback
            }
        };

        let tap_count = if self.tap_count >= 1 {
            self.tap_count as usize
        } else {
            warn!("{}; using a single tap", DelayError::InvalidTapCount(self.tap_count));
            1
        };

        if self.delays.len() > tap_count {
            warn!(
                "{} initial delays given for {} taps; extra values ignored",
                self.delays.len(),
                tap_count
            );
        }

        let delays = (0..tap_count)
            .map(|tap| {
                self.delays
                    .get(tap)
                    .map(|length| length.to_samples(sample_rate))
            })
            .collect();

        ResolvedConfig {
            capacity,
            tap_count,
            delays,
            sample_rate,
            clear_on_prepare: self.clear_on_prepare,
        }
    }
}

/// A configuration with every value validated or defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub capacity: usize,
    pub tap_count: usize,
    /// Initial delay of each tap in samples (unclamped), `None` if not given.
    pub delays: Vec<Option<f32>>,
    pub sample_rate: f32,
    pub clear_on_prepare: bool,
}

pub(crate) fn checked_sample_rate(sample_rate: f32) -> f32 {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        sample_rate
    } else {
        warn!(
            "{}; falling back to {} Hz",
            DelayError::InvalidSampleRate(sample_rate),
            DEFAULT_SAMPLE_RATE
        );
        DEFAULT_SAMPLE_RATE
    }
}

/// Capacity as given, or the 100ms default when it is not positive.
pub(crate) fn checked_capacity(capacity: isize, sample_rate: f32) -> isize {
    if capacity > 0 {
        return capacity;
    }
    let fallback = default_capacity(sample_rate);
    warn!(
        "{}; using {} samples (100ms) instead",
        DelayError::InvalidCapacity(capacity as i64),
        fallback
    );
    fallback as isize
}
