use thiserror::Error;

/// Problems detected while configuring or controlling a delay line.
///
/// None of these are fatal: the engine substitutes a safe value and keeps
/// running. They are surfaced so callers that care can report them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DelayError {
    #[error("buffer capacity must be > 0 samples, got {0}")]
    InvalidCapacity(i64),

    #[error("tap count must be >= 1, got {0}")]
    InvalidTapCount(i64),

    #[error("tap {tap} does not exist (line has {taps} taps)")]
    TapOutOfRange { tap: usize, taps: usize },

    #[error("sample rate must be a positive finite number, got {0}")]
    InvalidSampleRate(f32),
}
