/*
Fractional Delay
================

A delay of `d = i + f` samples sits between two stored samples: the one
exactly `i` samples old (y1) and the one `i + 1` samples old (y2). We blend
them linearly:

    out = y1 + f * (y2 - y1)

As `f` grows from 0 to 1 the output slides from y1 to y2, i.e. further
into the past, so increasing the delay always moves the read point back
in time.

Linear interpolation is a gentle lowpass (strongest at f = 0.5). That is
acceptable for modulated delays; anything sharper is out of scope here.


Clamping
--------

Delays live in [1, capacity - 1]. The lower bound matters: a tap that
read 0 samples back would land on the slot the writer is about to
overwrite in the same step.
*/

/// Clamp a requested delay into `[1, capacity - 1]`.
///
/// A one-sample buffer still allows a delay of 1. NaN becomes 1.
#[inline]
pub fn clamp_delay(delay: f32, capacity: usize) -> f32 {
    let upper = max_delay(capacity) as f32;
    // f32::max/min ignore a NaN operand
    delay.max(1.0).min(upper)
}

/// Longest delay a buffer of `capacity` samples can serve.
#[inline]
pub fn max_delay(capacity: usize) -> usize {
    capacity.saturating_sub(1).max(1)
}

/// Integer part and fractional remainder of a clamped, positive delay.
///
/// Past 2^24 samples `f32` cannot hold `capacity - 1` exactly and the
/// clamped value may round up to `capacity`; the whole part is therefore
/// bounded again here.
#[inline]
pub fn split_delay(delay: f32, capacity: usize) -> (usize, f32) {
    let floor = delay.floor();
    let whole = floor as usize;
    let upper = max_delay(capacity);
    if whole >= upper {
        (upper, 0.0)
    } else {
        (whole, delay - floor)
    }
}

#[inline]
pub fn linear(y1: f32, y2: f32, frac: f32) -> f32 {
    y1 + frac * (y2 - y1)
}
