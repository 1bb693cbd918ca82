//! Low-level delay primitives used by the graph nodes and the block driver.
//!
//! Storage is allocated at construction or on an explicit resize, never
//! while processing a block, so these types are safe to drive from an audio
//! callback. Wraparound index arithmetic lives in [`buffer::wrap`] only.

/// Circular sample storage with wraparound-safe indexing.
pub mod buffer;
/// Interpolated multi-tap delay line (one writer, many readers).
pub mod delay;
/// Whole-sample delay with a persistent read playhead.
pub mod fixed;
/// Delay clamping and two-point linear interpolation.
pub mod interpolate;
/// Read/write positions inside a circular buffer.
pub mod playhead;
/// A single reader bound to a delay line.
pub mod tap;

pub use buffer::SampleBuffer;
pub use playhead::Playhead;
pub use tap::DelayTap;
