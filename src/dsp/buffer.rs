//! Circular sample storage.
//!
//! Every index is normalized through [`wrap`] before it touches memory, so
//! callers can hand in negative or out-of-range positions freely. A buffer
//! whose allocation was refused is kept in an *invalid* state instead of
//! failing: it reads as silence and ignores writes.

use tracing::warn;

/// Normalize `index` into `[0, capacity)`.
///
/// The single place wraparound is handled; `capacity == 0` maps everything
/// to 0.
#[inline]
pub fn wrap(index: isize, capacity: usize) -> usize {
    if capacity == 0 {
        return 0;
    }
    index.rem_euclid(capacity as isize) as usize
}

#[derive(Debug, Clone, Default)]
pub struct SampleBuffer {
    data: Vec<f32>,
}

impl SampleBuffer {
    /// Reserve `capacity` zeroed slots.
    ///
    /// Returns an invalid buffer when `capacity <= 0` or the memory cannot
    /// be reserved; the caller decides what to substitute.
    pub fn allocate(capacity: isize) -> Self {
        if capacity <= 0 {
            return Self::invalid();
        }

        let mut data = Vec::new();
        if let Err(err) = data.try_reserve_exact(capacity as usize) {
            warn!("could not allocate a {capacity} sample buffer: {err}");
            return Self::invalid();
        }
        data.resize(capacity as usize, 0.0);

        Self { data }
    }

    pub fn invalid() -> Self {
        Self { data: Vec::new() }
    }

    pub fn is_valid(&self) -> bool {
        !self.data.is_empty()
    }

    /// Number of slots; 0 for an invalid buffer.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Zero every slot, keeping the capacity.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    #[inline]
    pub fn read(&self, index: isize) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data[wrap(index, self.data.len())]
    }

    #[inline]
    pub fn write(&mut self, index: isize, value: f32) {
        if self.data.is_empty() {
            return;
        }
        let slot = wrap(index, self.data.len());
        self.data[slot] = value;
    }

    /// Reallocate from scratch. Previous contents are discarded.
    pub fn resize(&mut self, new_capacity: isize) {
        *self = Self::allocate(new_capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_negative_and_overflowing_indices() {
        assert_eq!(wrap(-1, 8), 7);
        assert_eq!(wrap(-9, 8), 7);
        assert_eq!(wrap(8, 8), 0);
        assert_eq!(wrap(19, 8), 3);
        assert_eq!(wrap(5, 0), 0);
    }

    #[test]
    fn test_allocate_zero_fills() {
        let buffer = SampleBuffer::allocate(16);
        assert!(buffer.is_valid());
        assert_eq!(buffer.capacity(), 16);
        assert!((0..16).all(|i| buffer.read(i) == 0.0));
    }

    #[test]
    fn test_non_positive_capacity_is_invalid() {
        assert!(!SampleBuffer::allocate(0).is_valid());
        assert!(!SampleBuffer::allocate(-4).is_valid());
    }

    #[test]
    fn test_invalid_buffer_reads_silence() {
        let mut buffer = SampleBuffer::invalid();
        buffer.write(3, 1.0);
        assert_eq!(buffer.read(3), 0.0);
        assert_eq!(buffer.read(-3), 0.0);
        assert_eq!(buffer.capacity(), 0);
    }

    #[test]
    fn test_read_write_wrap_around() {
        let mut buffer = SampleBuffer::allocate(4);
        buffer.write(5, 0.5);
        assert_eq!(buffer.read(1), 0.5);
        assert_eq!(buffer.read(-3), 0.5);

        buffer.write(-1, 0.25);
        assert_eq!(buffer.read(3), 0.25);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut buffer = SampleBuffer::allocate(4);
        buffer.write(0, 1.0);
        buffer.write(2, -1.0);
        buffer.clear();

        assert_eq!(buffer.capacity(), 4);
        assert!((0..4).all(|i| buffer.read(i) == 0.0));
    }

    #[test]
    fn test_resize_discards_history() {
        let mut buffer = SampleBuffer::allocate(4);
        buffer.write(1, 1.0);
        buffer.resize(6);

        assert_eq!(buffer.capacity(), 6);
        assert!((0..6).all(|i| buffer.read(i) == 0.0));
    }
}
