use crate::dsp::buffer::wrap;

/// A position inside a circular buffer, always kept in `[0, capacity)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playhead {
    position: usize,
    capacity: usize,
}

impl Playhead {
    pub fn new(capacity: usize) -> Self {
        Self {
            position: 0,
            capacity,
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Position as a signed index, for offset arithmetic before wrapping.
    #[inline]
    pub fn index(&self) -> isize {
        self.position as isize
    }

    #[inline]
    pub fn advance(&mut self) {
        self.position += 1;
        if self.position >= self.capacity {
            self.position = 0;
        }
    }

    /// The playhead `offset` samples behind this one.
    pub fn behind(&self, offset: usize) -> Self {
        Self {
            position: wrap(self.index() - offset as isize, self.capacity),
            capacity: self.capacity,
        }
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Bind to a buffer of a new size, starting over at 0.
    pub fn rebind(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.position = 0;
    }
}
