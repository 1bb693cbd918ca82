// Purpose - host-facing signal vectors

/// Signal vectors handed in by the host for one block.
///
/// For a delay processor, buffer 0 is the signal to delay and buffers
/// `1..=K` are the per-tap delay controls (in samples). Missing control
/// buffers leave the corresponding tap at its held delay.
#[derive(Debug, Default, Clone)]
pub struct AudioInput {
    pub buffers: Vec<Vec<f32>>,
}

impl AudioInput {
    /// A zero-filled input with `channels` buffers of `len` samples.
    pub fn with_channels(channels: usize, len: usize) -> Self {
        Self {
            buffers: vec![vec![0.0; len]; channels],
        }
    }

    /// Length of the block, taken from the signal buffer.
    pub fn block_len(&self) -> usize {
        self.buffers.first().map_or(0, Vec::len)
    }
}

/// Output vectors, one per tap.
#[derive(Debug, Default, Clone)]
pub struct AudioOutput {
    pub buffers: Vec<Vec<f32>>,
}

impl AudioOutput {
    pub fn with_channels(channels: usize, len: usize) -> Self {
        Self {
            buffers: vec![vec![0.0; len]; channels],
        }
    }

    /// Make sure there are exactly `channels` buffers of `len` samples.
    ///
    /// Only reallocates when the shape changes.
    pub fn ensure_shape(&mut self, channels: usize, len: usize) {
        self.buffers.resize_with(channels, Vec::new);
        for buffer in &mut self.buffers {
            buffer.resize(len, 0.0);
        }
    }
}
