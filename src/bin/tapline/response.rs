//! Magnitude response of a tap
//!
//! FFT of the tap's impulse response, sampled at a handful of reference
//! frequencies. A whole-sample delay is flat; a fractional one rolls off
//! toward Nyquist, strongest at half a sample.

use rustfft::{num_complex::Complex, FftPlanner};

/// Frequencies reported for every tap (Hz)
pub const PROBE_FREQS: &[f32] = &[100.0, 1_000.0, 5_000.0, 10_000.0, 15_000.0, 20_000.0];

/// Magnitude in dB at each of [`PROBE_FREQS`] below Nyquist
///
/// # Arguments
/// * `impulse` - Tap output for a unit impulse input
/// * `sample_rate` - Audio sample rate in Hz
pub fn magnitude_db(impulse: &[f32], sample_rate: f32) -> Vec<(f32, f32)> {
    let len = impulse.len().next_power_of_two().max(2);
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(len);

    let mut spectrum: Vec<Complex<f32>> = impulse
        .iter()
        .map(|&s| Complex::new(s, 0.0))
        .chain(std::iter::repeat(Complex::new(0.0, 0.0)))
        .take(len)
        .collect();
    fft.process(&mut spectrum);

    let nyquist = sample_rate / 2.0;
    let bin_width = sample_rate / len as f32;

    PROBE_FREQS
        .iter()
        .copied()
        .filter(|&freq| freq < nyquist)
        .map(|freq| {
            let bin = ((freq / bin_width).round() as usize).min(len / 2);
            let magnitude = spectrum[bin].norm();
            (freq, 20.0 * magnitude.max(1e-9).log10())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_delay_is_flat() {
        let mut impulse = vec![0.0; 256];
        impulse[5] = 1.0;

        for (_, db) in magnitude_db(&impulse, 48_000.0) {
            assert!(db.abs() < 1e-3);
        }
    }

    #[test]
    fn test_half_sample_rolls_off() {
        let mut impulse = vec![0.0; 256];
        impulse[12] = 0.5;
        impulse[13] = 0.5;

        let response = magnitude_db(&impulse, 48_000.0);
        let (_, low) = response[0];
        let (_, high) = *response.last().unwrap();
        assert!(low.abs() < 0.1);
        assert!(high < -10.0);
    }
}
