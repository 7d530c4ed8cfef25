//! Component B: Hann window + real FFT magnitude spectrum (§4.B).

use chfft::RFft1D;

use super::hanning::periodic_hann_window;

/// Applies a periodic Hann window to a `window_size`-sample frame, runs a
/// real-to-complex FFT, and returns the magnitude spectrum for bins
/// `[0, window_size/2)`.
///
/// The Hann window and the FFT plan are both precomputed once in `new`
/// and reused for every call to `analyze`, mirroring the teacher's
/// `RFft1D` instance that lives for the whole `SignatureGenerator`.
pub struct SpectralAnalyzer {
    window: Vec<f32>,
    fft: RFft1D<f32>,
    windowed: Vec<f32>,
}

impl SpectralAnalyzer {
    pub fn new(window_size: u32) -> Self {
        let window_size = window_size as usize;
        Self {
            window: periodic_hann_window(window_size),
            fft: RFft1D::<f32>::new(window_size),
            windowed: vec![0.0; window_size],
        }
    }

    /// Computes `m[k] = sqrt(re_k^2 + im_k^2)` for `k in [0, W/2)`.
    ///
    /// `frame` must have exactly `window_size` samples.
    pub fn analyze(&mut self, frame: &[f32]) -> Vec<f32> {
        debug_assert_eq!(frame.len(), self.window.len());

        for (dst, (sample, coeff)) in self
            .windowed
            .iter_mut()
            .zip(frame.iter().zip(self.window.iter()))
        {
            *dst = sample * coeff;
        }

        let spectrum = self.fft.forward(&self.windowed);
        let half = self.window.len() / 2;
        spectrum[..half]
            .iter()
            .map(|c| (c.re * c.re + c.im * c.im).sqrt())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_spectrum_has_half_window_bins() {
        let mut analyzer = SpectralAnalyzer::new(64);
        let frame: Vec<f32> = (0..64)
            .map(|i| (i as f32 * 0.1).sin())
            .collect();
        let magnitudes = analyzer.analyze(&frame);
        assert_eq!(magnitudes.len(), 32);
    }

    #[test]
    fn pure_tone_has_a_dominant_bin() {
        let window_size = 1024u32;
        let mut analyzer = SpectralAnalyzer::new(window_size);
        let sample_rate = 5512.0f32;
        let tone_hz = 1000.0f32;
        let frame: Vec<f32> = (0..window_size)
            .map(|i| (2.0 * std::f32::consts::PI * tone_hz * i as f32 / sample_rate).sin())
            .collect();
        let magnitudes = analyzer.analyze(&frame);

        let (peak_bin, _) = magnitudes
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .unwrap();

        let expected_bin = (tone_hz * window_size as f32 / sample_rate).round() as usize;
        assert!((peak_bin as i64 - expected_bin as i64).abs() <= 1);
    }

    #[test]
    fn silence_produces_near_zero_magnitudes() {
        let mut analyzer = SpectralAnalyzer::new(256);
        let frame = vec![0.0f32; 256];
        let magnitudes = analyzer.analyze(&frame);
        assert!(magnitudes.iter().all(|m| m.abs() < 1e-4));
    }
}
