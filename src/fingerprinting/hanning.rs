//! Periodic Hann window coefficients (§4.B).
//!
//! The teacher generator multiplied its 2048-sample ring buffer by a
//! baked-in `HANNING_WINDOW_2048_MULTIPLIERS` table computed for a single
//! fixed window size. Since `window_size` is a configuration parameter
//! here, the table is generated once per `SpectralAnalyzer` instead of
//! hard-coded, but it is still computed exactly once and reused for every
//! frame for the lifetime of the analyzer.

/// Computes the periodic Hann window of length `window_size`.
///
/// Periodic (as opposed to symmetric) Hann windows are the usual choice
/// for STFT analysis because consecutive overlapping windows tile
/// perfectly: `w[n] = 0.5 * (1 - cos(2*pi*n / N))`.
pub fn periodic_hann_window(window_size: usize) -> Vec<f32> {
    if window_size == 0 {
        return Vec::new();
    }
    let n = window_size as f32;
    (0..window_size)
        .map(|i| {
            let phase = 2.0 * std::f32::consts::PI * (i as f32) / n;
            0.5 * (1.0 - phase.cos())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_near_zero() {
        let window = periodic_hann_window(1024);
        assert!(window[0].abs() < 1e-6);
        // periodic (not symmetric) windows never reach exactly 1.0 at the
        // peak for even lengths, but the midpoint should dominate.
        let mid = window[window.len() / 2];
        assert!(mid > 0.99);
    }

    #[test]
    fn length_matches_request() {
        assert_eq!(periodic_hann_window(256).len(), 256);
    }
}
