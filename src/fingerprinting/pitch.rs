//! Component C: collapses FFT magnitude bins into log-spaced pitch bands (§4.C).

use crate::config::{PITCH_BAND_HIGH_HZ, PITCH_BAND_LOW_HZ};

/// Precomputes the `[k_lo, k_hi)` bin ranges for each of `pitch_steps`
/// log-spaced bands between `PITCH_BAND_LOW_HZ` and `PITCH_BAND_HIGH_HZ`,
/// then sums FFT magnitudes into one row per call to `bin`.
pub struct PitchBinner {
    /// `(k_lo, k_hi)` per band, precomputed once per configuration.
    ranges: Vec<(usize, usize)>,
}

impl PitchBinner {
    pub fn new(window_size: u32, sample_rate: u32, pitch_steps: u32) -> Self {
        let half_window = (window_size / 2) as usize;
        let bin_hz = sample_rate as f32 / window_size as f32;
        let ratio = (PITCH_BAND_HIGH_HZ / PITCH_BAND_LOW_HZ).powf(1.0 / pitch_steps as f32);

        let ranges = (0..pitch_steps)
            .map(|p| {
                let f_lo = PITCH_BAND_LOW_HZ * ratio.powi(p as i32);
                let f_hi = PITCH_BAND_LOW_HZ * ratio.powi(p as i32 + 1);

                let k_lo = (f_lo / bin_hz).ceil().max(0.0) as usize;
                let k_hi = (f_hi / bin_hz).ceil().max(0.0) as usize;

                (k_lo.min(half_window), k_hi.min(half_window))
            })
            .collect();

        Self { ranges }
    }

    /// Number of pitch bands produced by `bin`.
    pub fn pitch_steps(&self) -> usize {
        self.ranges.len()
    }

    /// Sums `magnitudes` within each band's precomputed bin range. Empty
    /// ranges (`k_lo == k_hi`) yield `0.0`.
    pub fn bin(&self, magnitudes: &[f32]) -> Vec<f32> {
        self.ranges
            .iter()
            .map(|&(lo, hi)| {
                if lo >= hi {
                    0.0
                } else {
                    magnitudes[lo..hi].iter().sum()
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_one_range_per_band() {
        let binner = PitchBinner::new(1024, 5512, 32);
        assert_eq!(binner.pitch_steps(), 32);
    }

    #[test]
    fn bands_are_non_decreasing_and_in_range() {
        let binner = PitchBinner::new(1024, 5512, 32);
        let half_window = 512;
        let mut prev_hi = 0usize;
        for &(lo, hi) in &binner.ranges {
            assert!(lo <= hi);
            assert!(hi <= half_window);
            assert!(lo >= prev_hi || lo == prev_hi);
            prev_hi = hi.max(prev_hi);
        }
    }

    #[test]
    fn empty_band_sums_to_zero() {
        let binner = PitchBinner {
            ranges: vec![(3, 3), (0, 2)],
        };
        let magnitudes = vec![1.0, 2.0, 3.0, 4.0];
        let row = binner.bin(&magnitudes);
        assert_eq!(row[0], 0.0);
        assert_eq!(row[1], 3.0);
    }

    #[test]
    fn sums_magnitudes_within_range() {
        let binner = PitchBinner {
            ranges: vec![(0, 3)],
        };
        let magnitudes = vec![1.0, 2.0, 3.0, 100.0];
        assert_eq!(binner.bin(&magnitudes), vec![6.0]);
    }
}
