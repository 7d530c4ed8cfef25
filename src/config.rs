//! Detective configuration: the parameters fixed once per run (§3).

use serde::{Deserialize, Serialize};

use crate::error::{DetectiveError, Result};

/// Samples per FFT.
pub const DEFAULT_WINDOW_SIZE: u32 = 1024;
/// Samples advanced between successive FFTs.
pub const DEFAULT_ANALYSIS_STRIDE: u32 = 512;
/// Number of logarithmic pitch bands.
pub const DEFAULT_PITCH_STEPS: u32 = 32;
/// FFT rows gathered into one subfingerprint.
pub const DEFAULT_SUBFINGERPRINT_LENGTH: u32 = 32;
/// Strongest wavelet coefficients retained per subfingerprint.
pub const DEFAULT_TOP_WAVELETS: u32 = 200;
/// Default bits considered by `fingerprint_similarity`/`subfingerprint_similarity`.
pub const DEFAULT_COMPARISON_RANGE: u32 = 2 * DEFAULT_SUBFINGERPRINT_LENGTH * DEFAULT_PITCH_STEPS;
/// Default processing sample rate in Hz.
pub const DEFAULT_PROCESSING_SAMPLE_RATE: u32 = 5512;
/// Default recording sample rate in Hz, permitted for live capture.
pub const DEFAULT_RECORDING_SAMPLE_RATE: u32 = 44100;

/// Low edge of the pitch-band range, in Hz.
pub const PITCH_BAND_LOW_HZ: f32 = 318.0;
/// High edge of the pitch-band range, in Hz.
pub const PITCH_BAND_HIGH_HZ: f32 = 2000.0;

/// Configuration for a [`crate::detective::Detective`].
///
/// Mutation is only legal while the owning `Detective` is `Idle`; the
/// `Detective` enforces that rule, this struct only carries the values
/// and their local validity checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectiveConfig {
    pub window_size: u32,
    pub analysis_stride: u32,
    pub pitch_steps: u32,
    pub subfingerprint_length: u32,
    pub top_wavelets: u32,
    pub processing_sample_rate: u32,
    pub recording_sample_rate: u32,
}

impl Default for DetectiveConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            analysis_stride: DEFAULT_ANALYSIS_STRIDE,
            pitch_steps: DEFAULT_PITCH_STEPS,
            subfingerprint_length: DEFAULT_SUBFINGERPRINT_LENGTH,
            top_wavelets: DEFAULT_TOP_WAVELETS,
            processing_sample_rate: DEFAULT_PROCESSING_SAMPLE_RATE,
            recording_sample_rate: DEFAULT_RECORDING_SAMPLE_RATE,
        }
    }
}

impl DetectiveConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window_size(mut self, window_size: u32) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_analysis_stride(mut self, analysis_stride: u32) -> Self {
        self.analysis_stride = analysis_stride;
        self
    }

    pub fn with_pitch_steps(mut self, pitch_steps: u32) -> Self {
        self.pitch_steps = pitch_steps;
        self
    }

    pub fn with_subfingerprint_length(mut self, subfingerprint_length: u32) -> Self {
        self.subfingerprint_length = subfingerprint_length;
        self
    }

    pub fn with_top_wavelets(mut self, top_wavelets: u32) -> Self {
        self.top_wavelets = top_wavelets;
        self
    }

    pub fn with_processing_sample_rate(mut self, sample_rate: u32) -> Self {
        self.processing_sample_rate = sample_rate;
        self
    }

    pub fn with_recording_sample_rate(mut self, sample_rate: u32) -> Self {
        self.recording_sample_rate = sample_rate;
        self
    }

    /// Number of columns/rows in one frame matrix (`L * P`).
    pub fn frame_cells(&self) -> u32 {
        self.subfingerprint_length * self.pitch_steps
    }

    /// Bits per subfingerprint (`2 * L * P`).
    pub fn subfingerprint_bits(&self) -> u32 {
        2 * self.frame_cells()
    }

    /// Validates the combination of parameters against §4.E/§4.F/§7's rules.
    pub fn validate(&self) -> Result<()> {
        if !self.window_size.is_power_of_two() {
            return Err(DetectiveError::ArgumentInvalid(format!(
                "window_size {} must be a power of two",
                self.window_size
            )));
        }
        if !self.subfingerprint_length.is_power_of_two() {
            return Err(DetectiveError::ArgumentInvalid(format!(
                "subfingerprint_length {} must be a power of two",
                self.subfingerprint_length
            )));
        }
        if !self.pitch_steps.is_power_of_two() {
            return Err(DetectiveError::ArgumentInvalid(format!(
                "pitch_steps {} must be a power of two",
                self.pitch_steps
            )));
        }
        if self.analysis_stride == 0 {
            return Err(DetectiveError::ArgumentInvalid(
                "analysis_stride must be non-zero".to_string(),
            ));
        }
        if self.analysis_stride > self.window_size {
            return Err(DetectiveError::ArgumentInvalid(format!(
                "analysis_stride {} must not exceed window_size {}",
                self.analysis_stride, self.window_size
            )));
        }
        if self.top_wavelets > self.frame_cells() {
            return Err(DetectiveError::ArgumentInvalid(format!(
                "top_wavelets {} exceeds L*P {}",
                self.top_wavelets,
                self.frame_cells()
            )));
        }
        if self.processing_sample_rate == 0 {
            return Err(DetectiveError::ArgumentInvalid(
                "processing_sample_rate must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| DetectiveError::ConfigFile(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &str) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| DetectiveError::ConfigFile(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(DetectiveConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_power_of_two_window() {
        let config = DetectiveConfig::new().with_window_size(1000);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_power_of_two_pitch_steps() {
        let config = DetectiveConfig::new().with_pitch_steps(30);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_top_wavelets_over_capacity() {
        let config = DetectiveConfig::new()
            .with_subfingerprint_length(4)
            .with_pitch_steps(4)
            .with_top_wavelets(17);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_stride_above_window() {
        let config = DetectiveConfig::new().with_analysis_stride(2048);
        assert!(config.validate().is_err());
    }

    #[test]
    fn builder_chain_round_trips() {
        let config = DetectiveConfig::new()
            .with_window_size(2048)
            .with_analysis_stride(1024)
            .with_pitch_steps(16)
            .with_subfingerprint_length(16)
            .with_top_wavelets(50);
        assert_eq!(config.window_size, 2048);
        assert_eq!(config.frame_cells(), 256);
        assert_eq!(config.subfingerprint_bits(), 512);
    }
}
