//! # audio-detective
//!
//! A perceptual audio fingerprinting engine. Given a mono sample stream it
//! produces a compact bit-string fingerprint via sliding-window spectral
//! analysis, log-spaced pitch banding and a 2-D Haar wavelet decomposition;
//! given two streams (or two fingerprints) it scores their acoustic
//! similarity.
//!
//! ## Example
//!
//! ```rust,no_run
//! use audio_detective::{Detective, DetectiveConfig};
//! use audio_detective::audio::FileSampleSource;
//!
//! let config = DetectiveConfig::default();
//! let mut detective = Detective::with_config(config.clone()).unwrap();
//! let mut source = FileSampleSource::new("song.mp3", config.processing_sample_rate).unwrap();
//! let fingerprint = detective.process_bounded(&mut source).unwrap();
//! println!("subfingerprints: {}", fingerprint.count());
//! ```

pub mod audio;
pub mod config;
pub mod detective;
pub mod error;
pub mod fingerprinting;
pub mod output;
pub mod sample_source;

pub use config::DetectiveConfig;
pub use detective::{Detective, DetectiveObserver, DetectiveState};
pub use error::{DetectiveError, Result};
pub use fingerprinting::{Fingerprint, Subfingerprint};
pub use output::{ComparisonResult, FingerprintSummary, OutputFormat};
pub use sample_source::SampleSource;

/// Current version of the library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
