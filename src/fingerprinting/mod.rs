//! The sliding-window STFT -> pitch-band -> Haar-wavelet fingerprinting
//! pipeline (§4, Components A-G).

pub mod fingerprint;
pub mod frame;
pub mod hanning;
pub mod pitch;
pub mod spectral;
pub mod subfingerprint;
pub mod windower;

pub use fingerprint::Fingerprint;
pub use frame::FrameBuffer;
pub use pitch::PitchBinner;
pub use spectral::SpectralAnalyzer;
pub use subfingerprint::{extract_subfingerprint, Subfingerprint};
pub use windower::Windower;
