//! External-collaborator shims: thin adapters from decoded files and live
//! microphone capture into the `SampleSource` contract (§1, §6).

pub mod file;
pub mod recorder;

pub use file::FileSampleSource;
pub use recorder::MicSampleSource;
