//! Component H: the orchestrator that drives A->B->C->D->E->F->G and owns
//! configuration and lifecycle (§4.H, state machine, §5).

use std::sync::Mutex;

use tracing::{debug, info};

use crate::config::DetectiveConfig;
use crate::error::{DetectiveError, Result};
use crate::fingerprinting::{
    extract_subfingerprint, Fingerprint, FrameBuffer, PitchBinner, SpectralAnalyzer, Windower,
};
use crate::sample_source::SampleSource;

/// Re-expression of the original C callback-with-helper-pointer: invoked
/// once per appended subfingerprint.
pub trait DetectiveObserver: Send + Sync {
    fn on_subfingerprint(&self, index: usize, total_samples_consumed: u64);
}

struct NoopObserver;

impl DetectiveObserver for NoopObserver {
    fn on_subfingerprint(&self, _index: usize, _total_samples_consumed: u64) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectiveState {
    Idle,
    Running,
    Paused,
    Stopped,
}

/// Samples pulled from a `SampleSource` per `next_chunk` call during
/// bounded processing.
const READ_CHUNK_SAMPLES: usize = 4096;

/// Drives the fingerprinting pipeline. Owns the working buffers for every
/// component and a `Mutex<DetectiveState>` control plane so the lifecycle
/// can be queried/controlled independently of the pipeline thread (§5).
pub struct Detective {
    config: DetectiveConfig,
    state: Mutex<DetectiveState>,
    windower: Windower,
    spectral: SpectralAnalyzer,
    pitch: PitchBinner,
    frame: FrameBuffer,
    fingerprint: Fingerprint,
    observer: Box<dyn DetectiveObserver>,
    samples_consumed: u64,
    last_exhausted: bool,
}

impl Detective {
    pub fn new() -> Self {
        Self::with_config(DetectiveConfig::default()).expect("default config is always valid")
    }

    pub fn with_config(config: DetectiveConfig) -> Result<Self> {
        config.validate()?;
        info!(
            window_size = config.window_size,
            analysis_stride = config.analysis_stride,
            pitch_steps = config.pitch_steps,
            subfingerprint_length = config.subfingerprint_length,
            top_wavelets = config.top_wavelets,
            "detective configured"
        );

        let windower = Windower::new(config.window_size, config.analysis_stride);
        let spectral = SpectralAnalyzer::new(config.window_size);
        let pitch = PitchBinner::new(
            config.window_size,
            config.processing_sample_rate,
            config.pitch_steps,
        );
        let frame = FrameBuffer::new(config.subfingerprint_length, config.pitch_steps);

        Ok(Self {
            config,
            state: Mutex::new(DetectiveState::Idle),
            windower,
            spectral,
            pitch,
            frame,
            fingerprint: Fingerprint::new(),
            observer: Box::new(NoopObserver),
            samples_consumed: 0,
            last_exhausted: false,
        })
    }

    pub fn config(&self) -> &DetectiveConfig {
        &self.config
    }

    pub fn state(&self) -> DetectiveState {
        *self.state.lock().expect("state mutex poisoned")
    }

    /// Whether the most recently completed bounded run produced zero
    /// subfingerprints (§7's `Exhausted` distinguishing signal).
    pub fn last_exhausted(&self) -> bool {
        self.last_exhausted
    }

    pub fn set_observer(&mut self, observer: Box<dyn DetectiveObserver>) {
        self.observer = observer;
    }

    /// Replaces the configuration. Only legal while `Idle`.
    pub fn set_config(&mut self, config: DetectiveConfig) -> Result<()> {
        if self.state() != DetectiveState::Idle {
            return Err(DetectiveError::ArgumentInvalid(
                "configuration cannot change outside the Idle state".to_string(),
            ));
        }
        config.validate()?;

        self.windower = Windower::new(config.window_size, config.analysis_stride);
        self.spectral = SpectralAnalyzer::new(config.window_size);
        self.pitch = PitchBinner::new(
            config.window_size,
            config.processing_sample_rate,
            config.pitch_steps,
        );
        self.frame = FrameBuffer::new(config.subfingerprint_length, config.pitch_steps);
        self.config = config;
        Ok(())
    }

    /// Resets the Detective back to `Idle`: clears the buffered frame and
    /// fingerprint while keeping the configuration.
    pub fn reset(&mut self) {
        self.windower = Windower::new(self.config.window_size, self.config.analysis_stride);
        self.frame.reset();
        self.fingerprint = Fingerprint::new();
        self.samples_consumed = 0;
        self.last_exhausted = false;
        *self.state.lock().expect("state mutex poisoned") = DetectiveState::Idle;
    }

    /// Bounded mode: pulls from `source` until it drains, driving the
    /// pipeline, and returns the accumulated fingerprint.
    pub fn process_bounded(&mut self, source: &mut dyn SampleSource) -> Result<Fingerprint> {
        *self.state.lock().expect("state mutex poisoned") = DetectiveState::Running;

        let mut buf = vec![0.0f32; READ_CHUNK_SAMPLES];
        loop {
            match source.next_chunk(&mut buf) {
                Ok(0) => break,
                Ok(n) => self.feed_locked(&buf[..n]),
                Err(e) => {
                    // Leaves no partial state behind for a reused instance.
                    self.reset();
                    return Err(e);
                }
            }
        }

        *self.state.lock().expect("state mutex poisoned") = DetectiveState::Stopped;
        let fingerprint = self.fingerprint.copy();
        self.last_exhausted = fingerprint.count() == 0;
        self.reset();
        Ok(fingerprint)
    }

    /// Unbounded mode: transitions `Idle -> Running` and accepts the first
    /// batch of samples, if any.
    pub fn start(&mut self) {
        *self.state.lock().expect("state mutex poisoned") = DetectiveState::Running;
        debug!(state = ?DetectiveState::Running, "state transition");
    }

    /// Feeds samples while `Running`; a no-op while `Paused` so buffered
    /// samples are simply not advanced further (§5's suspension points are
    /// only ever observed between whole frames, which `Windower` already
    /// guarantees by construction).
    pub fn feed(&mut self, samples: &[f32]) -> Result<()> {
        if self.state() != DetectiveState::Running {
            return Ok(());
        }
        self.feed_locked(samples);
        Ok(())
    }

    pub fn pause(&mut self) {
        let mut state = self.state.lock().expect("state mutex poisoned");
        if *state == DetectiveState::Running {
            *state = DetectiveState::Paused;
            debug!(state = ?DetectiveState::Paused, "state transition");
        }
    }

    pub fn resume(&mut self) {
        let mut state = self.state.lock().expect("state mutex poisoned");
        if *state == DetectiveState::Paused {
            *state = DetectiveState::Running;
            debug!(state = ?DetectiveState::Running, "state transition");
        }
    }

    /// Stops the pipeline. A partially filled frame is discarded, never
    /// synthesised into a terminal subfingerprint. Returns the
    /// fingerprint accumulated so far.
    pub fn stop(&mut self) -> Fingerprint {
        *self.state.lock().expect("state mutex poisoned") = DetectiveState::Stopped;
        debug!(state = ?DetectiveState::Stopped, "state transition");
        self.frame.reset();
        self.fingerprint.copy()
    }

    fn feed_locked(&mut self, samples: &[f32]) {
        self.windower.push(samples);
        self.samples_consumed += samples.len() as u64;

        while let Some(frame) = self.windower.pop_frame() {
            let magnitudes = self.spectral.analyze(&frame);
            let row = self.pitch.bin(&magnitudes);
            self.frame.push_row(&row);

            if self.frame.is_full() {
                self.frame.decompose();
                let subfingerprint =
                    extract_subfingerprint(self.frame.coefficients(), self.config.top_wavelets);
                self.frame.reset();
                self.fingerprint.append(subfingerprint);
                debug!(
                    index = self.fingerprint.count() - 1,
                    total_samples_consumed = self.samples_consumed,
                    "subfingerprint appended"
                );
                self.observer
                    .on_subfingerprint(self.fingerprint.count() - 1, self.samples_consumed);
            }
        }
    }

    /// Fingerprints two sources under `config` and scores their similarity
    /// over `r` bits. Both sides are fingerprinted under the same
    /// configuration so the comparison is meaningful.
    pub fn compare(
        config: &DetectiveConfig,
        source_a: &mut dyn SampleSource,
        source_b: &mut dyn SampleSource,
        r: u32,
    ) -> Result<f32> {
        let mut a = Detective::with_config(config.clone())?;
        let mut b = Detective::with_config(config.clone())?;
        let fingerprint_a = a.process_bounded(source_a)?;
        let fingerprint_b = b.process_bounded(source_b)?;
        Fingerprint::fingerprint_similarity(&fingerprint_a, &fingerprint_b, r)
    }
}

impl Default for Detective {
    fn default() -> Self {
        Self::new()
    }
}
