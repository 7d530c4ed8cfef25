//! `MicSampleSource`: wraps a `cpal` input stream, buffering
//! callback-delivered samples into an `mpsc` channel the orchestrator
//! drains (§6). Adapted from the teacher's `audio/recorder.rs`.

use std::sync::mpsc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};

use crate::error::{DetectiveError, Result};
use crate::sample_source::SampleSource;

/// A live, unbounded `SampleSource` backed by a `cpal` input stream.
///
/// The stream runs on its own callback thread for the lifetime of this
/// struct; samples are downmixed to mono `f32` in the callback and pushed
/// onto an `mpsc` channel that `next_chunk` drains.
pub struct MicSampleSource {
    receiver: mpsc::Receiver<f32>,
    stream: Stream,
    sample_rate: u32,
}

impl MicSampleSource {
    pub fn new(device_name: Option<&str>) -> Result<Self> {
        let host = cpal::default_host();

        let device = match device_name {
            Some(name) => Self::find_device_by_name(&host, name)?,
            None => host.default_input_device().ok_or_else(|| {
                DetectiveError::SourceFailure("no default input device found".to_string())
            })?,
        };

        let supported_config = device.default_input_config().map_err(|e| {
            DetectiveError::SourceFailure(format!("failed to get default input config: {}", e))
        })?;

        let sample_rate = supported_config.sample_rate().0;
        let channels = supported_config.channels() as usize;

        let (sample_tx, sample_rx) = mpsc::channel();

        let stream_config = StreamConfig {
            channels: supported_config.channels(),
            sample_rate: supported_config.sample_rate(),
            buffer_size: cpal::BufferSize::Default,
        };

        let stream = Self::build_stream(
            &device,
            &stream_config,
            supported_config.sample_format(),
            channels,
            sample_tx,
        )?;

        stream
            .play()
            .map_err(|e| DetectiveError::SourceFailure(format!("failed to start stream: {}", e)))?;

        Ok(Self {
            receiver: sample_rx,
            stream,
            sample_rate,
        })
    }

    fn find_device_by_name(host: &cpal::Host, name: &str) -> Result<Device> {
        let devices = host.input_devices().map_err(|e| {
            DetectiveError::SourceFailure(format!("failed to enumerate input devices: {}", e))
        })?;

        for device in devices {
            if device.name().map(|n| n == name).unwrap_or(false) {
                return Ok(device);
            }
        }

        Err(DetectiveError::SourceFailure(format!(
            "device '{}' not found",
            name
        )))
    }

    fn build_stream(
        device: &Device,
        stream_config: &StreamConfig,
        sample_format: cpal::SampleFormat,
        channels: usize,
        sample_tx: mpsc::Sender<f32>,
    ) -> Result<Stream> {
        let stream = match sample_format {
            cpal::SampleFormat::F32 => device.build_input_stream(
                stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    for frame in data.chunks(channels) {
                        let mono = frame.iter().sum::<f32>() / channels as f32;
                        if sample_tx.send(mono).is_err() {
                            return;
                        }
                    }
                },
                |_err| {},
                None,
            ),
            cpal::SampleFormat::I16 => device.build_input_stream(
                stream_config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    for frame in data.chunks(channels) {
                        let mono =
                            frame.iter().map(|&s| s as f32 / i16::MAX as f32).sum::<f32>()
                                / channels as f32;
                        if sample_tx.send(mono).is_err() {
                            return;
                        }
                    }
                },
                |_err| {},
                None,
            ),
            cpal::SampleFormat::U16 => device.build_input_stream(
                stream_config,
                move |data: &[u16], _: &cpal::InputCallbackInfo| {
                    for frame in data.chunks(channels) {
                        let mono = frame
                            .iter()
                            .map(|&s| (s as i32 - 32768) as f32 / i16::MAX as f32)
                            .sum::<f32>()
                            / channels as f32;
                        if sample_tx.send(mono).is_err() {
                            return;
                        }
                    }
                },
                |_err| {},
                None,
            ),
            other => {
                return Err(DetectiveError::SourceFailure(format!(
                    "unsupported sample format: {:?}",
                    other
                )))
            }
        };

        stream.map_err(|e| DetectiveError::SourceFailure(format!("failed to build stream: {}", e)))
    }

    /// Lists both input and output device names, mirroring the teacher's
    /// `devices` subcommand.
    pub fn list_input_devices() -> Result<Vec<String>> {
        let host = cpal::default_host();
        let input_devices = host.input_devices().map_err(|e| {
            DetectiveError::SourceFailure(format!("failed to enumerate input devices: {}", e))
        })?;
        let output_devices = host.output_devices().map_err(|e| {
            DetectiveError::SourceFailure(format!("failed to enumerate output devices: {}", e))
        })?;

        let mut names = Vec::new();
        for device in input_devices {
            if let Ok(name) = device.name() {
                names.push(name);
            }
        }
        for device in output_devices {
            if let Ok(name) = device.name() {
                names.push(name);
            }
        }

        Ok(names)
    }
}

impl SampleSource for MicSampleSource {
    fn next_chunk(&mut self, buf: &mut [f32]) -> Result<usize> {
        let first = match self.receiver.recv() {
            Ok(sample) => sample,
            Err(_) => return Ok(0),
        };
        buf[0] = first;

        let mut n = 1;
        while n < buf.len() {
            match self.receiver.try_recv() {
                Ok(sample) => {
                    buf[n] = sample;
                    n += 1;
                }
                Err(_) => break,
            }
        }

        Ok(n)
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl Drop for MicSampleSource {
    fn drop(&mut self) {
        let _ = self.stream.pause();
    }
}
