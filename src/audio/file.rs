//! `FileSampleSource`: decodes WAV/MP3/OGG/FLAC via `rodio`, resampling and
//! downmixing to the configured processing rate (§6).

use std::fs::File;
use std::io::BufReader;

use rodio::source::UniformSourceIterator;
use rodio::{Decoder, Source};

use crate::error::{DetectiveError, Result};
use crate::sample_source::SampleSource;

/// A bounded, file-backed `SampleSource`.
///
/// Decoding happens eagerly in `new` (teacher idiom: the original
/// `SignatureGenerator::make_signature_from_file` also decodes the whole
/// file up front before windowing); `next_chunk` then just drains an
/// in-memory buffer.
pub struct FileSampleSource {
    samples: std::vec::IntoIter<f32>,
    sample_rate: u32,
}

impl FileSampleSource {
    pub fn new(path: &str, target_sample_rate: u32) -> Result<Self> {
        let file = File::open(path)?;
        let decoder =
            Decoder::new(BufReader::new(file)).map_err(|e| DetectiveError::Decode(e.to_string()))?;

        let uniform: UniformSourceIterator<_, f32> =
            UniformSourceIterator::new(decoder, 1, target_sample_rate);
        let samples: Vec<f32> = uniform.collect();

        Ok(Self {
            samples: samples.into_iter(),
            sample_rate: target_sample_rate,
        })
    }
}

impl SampleSource for FileSampleSource {
    fn next_chunk(&mut self, buf: &mut [f32]) -> Result<usize> {
        let mut n = 0;
        while n < buf.len() {
            match self.samples.next() {
                Some(sample) => {
                    buf[n] = sample;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}
