//! The `SampleSource` contract: a lazy, mono, 32-bit-float sample stream at
//! a known rate (§6). Concrete adapters live under `audio::`.

use crate::error::Result;

/// A non-restartable source of mono float samples at a fixed rate.
///
/// `next_chunk` writes as many samples as are currently available into
/// `buf` (up to `buf.len()`) and returns the count written; `0` means
/// end-of-stream. Implementations never block indefinitely on a finite
/// source — a file source returns `0` once the decoder is drained; a live
/// source blocks only as long as its underlying device does.
pub trait SampleSource {
    fn next_chunk(&mut self, buf: &mut [f32]) -> Result<usize>;

    /// The rate, in Hz, samples from this source are delivered at.
    fn sample_rate(&self) -> u32;
}

/// An in-memory `SampleSource` over a fixed slice of samples, used by
/// tests and by `Detective::compare` style call sites that already hold
/// decoded audio in memory.
pub struct SliceSampleSource<'a> {
    samples: &'a [f32],
    sample_rate: u32,
    cursor: usize,
}

impl<'a> SliceSampleSource<'a> {
    pub fn new(samples: &'a [f32], sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
            cursor: 0,
        }
    }
}

impl<'a> SampleSource for SliceSampleSource<'a> {
    fn next_chunk(&mut self, buf: &mut [f32]) -> Result<usize> {
        let remaining = self.samples.len() - self.cursor;
        let n = remaining.min(buf.len());
        buf[..n].copy_from_slice(&self.samples[self.cursor..self.cursor + n]);
        self.cursor += n;
        Ok(n)
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}
