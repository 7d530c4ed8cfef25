//! Component G: the ordered sequence of subfingerprints, its equality,
//! similarity scoring, and canonical binary serialization (§4.G, §6).

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Cursor, Read, Write};

use crate::error::{DetectiveError, Result};
use crate::fingerprinting::subfingerprint::Subfingerprint;

/// An ordered sequence of subfingerprints sharing one `L*P` layout.
///
/// The orchestrator owns a `Fingerprint` while processing and hands a
/// clone to the caller at end-of-stream; fingerprints carry no
/// back-reference to the audio they were built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Fingerprint {
    /// `L * P`, fixed once the first subfingerprint is appended.
    length: Option<usize>,
    subfingerprints: Vec<Subfingerprint>,
}

impl Fingerprint {
    pub fn new() -> Self {
        Self {
            length: None,
            subfingerprints: Vec::new(),
        }
    }

    /// `L * P`, the cell count of the frame each subfingerprint was
    /// derived from. Returns `0` before the first subfingerprint is
    /// appended.
    pub fn length(&self) -> usize {
        self.length.unwrap_or(0)
    }

    pub fn count(&self) -> usize {
        self.subfingerprints.len()
    }

    pub fn at(&self, index: usize) -> &Subfingerprint {
        &self.subfingerprints[index]
    }

    pub fn is_empty(&self) -> bool {
        self.subfingerprints.is_empty()
    }

    /// Appends a subfingerprint. The first call fixes `length()` to
    /// `subfingerprint.len() / 2`; later calls must agree or the
    /// orchestrator has a bug (this is an internal invariant, not a
    /// caller-facing error path — the pipeline always feeds a constant
    /// `L*P` per run).
    pub fn append(&mut self, subfingerprint: Subfingerprint) {
        let cell_count = subfingerprint.len() / 2;
        match self.length {
            None => self.length = Some(cell_count),
            Some(length) => assert_eq!(
                length, cell_count,
                "subfingerprint_length changed after the first append"
            ),
        }
        self.subfingerprints.push(subfingerprint);
    }

    /// Deep copy.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn equals(&self, other: &Self) -> bool {
        self == other
    }

    /// Fraction of matching bits over the first `min(r, len)` positions.
    pub fn subfingerprint_similarity(
        a: &Subfingerprint,
        b: &Subfingerprint,
        r: u32,
    ) -> Result<f32> {
        if r == 0 {
            return Err(DetectiveError::ArgumentInvalid(
                "comparison range must be non-zero".to_string(),
            ));
        }
        if a.len() != b.len() {
            return Err(DetectiveError::ArgumentInvalid(format!(
                "subfingerprint length mismatch: {} vs {}",
                a.len(),
                b.len()
            )));
        }

        let r_prime = (r as usize).min(a.len());
        let matches = a
            .bits()
            .iter()
            .zip(b.bits().iter())
            .take(r_prime)
            .filter(|(x, y)| x == y)
            .count();

        Ok(matches as f32 / r_prime as f32)
    }

    /// Mean subfingerprint similarity over the first `min(count(F1),
    /// count(F2))` subfingerprints; `0.0` if either fingerprint is empty.
    pub fn fingerprint_similarity(f1: &Fingerprint, f2: &Fingerprint, r: u32) -> Result<f32> {
        if f1.length != f2.length && f1.length.is_some() && f2.length.is_some() {
            return Err(DetectiveError::ArgumentInvalid(format!(
                "fingerprint length mismatch: {} vs {}",
                f1.length(),
                f2.length()
            )));
        }

        let n = f1.count().min(f2.count());
        if n == 0 {
            return Ok(0.0);
        }

        let mut total = 0.0f32;
        for i in 0..n {
            total += Self::subfingerprint_similarity(f1.at(i), f2.at(i), r)?;
        }
        Ok(total / n as f32)
    }

    /// Packs the fingerprint into the canonical byte layout: a
    /// `{u32 length, u32 count}` little-endian header followed by each
    /// subfingerprint's bits, LSB-first, padded to a whole byte.
    pub fn serialize(&self) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        out.write_u32::<LittleEndian>(self.length() as u32)?;
        out.write_u32::<LittleEndian>(self.count() as u32)?;

        for sub in &self.subfingerprints {
            out.write_all(&pack_bits(sub.bits()))?;
        }

        Ok(out)
    }

    /// Inverse of `serialize`.
    pub fn deserialize(bytes: &[u8]) -> io::Result<Self> {
        let mut cursor = Cursor::new(bytes);
        let length = cursor.read_u32::<LittleEndian>()? as usize;
        let count = cursor.read_u32::<LittleEndian>()? as usize;

        let bits_per_subfingerprint = 2 * length;
        let bytes_per_subfingerprint = (bits_per_subfingerprint + 7) / 8;

        let mut fingerprint = Fingerprint::new();
        for _ in 0..count {
            let mut packed = vec![0u8; bytes_per_subfingerprint];
            cursor.read_exact(&mut packed)?;
            let bits = unpack_bits(&packed, bits_per_subfingerprint);
            fingerprint.append(Subfingerprint::from_bits(bits));
        }

        Ok(fingerprint)
    }
}

impl Default for Fingerprint {
    fn default() -> Self {
        Self::new()
    }
}

fn pack_bits(bits: &[bool]) -> Vec<u8> {
    let byte_count = (bits.len() + 7) / 8;
    let mut bytes = vec![0u8; byte_count];
    for (i, &bit) in bits.iter().enumerate() {
        if bit {
            bytes[i / 8] |= 1 << (i % 8);
        }
    }
    bytes
}

fn unpack_bits(bytes: &[u8], n_bits: usize) -> Vec<bool> {
    (0..n_bits)
        .map(|i| (bytes[i / 8] >> (i % 8)) & 1 == 1)
        .collect()
}
