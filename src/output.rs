//! Output formatting for the `detective-cli` binary (§6's CLI demo).

use serde::{Deserialize, Serialize};

use crate::fingerprinting::Fingerprint;

/// Output format selected via `-f/--format` (teacher idiom: `OutputFormat`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable one-liner.
    Simple,
    /// Full JSON with every field.
    Json,
    /// CSV row for logging.
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Simple => write!(f, "Simple"),
            OutputFormat::Json => write!(f, "Json"),
            OutputFormat::Csv => write!(f, "Csv"),
        }
    }
}

/// A fingerprint's summary: subfingerprint count and first
/// subfingerprint's set-bit count, per the `fingerprint` subcommand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FingerprintSummary {
    pub subfingerprint_count: usize,
    pub first_subfingerprint_bits_set: usize,
}

impl FingerprintSummary {
    pub fn from_fingerprint(fingerprint: &Fingerprint) -> Self {
        let first_subfingerprint_bits_set = if fingerprint.count() > 0 {
            fingerprint.at(0).selected_count()
        } else {
            0
        };

        Self {
            subfingerprint_count: fingerprint.count(),
            first_subfingerprint_bits_set,
        }
    }

    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Simple => format!(
                "subfingerprints={} first_subfingerprint_bits_set={}",
                self.subfingerprint_count, self.first_subfingerprint_bits_set
            ),
            OutputFormat::Json => {
                serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Csv => format!(
                "\"{}\",\"{}\"",
                self.subfingerprint_count, self.first_subfingerprint_bits_set
            ),
        }
    }

    pub fn csv_header() -> &'static str {
        "\"SubfingerprintCount\",\"FirstSubfingerprintBitsSet\""
    }
}

/// A two-file similarity score, per the `compare` subcommand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub similarity: f32,
}

impl ComparisonResult {
    pub fn new(similarity: f32) -> Self {
        Self { similarity }
    }

    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Simple => format!("similarity={:.4}", self.similarity),
            OutputFormat::Json => {
                serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Csv => format!("\"{:.4}\"", self.similarity),
        }
    }

    pub fn csv_header() -> &'static str {
        "\"Similarity\""
    }
}
