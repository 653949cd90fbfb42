//! Shared types for qrmemory records, artifacts, and pipeline stages.

mod record;

pub use record::MemoryRecord;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which payload ended up inside a barcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// The whole record.
    Full,
    /// A reduced record holding a few essential keys.
    Summary,
    /// One or two scalar fields.
    Micro,
}

impl Tier {
    /// Tier to fall back to when this one overflows.
    pub fn next(self) -> Option<Tier> {
        match self {
            Tier::Full => Some(Tier::Summary),
            Tier::Summary => Some(Tier::Micro),
            Tier::Micro => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Full => "full",
            Tier::Summary => "summary",
            Tier::Micro => "micro",
        };
        f.write_str(name)
    }
}

/// Pipeline stage used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Record to JSON text.
    Serialize,
    /// DEFLATE compression or decompression.
    Compress,
    /// Base64 encoding.
    Encode,
    /// QR symbol and raster image generation.
    Render,
    /// Writing a file.
    Write,
    /// Reading a file.
    Read,
    /// JSON text back to a record.
    Parse,
    /// Barcode image or base64 text back to bytes.
    Decode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Serialize => "serialize",
            Stage::Compress => "compress",
            Stage::Encode => "encode",
            Stage::Render => "render",
            Stage::Write => "write",
            Stage::Read => "read",
            Stage::Parse => "parse",
            Stage::Decode => "decode",
        };
        f.write_str(name)
    }
}

/// Sizes of the payload carried by a barcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadStats {
    /// Compact JSON of the record in the barcode.
    pub json_bytes: usize,
    /// Bytes after optional compression.
    pub payload_bytes: usize,
    /// Base64 characters inside the symbol.
    pub encoded_chars: usize,
    pub compressed: bool,
}

impl PayloadStats {
    /// JSON bytes per payload byte; 1.0 for uncompressed payloads.
    pub fn compression_ratio(&self) -> f64 {
        if self.payload_bytes == 0 {
            return 1.0;
        }
        self.json_bytes as f64 / self.payload_bytes as f64
    }
}

/// Files produced from one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedArtifact {
    /// Pretty-printed JSON sidecar; the source of truth.
    pub sidecar: PathBuf,
    /// QR-code PNG export.
    pub barcode: PathBuf,
    /// Payload tier that fit inside the barcode.
    pub tier: Tier,
    /// QR symbol version (1..=40).
    pub qr_version: u8,
    /// Sizes of the payload in the barcode.
    pub stats: PayloadStats,
}

#[cfg(test)]
mod tests {
    use super::{PayloadStats, Stage, Tier};
    use pretty_assertions::assert_eq;

    #[test]
    fn tiers_degrade_in_order() {
        assert_eq!(Tier::Full.next(), Some(Tier::Summary));
        assert_eq!(Tier::Summary.next(), Some(Tier::Micro));
        assert_eq!(Tier::Micro.next(), None);
    }

    #[test]
    fn compression_ratio_divides_json_by_payload() {
        let stats = PayloadStats {
            json_bytes: 300,
            payload_bytes: 120,
            encoded_chars: 160,
            compressed: true,
        };
        assert_eq!(stats.compression_ratio(), 2.5);
        let empty = PayloadStats {
            payload_bytes: 0,
            ..stats
        };
        assert_eq!(empty.compression_ratio(), 1.0);
    }

    #[test]
    fn stage_names_are_lowercase() {
        assert_eq!(Stage::Render.to_string(), "render");
        assert_eq!(
            serde_json::to_string(&Stage::Serialize).expect("json"),
            "\"serialize\""
        );
    }
}
