//! Configuration schema for qrmemory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root config for the persistence pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct QrMemoryConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub sidecar: SidecarConfig,
    #[serde(default)]
    pub payload: PayloadConfig,
    #[serde(default)]
    pub barcode: BarcodeConfig,
    #[serde(default)]
    pub degrade: DegradeConfig,
}

impl QrMemoryConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> QrMemoryConfigBuilder {
        QrMemoryConfigBuilder::new()
    }
}

/// Builder for assembling a `QrMemoryConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct QrMemoryConfigBuilder {
    config: QrMemoryConfig,
}

impl QrMemoryConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: QrMemoryConfig::default(),
        }
    }

    /// Replace the sidecar configuration.
    pub fn sidecar(mut self, sidecar: SidecarConfig) -> Self {
        self.config.sidecar = sidecar;
        self
    }

    /// Set the directory generated artifacts are written to.
    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.sidecar.dir = Some(dir.into());
        self
    }

    /// Set the filename scheme for generated artifacts.
    pub fn naming(mut self, naming: NamingScheme) -> Self {
        self.config.sidecar.naming = naming;
        self
    }

    /// Replace the payload configuration.
    pub fn payload(mut self, payload: PayloadConfig) -> Self {
        self.config.payload = payload;
        self
    }

    /// Replace the barcode configuration.
    pub fn barcode(mut self, barcode: BarcodeConfig) -> Self {
        self.config.barcode = barcode;
        self
    }

    /// Set the barcode error-correction level.
    pub fn error_correction(mut self, level: ErrorCorrection) -> Self {
        self.config.barcode.error_correction = level;
        self
    }

    /// Replace the degrade configuration.
    pub fn degrade(mut self, degrade: DegradeConfig) -> Self {
        self.config.degrade = degrade;
        self
    }

    /// Finalize and return the built `QrMemoryConfig`.
    pub fn build(self) -> QrMemoryConfig {
        self.config
    }
}

/// Where and how sidecar and barcode files are named.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SidecarConfig {
    /// Output directory; the current directory when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub naming: NamingScheme,
}

impl SidecarConfig {
    /// Directory generated artifacts are written to.
    pub fn resolved_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Filename scheme for generated artifacts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NamingScheme {
    /// `<label>_<unix_ts>_<uuid>`; never collides.
    #[default]
    Unique,
    /// `<label>_<unix_ts>`; a second write in the same second replaces the first.
    Timestamp,
}

/// Serializer/compressor settings for the full barcode payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PayloadConfig {
    #[serde(default = "default_compress")]
    pub compress: bool,
    #[serde(default = "default_compression_level")]
    pub compression_level: u32,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            compress: default_compress(),
            compression_level: default_compression_level(),
        }
    }
}

impl PayloadConfig {
    /// Compression level to apply, or None for raw JSON payloads.
    pub fn level(&self) -> Option<u32> {
        self.compress.then_some(self.compression_level)
    }
}

fn default_compress() -> bool {
    true
}

fn default_compression_level() -> u32 {
    6
}

/// QR error-correction level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
pub enum ErrorCorrection {
    /// Recovers ~7% of codewords.
    #[default]
    L,
    /// Recovers ~15% of codewords.
    M,
    /// Recovers ~25% of codewords.
    Q,
    /// Recovers ~30% of codewords.
    H,
}

/// QR symbol rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BarcodeConfig {
    #[serde(default)]
    pub error_correction: ErrorCorrection,
    /// Largest symbol version allowed (1..=40); 40 when unset.
    #[serde(default)]
    pub max_version: Option<u8>,
    /// Pixel width of one module.
    #[serde(default = "default_module_size")]
    pub module_size: u32,
    #[serde(default = "default_quiet_zone")]
    pub quiet_zone: bool,
}

impl Default for BarcodeConfig {
    fn default() -> Self {
        Self {
            error_correction: ErrorCorrection::default(),
            max_version: None,
            module_size: default_module_size(),
            quiet_zone: default_quiet_zone(),
        }
    }
}

impl BarcodeConfig {
    /// Largest symbol version the renderer may use.
    pub fn version_limit(&self) -> u8 {
        self.max_version.unwrap_or(MAX_QR_VERSION)
    }
}

/// Largest QR symbol version defined by ISO/IEC 18004.
pub const MAX_QR_VERSION: u8 = 40;

fn default_module_size() -> u32 {
    10
}

fn default_quiet_zone() -> bool {
    true
}

/// Limits for the summary and micro fallback payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DegradeConfig {
    /// Keys kept in the summary; the record's own keys when empty.
    #[serde(default)]
    pub summary_keys: Vec<String>,
    #[serde(default = "default_summary_max_keys")]
    pub summary_max_keys: usize,
    /// Strings longer than this are cut in the summary.
    #[serde(default = "default_summary_string_chars")]
    pub summary_string_chars: usize,
    /// Decimal digits kept for floats in the summary.
    #[serde(default = "default_float_precision")]
    pub float_precision: u32,
    /// Keys kept in the micro payload; the first numeric fields when empty.
    #[serde(default)]
    pub micro_keys: Vec<String>,
    #[serde(default = "default_micro_max_keys")]
    pub micro_max_keys: usize,
}

impl Default for DegradeConfig {
    fn default() -> Self {
        Self {
            summary_keys: Vec::new(),
            summary_max_keys: default_summary_max_keys(),
            summary_string_chars: default_summary_string_chars(),
            float_precision: default_float_precision(),
            micro_keys: Vec::new(),
            micro_max_keys: default_micro_max_keys(),
        }
    }
}

fn default_summary_max_keys() -> usize {
    5
}

fn default_summary_string_chars() -> usize {
    32
}

fn default_float_precision() -> u32 {
    3
}

fn default_micro_max_keys() -> usize {
    2
}
