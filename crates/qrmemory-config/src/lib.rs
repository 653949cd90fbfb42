//! Configuration model and loading for qrmemory.
//!
//! Every tunable the pipeline uses (compression level, error correction,
//! degrade limits, sidecar naming) lives in one immutable `QrMemoryConfig`
//! that callers pass explicitly into the components that need it.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// Default location of the user config file.
pub use loader::default_config_path;
/// Configuration schema models.
pub use model::*;
