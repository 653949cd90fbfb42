//! JSON sidecar storage for memory records.
//!
//! The sidecar file is the source of truth for a persisted record: it is
//! written atomically as pretty-printed JSON and is the only artifact `load`
//! reads back.

pub mod error;
pub mod fs;
pub mod naming;
pub mod store;

/// Store error type.
pub use error::StoreError;
/// Atomic file replacement.
pub use fs::write_atomic;
/// Artifact filename generation.
pub use naming::{ArtifactName, validate_label};
/// Sidecar store and loader.
pub use store::SidecarStore;
