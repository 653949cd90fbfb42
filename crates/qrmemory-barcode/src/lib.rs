//! QR-code export of memory records.
//!
//! Renders a payload into a PNG barcode, falling back from the full record to
//! a summary and then a micro payload when the symbol capacity is exceeded,
//! and reads barcodes back into records.

pub mod capacity;
pub mod degrade;
pub mod error;
pub mod reader;
pub mod renderer;

/// Symbol capacity helpers.
pub use capacity::byte_capacity;
/// Summary and micro payload reduction.
pub use degrade::{DegradePolicy, Reduced};
/// Barcode error type.
pub use error::BarcodeError;
/// PNG decoding.
pub use reader::{decode_png, read_payload, read_record};
/// Rendering.
pub use renderer::{BarcodeRenderer, RenderedBarcode};
