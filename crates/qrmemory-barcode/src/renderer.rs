//! QR barcode rendering with capacity fallback.

use crate::capacity::fit;
use crate::degrade::DegradePolicy;
use crate::error::BarcodeError;
use image::{GrayImage, ImageFormat, Luma};
use log::{debug, info, warn};
use qrmemory_codec::Payload;
use qrmemory_config::{BarcodeConfig, DegradeConfig, ErrorCorrection, QrMemoryConfig};
use qrmemory_protocol::{MemoryRecord, PayloadStats, Tier};
use qrmemory_store::write_atomic;
use std::io::Cursor;
use std::path::Path;

/// Renders payloads into QR-code images.
#[derive(Debug, Clone)]
pub struct BarcodeRenderer {
    level: ErrorCorrection,
    max_version: u8,
    module_size: u32,
    quiet_zone: bool,
    policy: DegradePolicy,
}

/// A rendered symbol and the payload it carries.
#[derive(Debug, Clone)]
pub struct RenderedBarcode {
    /// Tier that fit.
    pub tier: Tier,
    /// Base64 text inside the symbol.
    pub payload: String,
    /// Symbol version (1..=40).
    pub version: u8,
    /// Sizes of the payload in the symbol.
    pub stats: PayloadStats,
    image: GrayImage,
}

impl RenderedBarcode {
    /// Rasterized symbol.
    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    /// PNG-encoded image bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, BarcodeError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(BarcodeError::Image)?;
        Ok(bytes)
    }

    /// Write the PNG atomically, replacing any existing file.
    pub fn write_png(&self, path: &Path) -> Result<(), BarcodeError> {
        let bytes = self.to_png()?;
        write_atomic(path, &bytes)?;
        Ok(())
    }
}

impl BarcodeRenderer {
    pub fn new(barcode: &BarcodeConfig, degrade: &DegradeConfig) -> Self {
        Self {
            level: barcode.error_correction,
            max_version: barcode.version_limit(),
            module_size: barcode.module_size.max(1),
            quiet_zone: barcode.quiet_zone,
            policy: DegradePolicy::new(degrade.clone()),
        }
    }

    pub fn from_config(config: &QrMemoryConfig) -> Self {
        Self::new(&config.barcode, &config.degrade)
    }

    /// Render the full payload of `record`, degrading to summary and micro
    /// payloads when it does not fit.
    ///
    /// `full` is the payload built from `record`; the record itself is needed
    /// to derive the reduced tiers. Fails with `CapacityOverflow` when not even
    /// the micro payload fits.
    pub fn render(
        &self,
        record: &MemoryRecord,
        full: &Payload,
    ) -> Result<RenderedBarcode, BarcodeError> {
        let mut tier = Tier::Full;
        let mut candidate = Some((full.encode(), full.stats(record)?));
        let mut attempted = Tier::Full;
        let mut smallest = full.encoded_len();

        loop {
            if let Some((text, stats)) = candidate.take() {
                if let Some(rendered) = self.try_tier(tier, &text, stats)? {
                    return Ok(rendered);
                }
                warn!(
                    "payload overflowed qr capacity (tier={}, chars={}, level={:?}, max_version={})",
                    tier,
                    text.len(),
                    self.level,
                    self.max_version
                );
                attempted = tier;
                smallest = text.len();
            }
            let Some(next) = tier.next() else {
                return Err(BarcodeError::CapacityOverflow {
                    tier: attempted,
                    len: smallest,
                    level: self.level,
                    max_version: self.max_version,
                });
            };
            tier = next;
            candidate = match self.policy.reduce(record, tier, smallest)? {
                Some(reduced) => Some((
                    reduced.payload.encode(),
                    reduced.payload.stats(&reduced.record)?,
                )),
                None => {
                    debug!("skipping tier with no shorter payload (tier={tier})");
                    None
                }
            };
        }
    }

    /// Render and write the PNG to `path`.
    pub fn render_to_path(
        &self,
        record: &MemoryRecord,
        full: &Payload,
        path: &Path,
    ) -> Result<RenderedBarcode, BarcodeError> {
        let rendered = self.render(record, full)?;
        rendered.write_png(path)?;
        info!(
            "barcode written (path={}, tier={}, version={})",
            path.display(),
            rendered.tier,
            rendered.version
        );
        Ok(rendered)
    }

    fn try_tier(
        &self,
        tier: Tier,
        text: &str,
        stats: PayloadStats,
    ) -> Result<Option<RenderedBarcode>, BarcodeError> {
        let Some((code, version)) = fit(text, self.level, self.max_version)? else {
            return Ok(None);
        };
        let image = code
            .render::<Luma<u8>>()
            .quiet_zone(self.quiet_zone)
            .module_dimensions(self.module_size, self.module_size)
            .build();
        debug!(
            "rendered barcode (tier={}, version={}, chars={}, px={})",
            tier,
            version,
            text.len(),
            image.width()
        );
        Ok(Some(RenderedBarcode {
            tier,
            payload: text.to_string(),
            version,
            stats,
            image,
        }))
    }
}
