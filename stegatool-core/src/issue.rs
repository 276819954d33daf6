//! Issuance: fan one batch of images out to every roster entry.

use std::fs;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::{debug, info};

use crate::cipher::{self, BatchKey};
use crate::error::{Result, StegaError};
use crate::marker;
use crate::metadata::{embed_text_field, WATERMARK_FIELD};
use crate::overlay::{render_overlay, BitmapFace, GlyphFace, OverlayStyle};
use crate::roster::Roster;
use crate::scan::{output_file_name, scan_images};

/// Everything one issuance run needs.
pub struct IssuanceConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub roster: Roster,
    pub style: OverlayStyle,
    pub face: Box<dyn GlyphFace>,
}

impl IssuanceConfig {
    /// Default style and the built-in bitmap face.
    pub fn new(
        input_dir: impl Into<PathBuf>,
        roster: Roster,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        let style = OverlayStyle::default();
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            roster,
            face: Box::new(BitmapFace::from_pixel_size(style.size_px)),
            style,
        }
    }

    pub fn with_style(mut self, style: OverlayStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_face(mut self, face: Box<dyn GlyphFace>) -> Self {
        self.face = face;
        self
    }
}

/// Result of a completed issuance run.
#[derive(Debug)]
pub struct IssuanceReport {
    /// The run's batch key. Not stored anywhere else.
    pub key: BatchKey,
    /// Written files, in processing order.
    pub outputs: Vec<PathBuf>,
}

/// Run issuance under a freshly generated batch key.
///
/// Stops at the first read, decode, encode or write error. Files written
/// before the failure are left in place, and existing files with the same
/// output name are overwritten.
pub fn issue_batch(config: &IssuanceConfig) -> Result<IssuanceReport> {
    issue_batch_with_key(config, BatchKey::generate())
}

/// Run issuance under a caller-supplied key.
pub fn issue_batch_with_key(config: &IssuanceConfig, key: BatchKey) -> Result<IssuanceReport> {
    let images = scan_images(&config.input_dir)?;
    info!(
        input_dir = %config.input_dir.display(),
        images = images.len(),
        recipients = config.roster.len(),
        "Starting issuance"
    );

    let mut outputs = Vec::with_capacity(images.len() * config.roster.len());
    for scanned in &images {
        let image = load_image(&scanned.path)?;

        for name in config.roster.names() {
            let bytes = watermark_one(&image, name, &key, &config.style, config.face.as_ref())?;
            let output = config
                .output_dir
                .join(output_file_name(&scanned.file_name, name));
            fs::write(&output, &bytes).map_err(|e| StegaError::write(&output, e))?;

            debug!(output = %output.display(), bytes = bytes.len(), "Wrote watermarked image");
            outputs.push(output);
        }
    }

    info!(outputs = outputs.len(), "Issuance complete");
    Ok(IssuanceReport { key, outputs })
}

/// Watermark one image for one recipient and return the encoded PNG.
pub fn watermark_one(
    image: &DynamicImage,
    name: &str,
    key: &BatchKey,
    style: &OverlayStyle,
    face: &dyn GlyphFace,
) -> Result<Vec<u8>> {
    let text = marker::build(name);
    let marked = render_overlay(image, &text, style, face);
    let token = cipher::encrypt(key, text.as_bytes())?;
    embed_text_field(&marked, WATERMARK_FIELD, &token)
}

/// Decode an image, sniffing the format from its content.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let bytes = fs::read(path).map_err(|e| StegaError::read(path, e))?;
    image::load_from_memory(&bytes).map_err(|source| StegaError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })
}
