//! Createwm command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use stegatool_core::{issue_batch, BitmapFace, GlyphFace, IssuanceConfig, OverlayStyle, Roster};
use tracing::info;

/// Execute the createwm command.
pub fn execute(
    input_dir: PathBuf,
    people_file: PathBuf,
    output_dir: PathBuf,
    font: Option<PathBuf>,
    font_size: f32,
    quiet: bool,
) -> Result<()> {
    let roster = Roster::load(&people_file)
        .with_context(|| format!("Failed to read people file: {}", people_file.display()))?;
    info!(path = %people_file.display(), recipients = roster.len(), "Loaded people file");

    let style = OverlayStyle {
        size_px: font_size,
        ..OverlayStyle::default()
    };
    let face = load_face(font.as_deref(), font_size)?;

    let config = IssuanceConfig::new(input_dir, roster, output_dir)
        .with_style(style)
        .with_face(face);
    let report = issue_batch(&config).context("Failed to create watermarked images")?;

    // The key is only ever surfaced here
    println!("Watermark key: {}", report.key.encode());

    if !quiet {
        eprintln!(
            "{}",
            format!(
                "{} watermarked image(s) written. Store this key safely; it is not saved anywhere.",
                report.outputs.len()
            )
            .dimmed()
        );
    }

    Ok(())
}

#[cfg(feature = "truetype")]
fn load_face(font: Option<&std::path::Path>, font_size: f32) -> Result<Box<dyn GlyphFace>> {
    match font {
        Some(path) => {
            let face = stegatool_core::TrueTypeFace::load(path, font_size)
                .with_context(|| format!("Failed to load font: {}", path.display()))?;
            Ok(Box::new(face))
        }
        None => Ok(Box::new(BitmapFace::from_pixel_size(font_size))),
    }
}

#[cfg(not(feature = "truetype"))]
fn load_face(font: Option<&std::path::Path>, font_size: f32) -> Result<Box<dyn GlyphFace>> {
    if let Some(path) = font {
        return Err(stegatool_core::StegaError::Font {
            path: path.to_path_buf(),
            reason: "built without the `truetype` feature".to_string(),
        })
        .with_context(|| format!("Failed to load font: {}", path.display()));
    }
    Ok(Box::new(BitmapFace::from_pixel_size(font_size)))
}
