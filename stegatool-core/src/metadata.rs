//! PNG text-chunk embedding and extraction.
//!
//! The marker token rides in a `tEXt` chunk, independent of pixel data. All
//! issued images are PNG-encoded whatever their file extension.

use std::io::Cursor;

use image::DynamicImage;

use crate::error::Result;

/// Text chunk keyword holding the encrypted marker.
pub const WATERMARK_FIELD: &str = "watermark";

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Serialize `image` as an 8-bit PNG carrying one `tEXt` chunk.
///
/// Images with an alpha channel are written as RGBA, everything else as RGB.
/// The text chunk is written ahead of the image data.
pub fn embed_text_field(image: &DynamicImage, field: &str, value: &str) -> Result<Vec<u8>> {
    let (color, data) = if image.color().has_alpha() {
        (png::ColorType::Rgba, image.to_rgba8().into_raw())
    } else {
        (png::ColorType::Rgb, image.to_rgb8().into_raw())
    };

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, image.width(), image.height());
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.add_text_chunk(field.to_string(), value.to_string())?;

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&data)?;
        writer.finish()?;
    }

    Ok(out)
}

/// Read the value of the text field named `field`.
///
/// Returns `Ok(None)` for non-PNG containers and for PNGs without the field.
/// `tEXt`, `zTXt` and `iTXt` chunks placed before the image data are
/// searched, in that order.
pub fn read_text_field(bytes: &[u8], field: &str) -> Result<Option<String>> {
    if !is_png(bytes) {
        return Ok(None);
    }

    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_ignore_text_chunk(false);
    let reader = decoder.read_info()?;
    let info = reader.info();

    if let Some(chunk) = info
        .uncompressed_latin1_text
        .iter()
        .find(|chunk| chunk.keyword == field)
    {
        return Ok(Some(chunk.text.clone()));
    }

    if let Some(chunk) = info
        .compressed_latin1_text
        .iter()
        .find(|chunk| chunk.keyword == field)
    {
        return Ok(Some(chunk.get_text()?));
    }

    if let Some(chunk) = info.utf8_text.iter().find(|chunk| chunk.keyword == field) {
        return Ok(Some(chunk.get_text()?));
    }

    Ok(None)
}

/// Check the 8-byte PNG signature.
pub fn is_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
}
