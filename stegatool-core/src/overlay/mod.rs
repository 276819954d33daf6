//! Visible text overlay.
//!
//! The overlay is anchored to the bottom-right corner with a fixed margin
//! and alpha-blended with a semi-transparent fill. Rendering is
//! deterministic for a given image, text, face and style, and never changes
//! image dimensions.
//!
//! # Faces
//!
//! - [`BitmapFace`]: built-in 8x8 glyphs scaled by an integer factor. Needs
//!   no font file.
//! - [`TrueTypeFace`]: any TrueType/OpenType font file (feature `truetype`).

mod bitmap;
#[cfg(feature = "truetype")]
mod truetype;

pub use bitmap::BitmapFace;
#[cfg(feature = "truetype")]
pub use truetype::TrueTypeFace;

use image::{DynamicImage, Rgba};

/// Something that can measure and rasterize a line of text.
pub trait GlyphFace {
    /// Size in pixels of the box `text` occupies when rasterized.
    fn measure(&self, text: &str) -> (u32, u32);

    /// Rasterize `text` with the top-left of its box at `origin`.
    ///
    /// `plot` receives canvas coordinates and a coverage in `0.0..=1.0`.
    /// Coordinates may fall outside the canvas.
    fn rasterize(&self, text: &str, origin: (i64, i64), plot: &mut dyn FnMut(i64, i64, f32));
}

/// Placement and colour of the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    /// Gap between the text box and the right/bottom edges, in pixels.
    pub margin: u32,
    /// RGBA fill; the alpha component sets the opacity.
    pub fill: [u8; 4],
    /// Nominal text height in pixels.
    pub size_px: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            margin: 10,
            fill: [255, 255, 255, 128],
            size_px: 36.0,
        }
    }
}

/// Draw `text` onto a copy of `image`.
///
/// Text that does not fit is clipped at the image edges.
pub fn render_overlay(
    image: &DynamicImage,
    text: &str,
    style: &OverlayStyle,
    face: &dyn GlyphFace,
) -> DynamicImage {
    let mut canvas = image.to_rgba8();
    let (width, height) = canvas.dimensions();
    let (text_width, text_height) = face.measure(text);

    let x = i64::from(width) - i64::from(text_width) - i64::from(style.margin);
    let y = i64::from(height) - i64::from(text_height) - i64::from(style.margin);

    face.rasterize(text, (x, y), &mut |px: i64, py: i64, coverage: f32| {
        if px < 0 || py < 0 || px >= i64::from(width) || py >= i64::from(height) {
            return;
        }
        blend(canvas.get_pixel_mut(px as u32, py as u32), style.fill, coverage);
    });

    if image.color().has_alpha() {
        DynamicImage::ImageRgba8(canvas)
    } else {
        DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(canvas).to_rgb8())
    }
}

/// Source-over blend of `fill` at `coverage` onto `pixel`.
fn blend(pixel: &mut Rgba<u8>, fill: [u8; 4], coverage: f32) {
    let alpha = f32::from(fill[3]) / 255.0 * coverage.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }

    for channel in 0..3 {
        let src = f32::from(pixel.0[channel]);
        let mixed = src + (f32::from(fill[channel]) - src) * alpha;
        pixel.0[channel] = mixed.round().clamp(0.0, 255.0) as u8;
    }

    let dst_alpha = f32::from(pixel.0[3]);
    pixel.0[3] = (dst_alpha + (255.0 - dst_alpha) * alpha)
        .round()
        .clamp(0.0, 255.0) as u8;
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage, RgbaImage};

    fn black(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([0, 0, 0])))
    }

    #[test]
    fn test_default_style() {
        let style = OverlayStyle::default();
        assert_eq!(style.margin, 10);
        assert_eq!(style.fill, [255, 255, 255, 128]);
    }

    #[test]
    fn test_overlay_is_bottom_right_anchored() {
        let image = black(40, 20);
        let face = BitmapFace::new(1);
        let out = render_overlay(&image, "I", &OverlayStyle::default(), &face).to_rgb8();

        // 8x8 box ending 10px from the right and bottom edges
        let (left, top) = (40 - 8 - 10, 20 - 8 - 10);
        let mut changed = 0;
        for (x, y, pixel) in out.enumerate_pixels() {
            if pixel.0 == [0, 0, 0] {
                continue;
            }
            changed += 1;
            assert!((left..left + 8).contains(&x), "x={x} outside text box");
            assert!((top..top + 8).contains(&y), "y={y} outside text box");
            assert_eq!(pixel.0, [128, 128, 128]);
        }
        assert!(changed > 0, "overlay should draw something");
    }

    #[test]
    fn test_overlay_keeps_dimensions_and_color_type() {
        let face = BitmapFace::new(2);
        let style = OverlayStyle::default();
        let rgb = render_overlay(&black(300, 50), "Watermarked for alice", &style, &face);
        assert_eq!(rgb.dimensions(), (300, 50));
        assert!(!rgb.color().has_alpha());

        let rgba = DynamicImage::ImageRgba8(RgbaImage::new(30, 30));
        let out = render_overlay(&rgba, "x", &style, &face);
        assert_eq!(out.dimensions(), (30, 30));
        assert!(out.color().has_alpha());
    }

    #[test]
    fn test_overlay_is_deterministic() {
        let face = BitmapFace::default();
        let image = black(200, 80);
        let a = render_overlay(&image, "Watermarked for bob", &OverlayStyle::default(), &face);
        let b = render_overlay(&image, "Watermarked for bob", &OverlayStyle::default(), &face);
        assert_eq!(a.to_rgb8(), b.to_rgb8());
    }

    #[test]
    fn test_oversized_text_is_clipped() {
        let face = BitmapFace::new(4);
        let style = OverlayStyle::default();
        let out = render_overlay(&black(16, 16), "Watermarked for carol", &style, &face);
        assert_eq!(out.dimensions(), (16, 16));
    }

    #[test]
    fn test_blend() {
        let mut pixel = Rgba([0, 0, 0, 255]);
        blend(&mut pixel, [255, 255, 255, 255], 1.0);
        assert_eq!(pixel.0, [255, 255, 255, 255]);

        let mut pixel = Rgba([100, 100, 100, 0]);
        blend(&mut pixel, [255, 255, 255, 128], 0.0);
        assert_eq!(pixel.0, [100, 100, 100, 0]);

        let mut pixel = Rgba([0, 0, 0, 0]);
        blend(&mut pixel, [255, 0, 0, 255], 0.5);
        assert_eq!(pixel.0, [128, 0, 0, 128]);
    }
}
