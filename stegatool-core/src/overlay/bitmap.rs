//! Built-in 8x8 bitmap face.

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};

use super::GlyphFace;

/// Native glyph cell size in pixels.
pub const GLYPH_SIZE: u32 = 8;

/// 8x8 bitmap glyphs scaled up by an integer factor.
///
/// Characters outside Basic Latin and Latin-1 render as `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFace {
    scale: u32,
}

impl BitmapFace {
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
        }
    }

    /// Largest integer scale whose cell does not exceed `size_px`.
    pub fn from_pixel_size(size_px: f32) -> Self {
        Self::new((size_px.max(0.0) as u32) / GLYPH_SIZE)
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    fn cell(&self) -> u32 {
        GLYPH_SIZE * self.scale
    }

    fn glyph(c: char) -> [u8; 8] {
        BASIC_FONTS
            .get(c)
            .or_else(|| LATIN_FONTS.get(c))
            .or_else(|| BASIC_FONTS.get('?'))
            .unwrap_or([0; 8])
    }
}

impl Default for BitmapFace {
    /// 32px cells, the closest fit to the default 36px text size.
    fn default() -> Self {
        Self::new(4)
    }
}

impl GlyphFace for BitmapFace {
    fn measure(&self, text: &str) -> (u32, u32) {
        let count = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        (count.saturating_mul(self.cell()), self.cell())
    }

    fn rasterize(&self, text: &str, origin: (i64, i64), plot: &mut dyn FnMut(i64, i64, f32)) {
        let scale = i64::from(self.scale);
        let cell = i64::from(self.cell());

        for (index, c) in text.chars().enumerate() {
            let left = origin.0 + index as i64 * cell;
            for (row, bits) in Self::glyph(c).iter().enumerate() {
                // bit 0 is the leftmost column
                for col in 0..GLYPH_SIZE {
                    if bits & (1 << col) == 0 {
                        continue;
                    }
                    let x0 = left + i64::from(col) * scale;
                    let y0 = origin.1 + row as i64 * scale;
                    for dy in 0..scale {
                        for dx in 0..scale {
                            plot(x0 + dx, y0 + dy, 1.0);
                        }
                    }
                }
            }
        }
    }
}
