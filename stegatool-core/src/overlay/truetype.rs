//! TrueType/OpenType face backed by `ab_glyph`.

use std::fs;
use std::path::Path;

use ab_glyph::{point, Font, FontVec, Glyph, GlyphId, PxScale, ScaleFont};
use tracing::debug;

use super::GlyphFace;
use crate::error::{Result, StegaError};

/// A scalable font loaded from disk at a fixed pixel size.
pub struct TrueTypeFace {
    font: FontVec,
    scale: PxScale,
}

impl TrueTypeFace {
    /// Load a font file and fix its pixel size.
    pub fn load(path: &Path, size_px: f32) -> Result<Self> {
        let data = fs::read(path).map_err(|e| StegaError::read(path, e))?;
        Self::from_vec(data, size_px).map_err(|reason| StegaError::Font {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn from_vec(data: Vec<u8>, size_px: f32) -> std::result::Result<Self, String> {
        if !(size_px.is_finite() && size_px > 0.0) {
            return Err(format!("invalid pixel size {size_px}"));
        }
        let font = FontVec::try_from_vec(data).map_err(|e| e.to_string())?;
        debug!(size_px, glyphs = font.glyph_count(), "Loaded TrueType face");
        Ok(Self {
            font,
            scale: PxScale::from(size_px),
        })
    }

    /// Position glyphs on a baseline at the ascent; returns the advance width.
    fn layout(&self, text: &str) -> (Vec<Glyph>, f32) {
        let scaled = self.font.as_scaled(self.scale);
        let mut caret = 0.0f32;
        let mut previous: Option<GlyphId> = None;
        let mut glyphs = Vec::with_capacity(text.len());

        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            glyphs.push(id.with_scale_and_position(self.scale, point(caret, scaled.ascent())));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }

        (glyphs, caret)
    }
}

impl GlyphFace for TrueTypeFace {
    fn measure(&self, text: &str) -> (u32, u32) {
        let (_, advance) = self.layout(text);
        let height = self.font.as_scaled(self.scale).height();
        (advance.ceil().max(0.0) as u32, height.ceil().max(0.0) as u32)
    }

    fn rasterize(&self, text: &str, origin: (i64, i64), plot: &mut dyn FnMut(i64, i64, f32)) {
        let (glyphs, _) = self.layout(text);
        for glyph in glyphs {
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            let left = origin.0 + bounds.min.x as i64;
            let top = origin.1 + bounds.min.y as i64;
            outlined.draw(|x, y, coverage| {
                plot(left + i64::from(x), top + i64::from(y), coverage);
            });
        }
    }
}
