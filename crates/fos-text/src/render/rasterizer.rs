//! Glyph rasterization

use tiny_skia::{Color, FillRule, Paint, Pixmap, Transform};
use ttf_parser::{GlyphId, OutlineBuilder};

use crate::font::{Advance, FontFace};
use crate::{Result, TextError};

/// Edge length of the scratch surface allocated up front
const INITIAL_SCRATCH_SIZE: u32 = 64;

/// A rasterized glyph
///
/// The bitmap is 8-bit coverage, row-major, top row first. Bearings are in
/// whole pixels relative to the pen: `bearing_x` to the left edge,
/// `bearing_y` from the baseline up to the top edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RasterizedGlyph {
    /// Glyph ID
    pub glyph_id: u16,
    /// Bitmap width
    pub width: u32,
    /// Bitmap rows
    pub rows: u32,
    /// X bearing (offset from origin)
    pub bearing_x: i32,
    /// Y bearing (offset from baseline)
    pub bearing_y: i32,
    /// Pen advance in 26.6 units
    pub advance: Advance,
    /// Grayscale bitmap (1 byte per pixel)
    pub bitmap: Vec<u8>,
}

impl RasterizedGlyph {
    /// Coverage byte at column `x`, row `y`
    #[inline]
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        self.bitmap[(y * self.width + x) as usize]
    }

    /// Reset to an empty glyph, keeping the bitmap allocation
    fn reset(&mut self, glyph_id: u16) {
        self.glyph_id = glyph_id;
        self.width = 0;
        self.rows = 0;
        self.bearing_x = 0;
        self.bearing_y = 0;
        self.advance = Advance::default();
        self.bitmap.clear();
    }
}

/// Glyph rasterizer using tiny-skia
///
/// Owns a scratch surface that is reused for every glyph and grown when a
/// glyph does not fit.
pub struct GlyphRasterizer {
    scratch: Pixmap,
}

impl GlyphRasterizer {
    /// Create a new rasterizer
    pub fn new() -> Result<Self> {
        Pixmap::new(INITIAL_SCRATCH_SIZE, INITIAL_SCRATCH_SIZE)
            .map(|scratch| Self { scratch })
            .ok_or_else(|| {
                TextError::LibraryInitFailed("cannot allocate scratch surface".to_string())
            })
    }

    /// Rasterize `glyph_id` at `pixel_size` pixels per em into `slot`
    ///
    /// The previous contents of `slot` are discarded. Glyphs without an
    /// outline (space, control glyphs) leave an empty bitmap but keep their
    /// advance.
    pub fn rasterize_into(
        &mut self,
        face: &FontFace<'_>,
        glyph_id: GlyphId,
        pixel_size: f32,
        slot: &mut RasterizedGlyph,
    ) -> Result<()> {
        slot.reset(glyph_id.0);

        let scale = pixel_size / face.units_per_em() as f32;
        // Advances are snapped to whole pixels, like a hinted load
        let advance_px = face
            .glyph_hor_advance(glyph_id)
            .map(|adv| (adv as f32 * scale).round() as i32)
            .unwrap_or(0);
        slot.advance = Advance::horizontal(advance_px);

        let Some(bbox) = face.ttf_face().glyph_bounding_box(glyph_id) else {
            return Ok(());
        };

        let left = (bbox.x_min as f32 * scale).floor() as i32;
        let right = (bbox.x_max as f32 * scale).ceil() as i32;
        let top = (bbox.y_max as f32 * scale).ceil() as i32;
        let bottom = (bbox.y_min as f32 * scale).floor() as i32;

        if right <= left || top <= bottom {
            return Ok(());
        }
        let width = (right - left) as u32;
        let rows = (top - bottom) as u32;

        let mut builder = PathBuilder::new(scale, left as f32, top as f32);
        if face.ttf_face().outline_glyph(glyph_id, &mut builder).is_none() {
            return Ok(());
        }
        let Some(path) = builder.finish() else {
            return Ok(());
        };

        self.ensure_scratch(width, rows)?;
        self.scratch.fill(Color::TRANSPARENT);

        let mut paint = Paint::default();
        paint.set_color(Color::WHITE);
        paint.anti_alias = true;

        self.scratch.fill_path(
            &path,
            &paint,
            FillRule::Winding,
            Transform::identity(),
            None,
        );

        // Extract alpha channel as grayscale
        let stride = self.scratch.width() as usize;
        let pixels = self.scratch.pixels();
        slot.bitmap.reserve((width * rows) as usize);
        for y in 0..rows as usize {
            let start = y * stride;
            let row = &pixels[start..start + width as usize];
            slot.bitmap.extend(row.iter().map(|p| p.alpha()));
        }

        slot.width = width;
        slot.rows = rows;
        slot.bearing_x = left;
        slot.bearing_y = top;
        Ok(())
    }

    /// Grow the scratch surface to hold at least `width` x `rows`
    fn ensure_scratch(&mut self, width: u32, rows: u32) -> Result<()> {
        if width <= self.scratch.width() && rows <= self.scratch.height() {
            return Ok(());
        }
        let new_width = width.max(self.scratch.width());
        let new_height = rows.max(self.scratch.height());
        self.scratch = Pixmap::new(new_width, new_height).ok_or_else(|| {
            TextError::RasterizationFailed(format!("glyph surface {new_width}x{new_height}"))
        })?;
        tracing::debug!("Scratch surface grown to {}x{}", new_width, new_height);
        Ok(())
    }
}

/// Path builder that converts ttf-parser outlines to tiny-skia paths
///
/// Output coordinates are bitmap pixels: x to the right of the bitmap's left
/// edge, y down from its top edge.
struct PathBuilder {
    builder: tiny_skia::PathBuilder,
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl PathBuilder {
    fn new(scale: f32, offset_x: f32, offset_y: f32) -> Self {
        Self {
            builder: tiny_skia::PathBuilder::new(),
            scale,
            offset_x,
            offset_y,
        }
    }

    fn transform_x(&self, x: f32) -> f32 {
        x * self.scale - self.offset_x
    }

    fn transform_y(&self, y: f32) -> f32 {
        self.offset_y - y * self.scale // Flip Y axis
    }

    fn finish(self) -> Option<tiny_skia::Path> {
        self.builder.finish()
    }
}

impl OutlineBuilder for PathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(self.transform_x(x), self.transform_y(y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(self.transform_x(x), self.transform_y(y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(
            self.transform_x(x1), self.transform_y(y1),
            self.transform_x(x), self.transform_y(y),
        );
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            self.transform_x(x1), self.transform_y(y1),
            self.transform_x(x2), self.transform_y(y2),
            self.transform_x(x), self.transform_y(y),
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
