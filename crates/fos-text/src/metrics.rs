//! String measurement

use crate::font::{F26Dot6, GlyphSource};
use crate::{Result, TextError};

/// Pixel footprint of a single line of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringMetrics {
    /// Baseline offset from the top of the line (largest top bearing)
    pub pen_pos_y: i32,
    /// Sum of horizontal advances, in pixels
    pub width: i32,
    /// Ascent plus descent, in pixels
    pub height: i32,
    /// Sum of vertical advances, in pixels (zero for horizontal text)
    pub advance_y: i32,
    /// Tallest single glyph bitmap
    pub max_glyph_rows: i32,
}

/// Measure `text` one byte at a time
///
/// Characters the source cannot rasterize are skipped and contribute
/// nothing. Fails only when no face is loaded.
pub fn measure_str<S>(source: &mut S, text: impl AsRef<[u8]>) -> Result<StringMetrics>
where
    S: GlyphSource + ?Sized,
{
    if !source.is_ready() {
        tracing::error!("measure_str() called without an active font face");
        return Err(TextError::NotInitialized);
    }

    let mut width = 0;
    let mut advance_y = 0;
    let mut max_ascent = 0;
    // Lowest bitmap edge relative to the baseline; descenders make it negative
    let mut min_descent = 0;
    let mut max_glyph_rows = 0;

    for &code in text.as_ref() {
        let glyph = match source.rasterize(code) {
            Ok(glyph) => glyph,
            Err(e) => {
                tracing::trace!("Skipping byte {:#04x} in measurement: {}", code, e);
                continue;
            }
        };

        let rows = glyph.rows as i32;
        width += pixels(glyph.advance.x);
        advance_y += pixels(glyph.advance.y);
        max_ascent = max_ascent.max(glyph.bearing_y);
        min_descent = min_descent.min(glyph.bearing_y - rows);
        max_glyph_rows = max_glyph_rows.max(rows);
    }

    let height = max_ascent + min_descent.abs();
    if height < max_glyph_rows {
        tracing::warn!(
            "measure_str() calculated height={} less than max glyph rows={}",
            height,
            max_glyph_rows
        );
    }

    Ok(StringMetrics {
        pen_pos_y: max_ascent,
        width,
        height,
        advance_y,
        max_glyph_rows,
    })
}

/// Fixed-point advance truncated to whole pixels (shift right by 6)
#[inline]
fn pixels(value: F26Dot6) -> i32 {
    value.floor()
}
