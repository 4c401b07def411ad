//! Render driver: walks a string and composites each glyph

use crate::buffer::PixelBuffer;
use crate::canvas::CanvasProps;
use crate::font::GlyphSource;
use crate::{Result, TextError};

use super::draw_glyph;

/// What happened to one byte of the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphOutcome {
    /// Composited and advanced the pen
    Rendered,
    /// Could not be rasterized; the pen did not move
    Skipped,
}

/// Per-call tally of glyph outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    pub rendered: usize,
    pub skipped: usize,
    /// Pixel stores that fell outside the buffer storage
    pub dropped: usize,
}

impl RenderSummary {
    fn record(&mut self, outcome: GlyphOutcome) {
        match outcome {
            GlyphOutcome::Rendered => self.rendered += 1,
            GlyphOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// Render `text` into `buffer` starting at the canvas pen
///
/// Bytes are rendered left to right. A byte that cannot be rasterized is
/// skipped without failing the call. The pen advances by every rendered
/// glyph's advance whether or not anything was visible after clipping.
///
/// The bounding box must already be sized to the text, see
/// [`measure_str`](crate::measure_str).
pub fn render_text<S>(
    source: &mut S,
    buffer: &mut PixelBuffer<'_>,
    canvas: &mut CanvasProps,
    text: impl AsRef<[u8]>,
) -> Result<RenderSummary>
where
    S: GlyphSource + ?Sized,
{
    if !source.is_ready() {
        tracing::error!("render_text() called without an active font face");
        return Err(TextError::Generic(
            "render called without an active font face".to_string(),
        ));
    }

    let text = text.as_ref();
    tracing::debug!(
        "Rendering {} bytes: box={:?}, pen=({}, {})",
        text.len(),
        canvas.bound_box,
        canvas.pen.x.to_bits(),
        canvas.pen.y.to_bits()
    );

    let dropped_before = buffer.dropped_stores();
    let mut summary = RenderSummary::default();
    for &code in text {
        let outcome = match source.rasterize(code) {
            Ok(glyph) => {
                draw_glyph(glyph, &canvas.bound_box, canvas.pen, buffer);
                canvas.pen.advance(glyph.advance);
                GlyphOutcome::Rendered
            }
            Err(e) => {
                tracing::trace!("Skipping byte {:#04x}: {}", code, e);
                GlyphOutcome::Skipped
            }
        };
        summary.record(outcome);
    }

    summary.dropped = buffer.dropped_stores() - dropped_before;
    if summary.dropped > 0 {
        tracing::debug!("{} pixel stores fell outside the buffer", summary.dropped);
    }
    Ok(summary)
}
