//! In-memory glyph source for unit tests

use std::collections::HashMap;

use crate::font::{Advance, GlyphSource};
use crate::render::RasterizedGlyph;
use crate::{Result, TextError};

/// Glyph with a solid coverage pattern: byte `(y * width + x + 1) as u8`
pub fn glyph(width: u32, rows: u32, bearing_x: i32, bearing_y: i32, advance_px: i32) -> RasterizedGlyph {
    RasterizedGlyph {
        glyph_id: 1,
        width,
        rows,
        bearing_x,
        bearing_y,
        advance: Advance::horizontal(advance_px),
        bitmap: (0..width * rows).map(|i| (i + 1) as u8).collect(),
    }
}

/// Source that serves fixed glyphs per byte and fails everything else
pub struct StubSource {
    glyphs: HashMap<u8, RasterizedGlyph>,
    slot: RasterizedGlyph,
    ready: bool,
    calls: usize,
}

impl StubSource {
    pub fn new() -> Self {
        Self {
            glyphs: HashMap::new(),
            slot: RasterizedGlyph::default(),
            ready: true,
            calls: 0,
        }
    }

    pub fn with(mut self, code: u8, glyph: RasterizedGlyph) -> Self {
        self.glyphs.insert(code, glyph);
        self
    }

    pub fn not_ready(mut self) -> Self {
        self.ready = false;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl GlyphSource for StubSource {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn rasterize(&mut self, code: u8) -> Result<&RasterizedGlyph> {
        self.calls += 1;
        let glyph = self
            .glyphs
            .get(&code)
            .ok_or_else(|| TextError::RasterizationFailed(format!("no glyph for {code:#04x}")))?;
        self.slot.clone_from(glyph);
        Ok(&self.slot)
    }
}
