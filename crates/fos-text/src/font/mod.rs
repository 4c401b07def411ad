//! Font loading and glyph source module

mod engine;
mod face;
mod fixed_point;

pub use engine::FontEngine;
pub use face::FontFace;
pub use fixed_point::{Advance, F26Dot6};

use crate::Result;
use crate::render::RasterizedGlyph;

/// Something that turns single-byte code points into rasterized glyphs
///
/// Measurement and rendering only talk to fonts through this trait.
/// Implementors keep a single glyph slot; each `rasterize` call overwrites
/// it, so the returned borrow ends before the next character is loaded.
pub trait GlyphSource {
    /// Whether a face is loaded and sized
    fn is_ready(&self) -> bool;

    /// Load and rasterize one character into the glyph slot
    fn rasterize(&mut self, code: u8) -> Result<&RasterizedGlyph>;
}
