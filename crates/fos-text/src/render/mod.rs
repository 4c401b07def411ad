//! Glyph rendering module

mod compositor;
mod driver;
mod rasterizer;

pub use compositor::{coverage_to_pixel, draw_bound_box, draw_glyph};
pub use driver::{render_text, GlyphOutcome, RenderSummary};
pub use rasterizer::{GlyphRasterizer, RasterizedGlyph};
