//! fOS Text - Boot Text Renderer
//!
//! This crate draws a single line of text into a caller-owned pixel buffer:
//! - Display DPI calculation from physical panel size
//! - Font loading and glyph rasterization (ttf-parser + tiny-skia)
//! - String measurement (advance width, ascent and descent)
//! - Glyph compositing with bounding-box clipping
//! - A render driver that walks the string and advances the pen
//!
//! # Example
//! ```rust,ignore
//! use fos_text::{FontEngine, PixelBuffer, TextBox, PenPos, CanvasProps};
//!
//! let mut engine = FontEngine::new();
//! engine.init("/usr/fonts/DejaVuSans.ttf", 16, fos_text::dpi::calc_dpi(174, 104, 1280, 768))?;
//! let metrics = fos_text::measure_str(&mut engine, "Booting...")?;
//!
//! let mut storage = vec![0u8; 1280 * 768 * 4];
//! let mut buffer = PixelBuffer::new(&mut storage, 1280, 768, 4)?;
//! let bound_box = TextBox::from_metrics(0, 700, &metrics);
//! let mut canvas = CanvasProps::new(bound_box, PenPos::at_baseline(metrics.pen_pos_y));
//! fos_text::render_text(&mut engine, &mut buffer, &mut canvas, "Booting...")?;
//! ```

pub mod buffer;
pub mod canvas;
pub mod dpi;
pub mod font;
pub mod metrics;
pub mod render;

pub use buffer::PixelBuffer;
pub use canvas::{CanvasProps, PenPos, TextBox};
pub use font::{Advance, F26Dot6, FontEngine, FontFace, GlyphSource};
pub use metrics::{measure_str, StringMetrics};
pub use render::{
    draw_bound_box, draw_glyph, render_text, GlyphOutcome, GlyphRasterizer, RasterizedGlyph,
    RenderSummary,
};

/// Text rendering error types
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("Rasterizer initialization failed: {0}")]
    LibraryInitFailed(String),

    #[error("Failed to load font face: {0}")]
    FaceLoadFailed(String),

    #[error("Failed to set character size: {0}")]
    CharSizeSetFailed(String),

    #[error("No font face loaded")]
    NotInitialized,

    #[error("{0}")]
    Generic(String),

    #[error("Rasterization failed: {0}")]
    RasterizationFailed(String),

    #[error("Invalid pixel buffer: {0}")]
    InvalidBuffer(String),
}

pub type Result<T> = std::result::Result<T, TextError>;

#[cfg(test)]
mod test_support;
