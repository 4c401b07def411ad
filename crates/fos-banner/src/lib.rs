//! fOS Banner - Boot Text Banner
//!
//! Renders one line of text at the bottom-left of a display-sized canvas and
//! writes the canvas to a PNG file. The text comes from the command line or
//! the `BOOT_TEXT_STR` environment variable.

pub mod config;
pub mod output;

use anyhow::{bail, Context, Result};
use fos_text::{
    dpi, draw_bound_box, measure_str, render_text, CanvasProps, FontEngine, PenPos, PixelBuffer,
    RenderSummary, StringMetrics, TextBox,
};

pub use config::{BannerConfig, Command, ConfigError, DisplayGeometry, TextSource};

/// Color of the `-box` outline
const BOUND_BOX_RGBA: u32 = 0x7F7F_7F7F;

/// What a banner run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerReport {
    /// The rendered text, if any
    pub text: Option<String>,
    pub dpi: Option<i32>,
    pub metrics: Option<StringMetrics>,
    pub bound_box: Option<TextBox>,
    pub summary: Option<RenderSummary>,
}

/// DPI from the override or the display geometry
pub fn display_dpi(config: &BannerConfig) -> Result<i32> {
    let dpi = match config.dpi_override {
        Some(dpi) => dpi,
        None => {
            let display = &config.display;
            if display.width_mm <= 0 || display.height_mm <= 0 {
                bail!(
                    "display physical size {}x{} mm cannot yield a DPI",
                    display.width_mm,
                    display.height_mm
                );
            }
            dpi::calc_dpi(display.width_mm, display.height_mm, display.width_px, display.height_px)
        }
    };
    if dpi::is_suspicious(dpi) {
        tracing::warn!("DPI of {} is suspicious", dpi);
    }
    Ok(dpi)
}

/// Render the configured banner and write it to `config.output`
pub fn run(config: &BannerConfig) -> Result<BannerReport> {
    let display = &config.display;
    if display.width_px > DisplayGeometry::MAX_RESOLUTION
        || display.height_px > DisplayGeometry::MAX_RESOLUTION
    {
        bail!(
            "display resolution {}x{} exceeds {} pixels a side",
            display.width_px,
            display.height_px,
            DisplayGeometry::MAX_RESOLUTION
        );
    }
    let width = usize::try_from(display.width_px).context("display width")?;
    let height = usize::try_from(display.height_px).context("display height")?;
    let len = width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(4))
        .with_context(|| format!("canvas size {width}x{height} overflows"))?;

    let mut storage = vec![0u8; len];
    let mut report = BannerReport::default();
    let text = config.resolve_text(|name| std::env::var(name).ok());

    if let Some(text) = &text {
        let mut buffer = PixelBuffer::new(&mut storage, width, height, 4)?;
        let dpi = display_dpi(config)?;

        let mut engine = FontEngine::new();
        engine
            .init(&config.font_path, config.point_size, dpi)
            .with_context(|| {
                format!(
                    "initializing font {} at {}pt, {} dpi",
                    config.font_path.display(),
                    config.point_size,
                    dpi
                )
            })?;
        if let Some(family) = engine.family_name() {
            tracing::info!("Using font family {}", family);
        }

        let metrics = measure_str(&mut engine, text)?;
        if metrics.width < 1 || metrics.height < 1 {
            tracing::warn!(
                "Measured text is empty: width={}, height={}",
                metrics.width,
                metrics.height
            );
        }

        let bound_box = TextBox::from_metrics(0, height as i32 - metrics.height - 1, &metrics);
        let mut canvas = CanvasProps::new(bound_box, PenPos::at_baseline(metrics.pen_pos_y));
        tracing::debug!(
            "bound box {:?}, pen=({}, {})",
            bound_box,
            canvas.pen.x.to_bits(),
            canvas.pen.y.to_bits()
        );

        if config.draw_box {
            draw_bound_box(&mut buffer, &bound_box, BOUND_BOX_RGBA);
        }
        let summary = render_text(&mut engine, &mut buffer, &mut canvas, text)?;
        tracing::info!(
            "Rendered {} glyphs ({} skipped) into {}x{} box",
            summary.rendered,
            summary.skipped,
            bound_box.width,
            bound_box.height
        );

        report.dpi = Some(dpi);
        report.metrics = Some(metrics);
        report.bound_box = Some(bound_box);
        report.summary = Some(summary);
    } else {
        tracing::info!("Text source is NONE, writing blank canvas");
    }

    report.text = text;
    output::write_png(&config.output, &storage, width as u32, height as u32)?;
    tracing::info!("Banner written to {}", config.output.display());
    Ok(report)
}
