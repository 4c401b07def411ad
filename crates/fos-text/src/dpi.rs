//! Display DPI from physical panel size

/// Millimetres per inch
const MM_PER_INCH: f64 = 25.4;

/// Lowest DPI considered plausible for a display panel
pub const MIN_SANE_DPI: i32 = 50;
/// Highest DPI considered plausible for a display panel
pub const MAX_SANE_DPI: i32 = 200;

/// Dots per inch along the panel diagonal
///
/// The pixel diagonal is rounded to whole pixels before dividing by the
/// physical diagonal in inches; the quotient is truncated.
///
/// A zero physical size divides by zero: callers must pass a non-zero panel
/// size.
pub fn calc_dpi(width_mm: i32, height_mm: i32, resolution_width: i32, resolution_height: i32) -> i32 {
    let diagonal_pixels = (resolution_width as f64).hypot(resolution_height as f64).round();
    let diagonal_inches = (width_mm as f64).hypot(height_mm as f64) / MM_PER_INCH;
    (diagonal_pixels / diagonal_inches).floor() as i32
}

/// Whether `dpi` lies outside the plausible display range
pub fn is_suspicious(dpi: i32) -> bool {
    !(MIN_SANE_DPI..=MAX_SANE_DPI).contains(&dpi)
}
