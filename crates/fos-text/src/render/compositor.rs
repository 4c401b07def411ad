//! Glyph compositing into a pixel buffer
//!
//! Pixels are written as opaque white scaled by coverage and always replace
//! what was in the buffer; nothing is blended.
//!
//! Clipping is asymmetric. Columns and rows past the right and bottom edges
//! of the bounding box are cut off. Rows above the top edge are skipped one
//! by one. Columns left of the left edge are still written.

use crate::buffer::PixelBuffer;
use crate::canvas::{PenPos, TextBox};

use super::RasterizedGlyph;

/// Pack an 8-bit coverage value into an opaque grey pixel word
///
/// Alpha is forced to 0xFF and coverage is replicated into the three color
/// bytes.
#[inline]
pub const fn coverage_to_pixel(coverage: u8) -> u32 {
    let c = coverage as u32;
    0xFF00_0000 | c | (c << 8) | (c << 16)
}

/// Draw one rasterized glyph with its origin at `pen` inside `bound_box`
pub fn draw_glyph(
    glyph: &RasterizedGlyph,
    bound_box: &TextBox,
    pen: PenPos,
    buffer: &mut PixelBuffer<'_>,
) {
    let dest_x = bound_box.start_x + pen.x.floor() + glyph.bearing_x;
    // The pen sits on the baseline; the bitmap starts at the glyph's top edge
    let dest_y = bound_box.start_y + pen.y.floor() - glyph.bearing_y;

    let x_max = (glyph.width as i32).min(bound_box.right() - dest_x);
    let y_max = (glyph.rows as i32).min(bound_box.bottom() - dest_y);

    tracing::trace!(
        "draw_glyph: dest=({}, {}), x_max={}, y_max={}",
        dest_x,
        dest_y,
        x_max,
        y_max
    );

    for y in 0..y_max {
        if dest_y + y < bound_box.start_y {
            continue;
        }
        for x in 0..x_max {
            let coverage = glyph.coverage(x as u32, y as u32);
            buffer.store(dest_x + x, dest_y + y, coverage_to_pixel(coverage));
        }
    }
}

/// Outline `bound_box` with `rgba` for debugging placement
///
/// The right column and bottom row are drawn one past the box, at
/// `start + size`.
pub fn draw_bound_box(buffer: &mut PixelBuffer<'_>, bound_box: &TextBox, rgba: u32) {
    for y in bound_box.start_y..bound_box.bottom() {
        buffer.store(bound_box.start_x, y, rgba);
        buffer.store(bound_box.right(), y, rgba);
    }
    for x in bound_box.start_x..bound_box.right() {
        buffer.store(x, bound_box.start_y, rgba);
        buffer.store(x, bound_box.bottom(), rgba);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::F26Dot6;
    use crate::test_support::glyph;

    const W: usize = 16;
    const H: usize = 16;

    fn storage() -> Vec<u8> {
        vec![0u8; W * H * 4]
    }

    #[test]
    fn test_coverage_packing() {
        assert_eq!(coverage_to_pixel(0x00), 0xFF00_0000);
        assert_eq!(coverage_to_pixel(0x80), 0xFF80_8080);
        assert_eq!(coverage_to_pixel(0xFF), 0xFFFF_FFFF);
    }

    #[test]
    fn test_placement_uses_bearings_and_pen() {
        let mut data = storage();
        let mut buf = PixelBuffer::new(&mut data, W, H, 4).unwrap();
        let bb = TextBox::new(2, 3, 10, 10);
        // 3x2 glyph, one pixel right of the pen, top edge 4 above the baseline
        let g = glyph(3, 2, 1, 4, 4);

        draw_glyph(&g, &bb, PenPos::at_baseline(5), &mut buf);

        // dest = (2 + 0 + 1, 3 + 5 - 4)
        assert_eq!(buf.pixel(3, 4), Some(coverage_to_pixel(1)));
        assert_eq!(buf.pixel(5, 5), Some(coverage_to_pixel(6)));
        assert_eq!(buf.pixel(2, 4), Some(0));
        assert_eq!(buf.pixel(6, 4), Some(0));
        assert_eq!(buf.pixel(3, 6), Some(0));
    }

    #[test]
    fn test_fractional_pen_floors() {
        let mut data = storage();
        let mut buf = PixelBuffer::new(&mut data, W, H, 4).unwrap();
        let bb = TextBox::new(0, 0, 16, 16);
        let pen = PenPos::new(F26Dot6::from_bits(127), F26Dot6::from_i32(1));

        draw_glyph(&glyph(1, 1, 0, 1, 1), &bb, pen, &mut buf);

        assert_eq!(buf.pixel(1, 0), Some(coverage_to_pixel(1)));
    }

    #[test]
    fn test_right_and_bottom_edges_clip() {
        let mut data = storage();
        let mut buf = PixelBuffer::new(&mut data, W, H, 4).unwrap();
        let bb = TextBox::new(0, 0, 4, 3);
        let g = glyph(3, 3, 2, 2, 3);

        // dest = (2, 1): two columns and two rows fit
        draw_glyph(&g, &bb, PenPos::at_baseline(3), &mut buf);

        assert_eq!(buf.pixel(2, 1), Some(coverage_to_pixel(1)));
        assert_eq!(buf.pixel(3, 2), Some(coverage_to_pixel(5)));
        assert_eq!(buf.pixel(4, 1), Some(0));
        assert_eq!(buf.pixel(2, 3), Some(0));
    }

    #[test]
    fn test_left_edge_does_not_clip_columns() {
        let mut data = storage();
        let mut buf = PixelBuffer::new(&mut data, W, H, 4).unwrap();
        let bb = TextBox::new(4, 0, 8, 8);
        // dest_x = 4 + 0 - 2 = 2, left of the box
        let g = glyph(4, 1, -2, 1, 4);

        draw_glyph(&g, &bb, PenPos::at_baseline(1), &mut buf);

        assert_eq!(buf.pixel(2, 0), Some(coverage_to_pixel(1)));
        assert_eq!(buf.pixel(3, 0), Some(coverage_to_pixel(2)));
        assert_eq!(buf.pixel(5, 0), Some(coverage_to_pixel(4)));
    }

    #[test]
    fn test_rows_above_top_edge_are_skipped() {
        let mut data = storage();
        let mut buf = PixelBuffer::new(&mut data, W, H, 4).unwrap();
        let bb = TextBox::new(0, 4, 8, 8);
        // dest_y = 4 + 2 - 4 = 2: rows 0 and 1 land above the box
        let g = glyph(1, 4, 0, 4, 1);

        draw_glyph(&g, &bb, PenPos::at_baseline(2), &mut buf);

        assert_eq!(buf.pixel(0, 2), Some(0));
        assert_eq!(buf.pixel(0, 3), Some(0));
        // Skipped rows keep their index into the bitmap
        assert_eq!(buf.pixel(0, 4), Some(coverage_to_pixel(3)));
        assert_eq!(buf.pixel(0, 5), Some(coverage_to_pixel(4)));
    }

    #[test]
    fn test_overwrites_background() {
        let mut data = storage();
        let mut buf = PixelBuffer::new(&mut data, W, H, 4).unwrap();
        buf.fill(0xFF12_3456);
        let bb = TextBox::new(0, 0, 4, 4);
        let mut g = glyph(2, 1, 0, 1, 2);
        g.bitmap = vec![0, 0xFF];

        draw_glyph(&g, &bb, PenPos::at_baseline(1), &mut buf);

        assert_eq!(buf.pixel(0, 0), Some(0xFF00_0000));
        assert_eq!(buf.pixel(1, 0), Some(0xFFFF_FFFF));
        assert_eq!(buf.pixel(2, 0), Some(0xFF12_3456));
    }

    #[test]
    fn test_glyph_outside_box_draws_nothing() {
        let mut data = storage();
        let mut buf = PixelBuffer::new(&mut data, W, H, 4).unwrap();
        let bb = TextBox::new(0, 0, 2, 2);
        let pen = PenPos::new(F26Dot6::from_i32(5), F26Dot6::from_i32(1));

        draw_glyph(&glyph(2, 1, 0, 1, 2), &bb, pen, &mut buf);

        assert!(buf.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_bound_box_outline() {
        let mut data = storage();
        let mut buf = PixelBuffer::new(&mut data, W, H, 4).unwrap();
        let bb = TextBox::new(1, 1, 3, 2);

        draw_bound_box(&mut buf, &bb, 0x7F7F_7F7F);

        for &(x, y) in &[(1, 1), (1, 2), (4, 1), (4, 2), (2, 1), (3, 3), (1, 3)] {
            assert_eq!(buf.pixel(x, y), Some(0x7F7F_7F7F), "({x}, {y})");
        }
        assert_eq!(buf.pixel(2, 2), Some(0));
        assert_eq!(buf.pixel(4, 3), Some(0));
    }
}
