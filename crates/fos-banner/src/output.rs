//! PNG output of the rendered canvas

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{ensure, Context, Result};

/// Write little-endian 32-bit pixel words as an RGBA8 PNG
///
/// The buffer is written as is: a word's low byte becomes R and its high
/// byte A. For the opaque grey words the compositor produces, R, G and B
/// hold the same value.
pub fn write_png(path: &Path, pixels: &[u8], width: u32, height: u32) -> Result<()> {
    let expected = width as usize * height as usize * 4;
    ensure!(
        pixels.len() == expected,
        "canvas holds {} bytes, {}x{} RGBA needs {}",
        pixels.len(),
        width,
        height,
        expected
    );

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .with_context(|| format!("writing PNG header to {}", path.display()))?;
    writer
        .write_image_data(pixels)
        .with_context(|| format!("writing PNG data to {}", path.display()))?;
    writer
        .finish()
        .with_context(|| format!("finishing {}", path.display()))?;

    tracing::debug!("Wrote {}x{} PNG to {}", width, height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_size_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_png(&dir.path().join("x.png"), &[0u8; 12], 2, 2).unwrap_err();
        assert!(err.to_string().contains("needs 16"));
    }

    #[test]
    fn test_pixel_words_become_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("px.png");
        let pixels = 0xFF80_4020u32.to_le_bytes();

        write_png(&path, &pixels, 1, 1).unwrap();

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        assert_eq!(info.color_type, png::ColorType::Rgba);
        assert_eq!(&buf[..4], &[0x20, 0x40, 0x80, 0xFF]);
    }
}
