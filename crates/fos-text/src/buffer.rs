//! Pixel buffer - borrowed view over caller-owned memory

use crate::{Result, TextError};

/// The only pixel format stores are written in
pub const BYTES_PER_PIXEL: usize = 4;

/// Mutable view over an externally owned, row-major pixel region
///
/// Stride is `width * bytes_per_pixel`. The view never allocates, frees or
/// resizes the storage.
pub struct PixelBuffer<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
    bpp: usize,
    dropped: usize,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap `data` as a `width` x `height` buffer of `bpp` bytes per pixel
    pub fn new(data: &'a mut [u8], width: usize, height: usize, bpp: usize) -> Result<Self> {
        if bpp != BYTES_PER_PIXEL {
            return Err(TextError::InvalidBuffer(format!(
                "{bpp} bytes per pixel, expected {BYTES_PER_PIXEL}"
            )));
        }
        let needed = width
            .checked_mul(height)
            .and_then(|px| px.checked_mul(bpp))
            .ok_or_else(|| TextError::InvalidBuffer(format!("{width}x{height} overflows")))?;
        if data.len() < needed {
            return Err(TextError::InvalidBuffer(format!(
                "{} bytes for {width}x{height}, need {needed}",
                data.len()
            )));
        }
        Ok(Self { data, width, height, bpp, dropped: 0 })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.bpp
    }

    /// Raw bytes of the whole region
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..]
    }

    /// Stores dropped because they fell outside the storage
    pub fn dropped_stores(&self) -> usize {
        self.dropped
    }

    /// Linear byte offset of pixel `(x, y)`
    ///
    /// Coordinates are not checked against the row width, so a negative `x`
    /// lands at the end of the previous row.
    #[inline]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        let stride = (self.width * self.bpp) as i64;
        let offset = y as i64 * stride + x as i64 * self.bpp as i64;
        let offset = usize::try_from(offset).ok()?;
        (offset + BYTES_PER_PIXEL <= self.data.len()).then_some(offset)
    }

    /// Store a 32-bit pixel word little-endian at `(x, y)`
    ///
    /// Returns false, and drops the store, when the word falls outside the
    /// storage.
    #[inline]
    pub fn store(&mut self, x: i32, y: i32, value: u32) -> bool {
        match self.offset(x, y) {
            Some(offset) => {
                self.data[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&value.to_le_bytes());
                true
            }
            None => {
                self.dropped += 1;
                tracing::trace!("Dropped pixel store at ({}, {})", x, y);
                false
            }
        }
    }

    /// Read back the pixel word at `(x, y)`
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        let offset = self.offset(x, y)?;
        let mut word = [0u8; BYTES_PER_PIXEL];
        word.copy_from_slice(&self.data[offset..offset + BYTES_PER_PIXEL]);
        Some(u32::from_le_bytes(word))
    }

    /// Set every pixel to `value`
    pub fn fill(&mut self, value: u32) {
        let len = self.width * self.height * self.bpp;
        for chunk in self.data[..len].chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk.copy_from_slice(&value.to_le_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_wrong_bpp() {
        let mut storage = vec![0u8; 16 * 3];
        assert!(matches!(
            PixelBuffer::new(&mut storage, 4, 4, 3),
            Err(TextError::InvalidBuffer(_))
        ));
    }

    #[test]
    fn test_rejects_short_storage() {
        let mut storage = vec![0u8; 63];
        assert!(PixelBuffer::new(&mut storage, 4, 4, 4).is_err());
    }

    #[test]
    fn test_store_is_little_endian() {
        let mut storage = vec![0u8; 4 * 2 * 4];
        let mut buf = PixelBuffer::new(&mut storage, 4, 2, 4).unwrap();

        assert!(buf.store(1, 1, 0xFF11_2233));
        assert_eq!(buf.pixel(1, 1), Some(0xFF11_2233));

        let offset = (4 + 1) * 4;
        assert_eq!(&storage[offset..offset + 4], &[0x33, 0x22, 0x11, 0xFF]);
    }

    #[test]
    fn test_negative_x_wraps_to_previous_row() {
        let mut storage = vec![0u8; 4 * 2 * 4];
        let mut buf = PixelBuffer::new(&mut storage, 4, 2, 4).unwrap();

        assert!(buf.store(-1, 1, 7));
        assert_eq!(buf.pixel(3, 0), Some(7));
    }

    #[test]
    fn test_out_of_storage_is_dropped() {
        let mut storage = vec![0u8; 4 * 2 * 4];
        let mut buf = PixelBuffer::new(&mut storage, 4, 2, 4).unwrap();

        assert!(!buf.store(0, 2, 1));
        assert!(!buf.store(-1, 0, 1));
        assert_eq!(buf.dropped_stores(), 2);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_fill() {
        let mut storage = vec![0u8; 3 * 3 * 4];
        let mut buf = PixelBuffer::new(&mut storage, 3, 3, 4).unwrap();
        buf.fill(0x8000_0001);
        assert_eq!(buf.pixel(2, 2), Some(0x8000_0001));
    }
}
