//! Font engine: the single active face plus its glyph slot

use std::path::Path;

use ttf_parser::GlyphId;

use super::{FontFace, GlyphSource};
use crate::render::{GlyphRasterizer, RasterizedGlyph};
use crate::{Result, TextError};

/// Points per inch
const POINTS_PER_INCH: f32 = 72.0;

/// The loaded face, its metadata and the size it was set to
struct ActiveFace {
    data: Vec<u8>,
    units_per_em: u16,
    family_name: Option<String>,
    size: CharSize,
}

/// Character size applied to the active face
#[derive(Debug, Clone, Copy)]
struct CharSize {
    /// Character size in 26.6 points
    char_size: i32,
    dpi: u32,
    /// Pixels per em derived from `char_size` and `dpi`
    pixel_size: f32,
}

/// Font engine holding at most one active face
///
/// Created empty by [`FontEngine::new`]; [`FontEngine::init`] loads a face
/// and sets its character size. Calling `init` again replaces the face.
pub struct FontEngine {
    rasterizer: Option<GlyphRasterizer>,
    face: Option<ActiveFace>,
    slot: RasterizedGlyph,
}

impl FontEngine {
    /// Create an engine with no face loaded
    pub fn new() -> Self {
        Self {
            rasterizer: None,
            face: None,
            slot: RasterizedGlyph::default(),
        }
    }

    /// Load the face in `font_path` at `point_size` points for a `dpi` display
    pub fn init(&mut self, font_path: impl AsRef<Path>, point_size: i32, dpi: i32) -> Result<()> {
        let font_path = font_path.as_ref();
        self.face = None;
        self.ensure_rasterizer()?;

        let data = std::fs::read(font_path).map_err(|e| {
            tracing::error!("Reading font {} failed: {}", font_path.display(), e);
            TextError::FaceLoadFailed(format!("{}: {}", font_path.display(), e))
        })?;
        self.init_from_data(data, point_size, dpi)?;

        tracing::info!("Font {} loaded at {}pt, {} dpi", font_path.display(), point_size, dpi);
        Ok(())
    }

    /// Load a face from in-memory font file bytes
    pub fn init_from_data(&mut self, data: Vec<u8>, point_size: i32, dpi: i32) -> Result<()> {
        self.face = None;
        self.ensure_rasterizer()?;

        let (units_per_em, family_name) = match FontFace::parse(&data, 0) {
            Ok(face) => {
                tracing::debug!(
                    "Face parsed: {} glyphs, {} units/em",
                    face.number_of_glyphs(),
                    face.units_per_em()
                );
                (face.units_per_em(), face.family_name())
            }
            Err(e) => {
                tracing::error!("Font face parsing failed: {}", e);
                return Err(e);
            }
        };

        let size = Self::set_char_size(point_size, dpi).inspect_err(|e| {
            tracing::error!("Setting character size failed: {}", e);
        })?;
        tracing::debug!(
            "Face sized: char_size={} (26.6 pt), dpi={}, pixel_size={:.2}",
            size.char_size,
            size.dpi,
            size.pixel_size
        );
        self.face = Some(ActiveFace { data, units_per_em, family_name, size });
        Ok(())
    }

    /// Whether a face is loaded
    pub fn is_initialized(&self) -> bool {
        self.face.is_some()
    }

    /// Pixels per em of the active face
    pub fn pixel_size(&self) -> Option<f32> {
        self.face.as_ref().map(|face| face.size.pixel_size)
    }

    /// Design units per em of the active face
    pub fn units_per_em(&self) -> Option<u16> {
        self.face.as_ref().map(|face| face.units_per_em)
    }

    /// Family name of the active face
    pub fn family_name(&self) -> Option<&str> {
        self.face.as_ref()?.family_name.as_deref()
    }

    /// Load and rasterize one character into the glyph slot
    ///
    /// The code point is a single byte interpreted as Latin-1.
    pub fn rasterize(&mut self, code: u8) -> Result<&RasterizedGlyph> {
        let active = self.face.as_ref().ok_or(TextError::NotInitialized)?;
        let rasterizer = self.rasterizer.as_mut().ok_or(TextError::NotInitialized)?;

        let face = FontFace::parse(&active.data, 0)?;
        let c = char::from(code);
        let glyph_id: GlyphId = face
            .glyph_index(c)
            .ok_or_else(|| TextError::RasterizationFailed(format!("no glyph for {c:?}")))?;

        rasterizer.rasterize_into(&face, glyph_id, active.size.pixel_size, &mut self.slot)?;
        Ok(&self.slot)
    }

    fn ensure_rasterizer(&mut self) -> Result<()> {
        if self.rasterizer.is_none() {
            let rasterizer = GlyphRasterizer::new().inspect_err(|e| {
                tracing::error!("Rasterizer initialization failed: {}", e);
            })?;
            self.rasterizer = Some(rasterizer);
        }
        Ok(())
    }

    fn set_char_size(point_size: i32, dpi: i32) -> Result<CharSize> {
        if point_size <= 0 {
            return Err(TextError::CharSizeSetFailed(format!("point size {point_size}")));
        }
        if dpi <= 0 {
            return Err(TextError::CharSizeSetFailed(format!("dpi {dpi}")));
        }
        let char_size = point_size
            .checked_mul(64)
            .ok_or_else(|| TextError::CharSizeSetFailed(format!("point size {point_size}")))?;

        let pixel_size = char_size as f32 / 64.0 * dpi as f32 / POINTS_PER_INCH;
        if !pixel_size.is_finite() || pixel_size < 1.0 {
            return Err(TextError::CharSizeSetFailed(format!(
                "pixel size {pixel_size} from {point_size}pt at {dpi} dpi"
            )));
        }

        Ok(CharSize {
            char_size,
            dpi: dpi as u32,
            pixel_size,
        })
    }
}

impl Default for FontEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphSource for FontEngine {
    fn is_ready(&self) -> bool {
        self.is_initialized()
    }

    fn rasterize(&mut self, code: u8) -> Result<&RasterizedGlyph> {
        FontEngine::rasterize(self, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_engine_is_not_initialized() {
        let mut engine = FontEngine::new();
        assert!(!engine.is_initialized());
        assert!(engine.pixel_size().is_none());
        assert!(matches!(engine.rasterize(b'A'), Err(TextError::NotInitialized)));
    }

    #[test]
    fn test_missing_file_is_face_error() {
        let mut engine = FontEngine::new();
        let err = engine.init("/nonexistent/font.ttf", 16, 96).unwrap_err();
        assert!(matches!(err, TextError::FaceLoadFailed(_)));
        assert!(!engine.is_initialized());
    }

    #[test]
    fn test_garbage_data_is_face_error() {
        let mut engine = FontEngine::new();
        let err = engine.init_from_data(b"definitely not a font".to_vec(), 16, 96).unwrap_err();
        assert!(matches!(err, TextError::FaceLoadFailed(_)));
    }

    #[test]
    fn test_char_size_validation() {
        assert!(matches!(
            FontEngine::set_char_size(0, 96),
            Err(TextError::CharSizeSetFailed(_))
        ));
        assert!(matches!(
            FontEngine::set_char_size(16, -1),
            Err(TextError::CharSizeSetFailed(_))
        ));
        assert!(matches!(
            FontEngine::set_char_size(i32::MAX, 96),
            Err(TextError::CharSizeSetFailed(_))
        ));

        let size = FontEngine::set_char_size(16, 72).unwrap();
        assert_eq!(size.char_size, 16 * 64);
        assert_eq!(size.pixel_size, 16.0);
    }
}
