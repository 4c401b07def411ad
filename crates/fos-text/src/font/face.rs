//! Font face with parsed metrics

use ttf_parser::{name_id, Face, GlyphId};

use crate::{Result, TextError};

/// Parsed TrueType/OpenType face borrowing the font file bytes
pub struct FontFace<'a> {
    /// The underlying ttf-parser face
    face: Face<'a>,
}

impl<'a> FontFace<'a> {
    /// Parse a font face from data
    pub fn parse(data: &'a [u8], index: u32) -> Result<Self> {
        Face::parse(data, index)
            .map(|face| Self { face })
            .map_err(|e| TextError::FaceLoadFailed(e.to_string()))
    }

    /// Units per em
    pub fn units_per_em(&self) -> u16 {
        self.face.units_per_em()
    }

    /// Family name from the `name` table, if present
    pub fn family_name(&self) -> Option<String> {
        self.face
            .names()
            .into_iter()
            .filter(|name| name.name_id == name_id::FAMILY)
            .find_map(|name| name.to_string())
    }

    /// Get glyph ID for a character
    pub fn glyph_index(&self, c: char) -> Option<GlyphId> {
        self.face.glyph_index(c)
    }

    /// Get glyph horizontal advance in font units
    pub fn glyph_hor_advance(&self, glyph_id: GlyphId) -> Option<u16> {
        self.face.glyph_hor_advance(glyph_id)
    }

    /// Number of glyphs in font
    pub fn number_of_glyphs(&self) -> u16 {
        self.face.number_of_glyphs()
    }

    /// Get underlying ttf-parser face
    pub fn ttf_face(&self) -> &Face<'a> {
        &self.face
    }
}
