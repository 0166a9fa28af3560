//! Read-only view of a `+Fnt` bitmap font.
//!
//! A `+Fnt` font consists of a [`NewFontHeader`], a [`RangeMask`] of
//! [`NewFontHeader::range_mask_size`] bytes, the row bitmaps of every stored glyph and finally the
//! width of every stored glyph. Glyphs are stored in whole blocks of [`GLYPHS_PER_BLOCK`] in
//! ascending block order.

use core::{error, fmt};

use crate::{
    glyph::Glyph,
    header::{GLYPHS_PER_BLOCK, NEW_HEADER_SIZE, NewFontHeader, ParseNewHeaderError},
    range_mask::RangeMask,
};

/// A parsed `+Fnt` font.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct BitmapFont<'buffer> {
    /// The header of the font.
    header: NewFontHeader,
    /// The blocks stored in the font.
    range_mask: RangeMask<'buffer>,
    /// The row bitmaps of the stored glyphs.
    rows: &'buffer [u8],
    /// The widths of the stored glyphs.
    widths: &'buffer [u8],
}

impl<'buffer> BitmapFont<'buffer> {
    /// Parses `font` as a `+Fnt` font.
    ///
    /// Trailing bytes after the width table are ignored.
    ///
    /// # Errors
    ///
    /// - [`ParseBitmapFontError::Header`]: Returned if the [`NewFontHeader`] is invalid.
    /// - [`ParseBitmapFontError::UnterminatedName`]: Returned if the name field does not end in
    ///   a NUL byte.
    /// - [`ParseBitmapFontError::UnterminatedFamily`]: Returned if the family field does not end
    ///   in a NUL byte.
    /// - [`ParseBitmapFontError::TruncatedData`]: Returned if `font` is too small to contain the
    ///   range mask and every stored glyph.
    pub fn parse(font: &'buffer [u8]) -> Result<Self, ParseBitmapFontError> {
        let header = NewFontHeader::parse(font)?;
        if header.metadata.name.last() != Some(&0) {
            return Err(ParseBitmapFontError::UnterminatedName);
        }
        if header.metadata.family.last() != Some(&0) {
            return Err(ParseBitmapFontError::UnterminatedFamily);
        }

        let mask_end = NEW_HEADER_SIZE + usize::from(header.range_mask_size);
        let range_mask = RangeMask::new(font.get(NEW_HEADER_SIZE..mask_end).ok_or(
            ParseBitmapFontError::TruncatedData {
                actual_size: font.len(),
                expected_size: mask_end,
            },
        )?);

        let glyph_count = range_mask.block_count() * GLYPHS_PER_BLOCK;
        let rows_end = mask_end + glyph_count * header.metadata.bytes_per_glyph();
        let widths_end = rows_end + glyph_count;
        if font.len() < widths_end {
            return Err(ParseBitmapFontError::TruncatedData {
                actual_size: font.len(),
                expected_size: widths_end,
            });
        }

        let font = Self {
            header,
            range_mask,
            rows: &font[mask_end..rows_end],
            widths: &font[rows_end..widths_end],
        };
        Ok(font)
    }

    /// Returns the [`NewFontHeader`] of the font.
    pub const fn header(&self) -> &NewFontHeader {
        &self.header
    }

    /// Returns the [`RangeMask`] of the font.
    pub const fn range_mask(&self) -> RangeMask<'buffer> {
        self.range_mask
    }

    /// Returns the name of the font, without its NUL padding.
    pub fn name(&self) -> &[u8] {
        until_nul(&self.header.metadata.name)
    }

    /// Returns the family of the font, without its NUL padding.
    pub fn family(&self) -> &[u8] {
        until_nul(&self.header.metadata.family)
    }

    /// Returns the number of glyphs stored in the font, including empty glyphs in stored blocks.
    pub const fn glyph_count(&self) -> usize {
        self.widths.len()
    }

    /// Returns the row bitmaps of every stored glyph.
    pub const fn rows(&self) -> &'buffer [u8] {
        self.rows
    }

    /// Returns the widths of every stored glyph.
    pub const fn widths(&self) -> &'buffer [u8] {
        self.widths
    }

    /// Returns the index of the glyph associated with `code_point`, or `None` if the block
    /// containing `code_point` is not stored.
    pub fn glyph_index(&self, code_point: u32) -> Option<usize> {
        let code_point = usize::try_from(code_point).ok()?;
        let position = self
            .range_mask
            .block_position(code_point / GLYPHS_PER_BLOCK)?;

        Some(position * GLYPHS_PER_BLOCK + code_point % GLYPHS_PER_BLOCK)
    }

    /// Returns the width of the glyph associated with `code_point`.
    pub fn glyph_width(&self, code_point: u32) -> Option<u8> {
        self.widths.get(self.glyph_index(code_point)?).copied()
    }

    /// Returns `true` if `code_point` has a glyph with a non-zero width.
    pub fn contains(&self, code_point: u32) -> bool {
        self.glyph_width(code_point).is_some_and(|width| width > 0)
    }

    /// Returns the [`Glyph`] associated with `code_point`, or `None` if its block is not stored.
    pub fn glyph(&self, code_point: u32) -> Option<Glyph<'buffer>> {
        let index = self.glyph_index(code_point)?;
        let bytes_per_glyph = self.header.metadata.bytes_per_glyph();

        let buffer = self.rows.get(index * bytes_per_glyph..)?;
        Glyph::new(
            buffer,
            self.widths[index],
            self.header.metadata.glyph_height,
        )
    }
}

/// Returns the prefix of `field` before its first NUL byte.
fn until_nul(field: &[u8]) -> &[u8] {
    let end = field.iter().position(|&byte| byte == 0).unwrap_or(field.len());
    &field[..end]
}

/// Various errors that can occur while parsing a [`BitmapFont`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum ParseBitmapFontError {
    /// The [`NewFontHeader`] could not be parsed.
    Header(ParseNewHeaderError),
    /// The name field is not NUL-terminated.
    UnterminatedName,
    /// The family field is not NUL-terminated.
    UnterminatedFamily,
    /// The font is too small to contain the data described by its header.
    TruncatedData {
        /// The size of the provided font.
        actual_size: usize,
        /// The size required by the header and range mask.
        expected_size: usize,
    },
}

impl From<ParseNewHeaderError> for ParseBitmapFontError {
    fn from(value: ParseNewHeaderError) -> Self {
        Self::Header(value)
    }
}

impl fmt::Display for ParseBitmapFontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header(error) => write!(f, "invalid header: {error}"),
            Self::UnterminatedName => f.write_str("font name is not NUL-terminated"),
            Self::UnterminatedFamily => f.write_str("font family is not NUL-terminated"),
            Self::TruncatedData {
                actual_size,
                expected_size,
            } => write!(
                f,
                "data is truncated: expected {expected_size} bytes but got {actual_size} bytes"
            ),
        }
    }
}

impl error::Error for ParseBitmapFontError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Header(error) => Some(error),
            _ => None,
        }
    }
}
