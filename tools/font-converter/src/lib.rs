//! Tool for converting `!Fnt` bitmap fonts into the sparse `+Fnt` format.
//!
//! The `+Fnt` format only stores the blocks of [`GLYPHS_PER_BLOCK`] glyphs that contain at least
//! one glyph with a non-zero width, as recorded by a [`RangeMask`][rm] placed after the header.
//!
//! [rm]: font::range_mask::RangeMask

use core::{error, fmt};

use font::{
    header::{
        GLYPHS_PER_BLOCK, NEW_HEADER_SIZE, NewFontHeader, OLD_HEADER_SIZE, OldFontHeader,
        ParseOldHeaderError,
    },
    range_mask::RangeMaskBuilder,
};

use crate::glyph_table::{GlyphTable, compact};

pub mod glyph_table;

/// Options controlling how lenient a conversion is.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Reject fonts whose body is shorter than their glyph tables instead of treating the missing
    /// bytes as zero.
    pub strict: bool,
}

/// Converts `font` from the `!Fnt` format into the `+Fnt` format using the default
/// [`ConvertOptions`].
///
/// # Errors
///
/// See [`convert_with_options`].
pub fn convert(font: &[u8]) -> Result<Vec<u8>, ConvertError> {
    convert_with_options(font, ConvertOptions::default())
}

/// Converts `font` from the `!Fnt` format into the `+Fnt` format.
///
/// # Errors
///
/// - [`ConvertError::InvalidFormat`]: Returned if the `!Fnt` header is truncated, has the wrong
///   magic or has an unknown type code.
/// - [`ConvertError::TruncatedInput`]: Returned if `options.strict` is set and the body is shorter
///   than the glyph tables.
/// - [`ConvertError::EmptyFont`]: Returned if every glyph has a width of zero.
pub fn convert_with_options(font: &[u8], options: ConvertOptions) -> Result<Vec<u8>, ConvertError> {
    let old_header = OldFontHeader::parse(font)?;
    log::debug!(
        "parsed {}x{} font with {} glyphs",
        old_header.metadata.glyph_width,
        old_header.metadata.glyph_height,
        old_header.glyph_count()
    );

    let table = GlyphTable::split(
        &font[OLD_HEADER_SIZE..],
        old_header.glyph_count(),
        old_header.bytes_per_glyph(),
    );
    if table.missing_size() != 0 {
        if options.strict {
            return Err(ConvertError::TruncatedInput {
                actual_size: font.len(),
                expected_size: OLD_HEADER_SIZE + table.expected_size(),
            });
        }

        log::warn!(
            "font is truncated by {} bytes, treating missing glyph data as zero",
            table.missing_size()
        );
    }

    let range_mask = RangeMaskBuilder::from_widths(table.widths());
    if range_mask.is_empty() {
        return Err(ConvertError::EmptyFont);
    }
    let range_mask_bytes = range_mask.range_mask().as_bytes();
    log::debug!(
        "range mask {:02x?} stores {} of {} blocks",
        range_mask_bytes,
        range_mask.range_mask().block_count(),
        old_header.glyph_count().div_ceil(GLYPHS_PER_BLOCK)
    );

    let compacted = compact(&table, range_mask.range_mask());
    let new_header = NewFontHeader {
        metadata: old_header.metadata,
        range_mask_size: range_mask.size(),
    };

    let mut converted = Vec::with_capacity(
        NEW_HEADER_SIZE + range_mask_bytes.len() + compacted.rows.len() + compacted.widths.len(),
    );
    converted.extend_from_slice(&new_header.to_bytes());
    converted.extend_from_slice(range_mask_bytes);
    converted.extend_from_slice(&compacted.rows);
    converted.extend_from_slice(&compacted.widths);

    Ok(converted)
}

/// Various errors that can occur while converting a `!Fnt` font.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum ConvertError {
    /// The input is not a valid `!Fnt` font.
    InvalidFormat(ParseOldHeaderError),
    /// The body is shorter than the glyph tables.
    TruncatedInput {
        /// The size of the provided font.
        actual_size: usize,
        /// The size required to hold the header and every glyph.
        expected_size: usize,
    },
    /// No glyph has a non-zero width.
    EmptyFont,
}

impl From<ParseOldHeaderError> for ConvertError {
    fn from(value: ParseOldHeaderError) -> Self {
        Self::InvalidFormat(value)
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(error) => write!(f, "invalid format: {error}"),
            Self::TruncatedInput {
                actual_size,
                expected_size,
            } => write!(
                f,
                "data is truncated: expected {expected_size} bytes but got {actual_size} bytes"
            ),
            Self::EmptyFont => f.write_str("font is empty: no glyph has a non-zero width"),
        }
    }
}

impl error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::InvalidFormat(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use font::{
        bitmap_font::BitmapFont,
        header::{FontMetadata, NAME_SIZE, TypeCode},
    };
    use pretty_assertions::assert_eq;

    use super::*;

    /// In-memory `!Fnt` font used to build test inputs.
    struct OldFont {
        header: OldFontHeader,
        rows: Vec<u8>,
        widths: Vec<u8>,
    }

    impl OldFont {
        fn new(type_code: TypeCode, glyph_height: u8) -> Self {
            let mut name = [0; NAME_SIZE];
            name[..10].copy_from_slice(b"Csilla 10\0");
            let mut family = [0; NAME_SIZE];
            family[..6].copy_from_slice(b"Csilla");

            let header = OldFontHeader {
                metadata: FontMetadata {
                    glyph_width: 7,
                    glyph_height,
                    is_variable_width: 1,
                    glyph_spacing: 2,
                    baseline: 8,
                    mean_line: 3,
                    presentation_size: 10,
                    weight: 700,
                    name,
                    family,
                    unused: 0x1234,
                },
                type_code,
            };

            let glyph_count = type_code.glyph_count();
            Self {
                rows: vec![0; glyph_count * header.bytes_per_glyph()],
                widths: vec![0; glyph_count],
                header,
            }
        }

        fn set_glyph(&mut self, code_point: usize, width: u8, fill: u8) {
            let bytes_per_glyph = self.header.bytes_per_glyph();
            self.widths[code_point] = width;
            self.rows[code_point * bytes_per_glyph..(code_point + 1) * bytes_per_glyph].fill(fill);
        }

        fn to_bytes(&self) -> Vec<u8> {
            let mut bytes = self.header.to_bytes().to_vec();
            bytes.extend_from_slice(&self.rows);
            bytes.extend_from_slice(&self.widths);
            bytes
        }
    }

    #[test]
    fn two_populated_blocks() {
        let mut font = OldFont::new(TypeCode::Glyphs384, 1);
        font.set_glyph(5, 1, 0xA5);
        font.set_glyph(300, 2, 0x5A);

        let converted = convert(&font.to_bytes()).unwrap();
        let range_mask_size = u16::from_le_bytes([converted[6], converted[7]]);
        assert_eq!(range_mask_size, 1);
        assert_eq!(converted[NEW_HEADER_SIZE], 0b0000_0011);

        let rows = &converted[NEW_HEADER_SIZE + 1..NEW_HEADER_SIZE + 1 + 2 * 256 * 4];
        let widths = &converted[NEW_HEADER_SIZE + 1 + 2 * 256 * 4..];
        assert_eq!(widths.len(), 2 * 256);
        assert_eq!(widths[5], 1);
        assert_eq!(widths[256 + 44], 2);
        assert_eq!(widths.iter().filter(|&&width| width != 0).count(), 2);
        assert_eq!(&rows[5 * 4..6 * 4], &[0xA5; 4]);
        assert_eq!(&rows[(256 + 44) * 4..(256 + 45) * 4], &[0x5A; 4]);
    }

    #[test]
    fn glyphs_past_the_glyph_count_are_ignored() {
        // A 256 glyph font only scans the first 256 widths, so trailing bytes never populate a
        // second block.
        let mut font = OldFont::new(TypeCode::Glyphs256, 1);
        font.set_glyph(5, 1, 0xFF);
        let mut bytes = font.to_bytes();
        bytes.extend(vec![0; 44]);
        bytes.push(2);

        let converted = convert(&bytes).unwrap();
        assert_eq!(converted[NEW_HEADER_SIZE], 0b0000_0001);
        assert_eq!(converted.len(), NEW_HEADER_SIZE + 1 + 256 * 4 + 256);
    }

    #[test]
    fn metadata_is_passed_through() {
        let mut font = OldFont::new(TypeCode::Glyphs1280, 12);
        font.set_glyph(1100, 6, 0x0F);

        let converted = convert(&font.to_bytes()).unwrap();
        let header = NewFontHeader::parse(&converted).unwrap();
        assert_eq!(header.metadata, font.header.metadata);
        assert_eq!(header.range_mask_size, 1);
        assert_eq!(&converted[..4], b"+Fnt");
        assert_eq!(&converted[13..15], &700u16.to_le_bytes());
        assert_eq!(&converted[79..81], &0x1234u16.to_le_bytes());
    }

    #[test]
    fn output_sizes_follow_populated_blocks() {
        let mut font = OldFont::new(TypeCode::Glyphs1536, 3);
        for code_point in [0, 255, 600, 1535] {
            font.set_glyph(code_point, 4, 0x11);
        }

        let converted = convert(&font.to_bytes()).unwrap();
        let bytes_per_glyph = 12;
        let blocks_set = 3;
        assert_eq!(converted[NEW_HEADER_SIZE], 0b0010_0101);
        assert_eq!(
            converted.len(),
            NEW_HEADER_SIZE + 1 + blocks_set * 256 * bytes_per_glyph + blocks_set * 256
        );
    }

    #[test]
    fn populated_blocks_survive_round_trip() {
        let mut font = OldFont::new(TypeCode::Glyphs1536, 2);
        for (code_point, width) in [(0x20, 3), (0x41, 5), (0x3A0, 6), (0x5FF, 7)] {
            font.set_glyph(code_point, width, code_point as u8);
        }

        let converted = convert(&font.to_bytes()).unwrap();
        let parsed = BitmapFont::parse(&converted).unwrap();
        assert_eq!(parsed.name(), b"Csilla 10");
        assert_eq!(parsed.family(), b"Csilla");
        assert_eq!(parsed.range_mask().as_bytes(), &[0b0010_1001]);

        let bytes_per_glyph = font.header.bytes_per_glyph();
        for block in parsed.range_mask().blocks() {
            for code_point in block * 256..(block + 1) * 256 {
                let code_point_u32 = u32::try_from(code_point).unwrap();
                let glyph = parsed.glyph(code_point_u32).unwrap();

                assert_eq!(glyph.width(), font.widths[code_point]);
                assert_eq!(
                    glyph.as_bytes(),
                    &font.rows[code_point * bytes_per_glyph..(code_point + 1) * bytes_per_glyph]
                );
            }
        }
        assert!(parsed.glyph(0x100).is_none());
        assert!(parsed.contains(0x3A0));
        assert!(!parsed.contains(0x3A1));
    }

    #[test]
    fn empty_block_contents_are_discarded() {
        let mut font = OldFont::new(TypeCode::Glyphs1280, 1);
        font.set_glyph(0x41, 5, 0xFF);
        let clean = convert(&font.to_bytes()).unwrap();

        // Junk rows in blocks whose widths are all zero.
        font.rows[300 * 4..1000 * 4].fill(0xCC);
        let noisy = convert(&font.to_bytes()).unwrap();

        assert_eq!(clean, noisy);
    }

    #[test]
    fn bad_magic_is_invalid_format() {
        let mut font = OldFont::new(TypeCode::Glyphs256, 1);
        font.set_glyph(1, 1, 1);
        let mut bytes = font.to_bytes();
        bytes[..4].copy_from_slice(b"+Fnt");

        assert_eq!(
            convert(&bytes),
            Err(ConvertError::InvalidFormat(ParseOldHeaderError::InvalidMagic(
                *b"+Fnt"
            )))
        );
    }

    #[test]
    fn unknown_type_code_is_invalid_format() {
        let mut font = OldFont::new(TypeCode::Glyphs256, 1);
        font.set_glyph(1, 1, 1);
        let mut bytes = font.to_bytes();
        bytes[6] = 4;

        assert_eq!(
            convert(&bytes),
            Err(ConvertError::InvalidFormat(
                ParseOldHeaderError::UnknownTypeCode(4)
            ))
        );
    }

    #[test]
    fn short_header_is_invalid_format() {
        assert_eq!(
            convert(b"!Fnt"),
            Err(ConvertError::InvalidFormat(
                ParseOldHeaderError::TruncatedHeader { actual_size: 4 }
            ))
        );
    }

    #[test]
    fn all_zero_widths_are_an_empty_font() {
        let mut font = OldFont::new(TypeCode::Glyphs384, 2);
        font.rows.fill(0xFF);

        assert_eq!(convert(&font.to_bytes()), Err(ConvertError::EmptyFont));
    }

    #[test]
    fn truncated_body_is_zero_extended() {
        let mut font = OldFont::new(TypeCode::Glyphs384, 1);
        font.set_glyph(10, 3, 0x33);
        let mut bytes = font.to_bytes();
        bytes.truncate(OLD_HEADER_SIZE + 384 * 4 + 11);

        let converted = convert(&bytes).unwrap();
        assert_eq!(converted.len(), NEW_HEADER_SIZE + 1 + 256 * 4 + 256);
        assert_eq!(converted[NEW_HEADER_SIZE + 1 + 256 * 4 + 10], 3);
    }

    #[test]
    fn truncated_body_is_rejected_when_strict() {
        let mut font = OldFont::new(TypeCode::Glyphs384, 1);
        font.set_glyph(10, 3, 0x33);
        let mut bytes = font.to_bytes();
        bytes.truncate(bytes.len() - 1);

        assert_eq!(
            convert_with_options(&bytes, ConvertOptions { strict: true }),
            Err(ConvertError::TruncatedInput {
                actual_size: OLD_HEADER_SIZE + 384 * 5 - 1,
                expected_size: OLD_HEADER_SIZE + 384 * 5,
            })
        );
        assert!(convert_with_options(&font.to_bytes(), ConvertOptions { strict: true }).is_ok());
    }
}
