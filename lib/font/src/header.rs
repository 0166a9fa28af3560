//! Fixed-layout headers of the `!Fnt` and `+Fnt` bitmap font formats.
//!
//! Both headers are little-endian and packed. The `!Fnt` header selects its glyph count through a
//! [`TypeCode`], while the `+Fnt` header instead records the size of the range mask that follows
//! it.

use core::{error, fmt};

/// The magic bytes that begin a `!Fnt` font.
pub const OLD_MAGIC: [u8; 4] = *b"!Fnt";
/// The magic bytes that begin a `+Fnt` font.
pub const NEW_MAGIC: [u8; 4] = *b"+Fnt";

/// The size, in bytes, of an [`OldFontHeader`].
pub const OLD_HEADER_SIZE: usize = 80;
/// The size, in bytes, of a [`NewFontHeader`].
pub const NEW_HEADER_SIZE: usize = 81;

/// The size, in bytes, of the `name` and `family` text fields.
pub const NAME_SIZE: usize = 32;

/// The number of glyphs covered by a single bit of the range mask.
pub const GLYPHS_PER_BLOCK: usize = 256;

/// Metadata carried unchanged from an [`OldFontHeader`] into a [`NewFontHeader`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct FontMetadata {
    /// The width of each glyph cell in pixels.
    pub glyph_width: u8,
    /// The height of each glyph cell in pixels.
    pub glyph_height: u8,
    /// Non-zero if glyphs may have individual widths.
    pub is_variable_width: u8,
    /// The horizontal spacing between glyphs in pixels.
    pub glyph_spacing: u8,
    /// The row of the baseline.
    pub baseline: u8,
    /// The row of the mean line.
    pub mean_line: u8,
    /// The nominal point size of the font.
    pub presentation_size: u8,
    /// The weight of the font (400 is regular).
    pub weight: u16,
    /// The NUL-padded name of the font.
    pub name: [u8; NAME_SIZE],
    /// The NUL-padded family of the font.
    pub family: [u8; NAME_SIZE],
    /// Trailing field with no assigned meaning.
    pub unused: u16,
}

impl FontMetadata {
    /// Returns the number of bytes used to store the bitmap of a single glyph.
    ///
    /// Each pixel row is a 32-bit word, so this is always `4 * glyph_height`.
    pub fn bytes_per_glyph(&self) -> usize {
        4 * usize::from(self.glyph_height)
    }
}

/// Selects the number of glyphs stored in a `!Fnt` font.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum TypeCode {
    /// 256 glyphs.
    Glyphs256,
    /// 384 glyphs.
    Glyphs384,
    /// 1280 glyphs.
    Glyphs1280,
    /// 1536 glyphs.
    Glyphs1536,
}

impl TypeCode {
    /// Returns the [`TypeCode`] encoded by `value`, or `None` if `value` is unknown.
    pub const fn from_u8(value: u8) -> Option<Self> {
        let type_code = match value {
            0 => Self::Glyphs256,
            1 => Self::Glyphs384,
            2 => Self::Glyphs1280,
            3 => Self::Glyphs1536,
            _ => return None,
        };

        Some(type_code)
    }

    /// Returns the on-disk encoding of the [`TypeCode`].
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Glyphs256 => 0,
            Self::Glyphs384 => 1,
            Self::Glyphs1280 => 2,
            Self::Glyphs1536 => 3,
        }
    }

    /// Returns the number of glyphs stored in a font with this [`TypeCode`].
    pub const fn glyph_count(self) -> usize {
        match self {
            Self::Glyphs256 => 256,
            Self::Glyphs384 => 384,
            Self::Glyphs1280 => 1280,
            Self::Glyphs1536 => 1536,
        }
    }
}

/// The header of a `!Fnt` font.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct OldFontHeader {
    /// The metadata of the font.
    pub metadata: FontMetadata,
    /// The number of glyphs in the font.
    pub type_code: TypeCode,
}

impl OldFontHeader {
    /// Parses the [`OldFontHeader`] at the start of `font`.
    ///
    /// # Errors
    ///
    /// - [`ParseOldHeaderError::TruncatedHeader`]: Returned if `font` is shorter than
    ///   [`OLD_HEADER_SIZE`].
    /// - [`ParseOldHeaderError::InvalidMagic`]: Returned if `font` does not start with
    ///   [`OLD_MAGIC`].
    /// - [`ParseOldHeaderError::UnknownTypeCode`]: Returned if the type code is not one of the
    ///   four known [`TypeCode`]s.
    pub fn parse(font: &[u8]) -> Result<Self, ParseOldHeaderError> {
        let Some(header) = font.first_chunk::<OLD_HEADER_SIZE>() else {
            return Err(ParseOldHeaderError::TruncatedHeader {
                actual_size: font.len(),
            });
        };

        let mut reader = Reader::new(header);
        let magic = reader.array::<4>();
        if magic != OLD_MAGIC {
            return Err(ParseOldHeaderError::InvalidMagic(magic));
        }

        let glyph_width = reader.u8();
        let glyph_height = reader.u8();
        let raw_type_code = reader.u8();
        let type_code = TypeCode::from_u8(raw_type_code)
            .ok_or(ParseOldHeaderError::UnknownTypeCode(raw_type_code))?;

        let metadata = FontMetadata {
            glyph_width,
            glyph_height,
            is_variable_width: reader.u8(),
            glyph_spacing: reader.u8(),
            baseline: reader.u8(),
            mean_line: reader.u8(),
            presentation_size: reader.u8(),
            weight: reader.u16(),
            name: reader.array(),
            family: reader.array(),
            unused: reader.u16(),
        };

        Ok(Self {
            metadata,
            type_code,
        })
    }

    /// Returns the number of glyphs in the font.
    pub const fn glyph_count(&self) -> usize {
        self.type_code.glyph_count()
    }

    /// Returns the number of bytes used to store the bitmap of a single glyph.
    pub fn bytes_per_glyph(&self) -> usize {
        self.metadata.bytes_per_glyph()
    }

    /// Returns the on-disk representation of the [`OldFontHeader`].
    pub fn to_bytes(&self) -> [u8; OLD_HEADER_SIZE] {
        let mut bytes = [0; OLD_HEADER_SIZE];

        let mut writer = Writer::new(&mut bytes);
        writer.bytes(&OLD_MAGIC);
        writer.u8(self.metadata.glyph_width);
        writer.u8(self.metadata.glyph_height);
        writer.u8(self.type_code.as_u8());
        writer.u8(self.metadata.is_variable_width);
        writer.u8(self.metadata.glyph_spacing);
        writer.u8(self.metadata.baseline);
        writer.u8(self.metadata.mean_line);
        writer.u8(self.metadata.presentation_size);
        writer.u16(self.metadata.weight);
        writer.bytes(&self.metadata.name);
        writer.bytes(&self.metadata.family);
        writer.u16(self.metadata.unused);

        bytes
    }
}

/// Various errors that can occur while parsing an [`OldFontHeader`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum ParseOldHeaderError {
    /// The font is too small to contain an [`OldFontHeader`].
    TruncatedHeader {
        /// The size of the provided font.
        actual_size: usize,
    },
    /// The font does not start with [`OLD_MAGIC`].
    InvalidMagic([u8; 4]),
    /// The type code is not a known [`TypeCode`].
    UnknownTypeCode(u8),
}

impl fmt::Display for ParseOldHeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedHeader { actual_size } => write!(
                f,
                "header is truncated: expected {OLD_HEADER_SIZE} bytes but got {actual_size} bytes"
            ),
            Self::InvalidMagic(magic) => write!(
                f,
                "not a valid old format font: magic is {} instead of \"!Fnt\"",
                magic.escape_ascii()
            ),
            Self::UnknownTypeCode(type_code) => write!(f, "unknown type code: {type_code}"),
        }
    }
}

impl error::Error for ParseOldHeaderError {}

/// The header of a `+Fnt` font.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct NewFontHeader {
    /// The metadata of the font.
    pub metadata: FontMetadata,
    /// The number of bytes in the range mask that follows the header.
    pub range_mask_size: u16,
}

impl NewFontHeader {
    /// Parses the [`NewFontHeader`] at the start of `font`.
    ///
    /// # Errors
    ///
    /// - [`ParseNewHeaderError::TruncatedHeader`]: Returned if `font` is shorter than
    ///   [`NEW_HEADER_SIZE`].
    /// - [`ParseNewHeaderError::InvalidMagic`]: Returned if `font` does not start with
    ///   [`NEW_MAGIC`].
    pub fn parse(font: &[u8]) -> Result<Self, ParseNewHeaderError> {
        let Some(header) = font.first_chunk::<NEW_HEADER_SIZE>() else {
            return Err(ParseNewHeaderError::TruncatedHeader {
                actual_size: font.len(),
            });
        };

        let mut reader = Reader::new(header);
        let magic = reader.array::<4>();
        if magic != NEW_MAGIC {
            return Err(ParseNewHeaderError::InvalidMagic(magic));
        }

        let glyph_width = reader.u8();
        let glyph_height = reader.u8();
        let range_mask_size = reader.u16();

        let metadata = FontMetadata {
            glyph_width,
            glyph_height,
            is_variable_width: reader.u8(),
            glyph_spacing: reader.u8(),
            baseline: reader.u8(),
            mean_line: reader.u8(),
            presentation_size: reader.u8(),
            weight: reader.u16(),
            name: reader.array(),
            family: reader.array(),
            unused: reader.u16(),
        };

        Ok(Self {
            metadata,
            range_mask_size,
        })
    }

    /// Returns the on-disk representation of the [`NewFontHeader`].
    pub fn to_bytes(&self) -> [u8; NEW_HEADER_SIZE] {
        let mut bytes = [0; NEW_HEADER_SIZE];

        let mut writer = Writer::new(&mut bytes);
        writer.bytes(&NEW_MAGIC);
        writer.u8(self.metadata.glyph_width);
        writer.u8(self.metadata.glyph_height);
        writer.u16(self.range_mask_size);
        writer.u8(self.metadata.is_variable_width);
        writer.u8(self.metadata.glyph_spacing);
        writer.u8(self.metadata.baseline);
        writer.u8(self.metadata.mean_line);
        writer.u8(self.metadata.presentation_size);
        writer.u16(self.metadata.weight);
        writer.bytes(&self.metadata.name);
        writer.bytes(&self.metadata.family);
        writer.u16(self.metadata.unused);

        bytes
    }
}

/// Various errors that can occur while parsing a [`NewFontHeader`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum ParseNewHeaderError {
    /// The font is too small to contain a [`NewFontHeader`].
    TruncatedHeader {
        /// The size of the provided font.
        actual_size: usize,
    },
    /// The font does not start with [`NEW_MAGIC`].
    InvalidMagic([u8; 4]),
}

impl fmt::Display for ParseNewHeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedHeader { actual_size } => write!(
                f,
                "header is truncated: expected {NEW_HEADER_SIZE} bytes but got {actual_size} bytes"
            ),
            Self::InvalidMagic(magic) => write!(
                f,
                "not a valid new format font: magic is {} instead of \"+Fnt\"",
                magic.escape_ascii()
            ),
        }
    }
}

impl error::Error for ParseNewHeaderError {}

/// Sequential little-endian reads from a header whose size has already been checked.
struct Reader<'buffer> {
    /// The header being read.
    buffer: &'buffer [u8],
    /// The offset of the next field.
    offset: usize,
}

impl<'buffer> Reader<'buffer> {
    /// Creates a new [`Reader`] positioned at the start of `buffer`.
    const fn new(buffer: &'buffer [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    /// Reads the next `N` bytes.
    fn array<const N: usize>(&mut self) -> [u8; N] {
        let mut value = [0; N];
        value.copy_from_slice(&self.buffer[self.offset..self.offset + N]);

        self.offset += N;
        value
    }

    /// Reads the next byte.
    fn u8(&mut self) -> u8 {
        let [value] = self.array();
        value
    }

    /// Reads the next little-endian `u16`.
    fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.array())
    }
}

/// Sequential little-endian writes into a header buffer.
struct Writer<'buffer> {
    /// The header being written.
    buffer: &'buffer mut [u8],
    /// The offset of the next field.
    offset: usize,
}

impl<'buffer> Writer<'buffer> {
    /// Creates a new [`Writer`] positioned at the start of `buffer`.
    const fn new(buffer: &'buffer mut [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    /// Writes `bytes` verbatim.
    fn bytes(&mut self, bytes: &[u8]) {
        self.buffer[self.offset..self.offset + bytes.len()].copy_from_slice(bytes);
        self.offset += bytes.len();
    }

    /// Writes a single byte.
    fn u8(&mut self, value: u8) {
        self.bytes(&[value]);
    }

    /// Writes a little-endian `u16`.
    fn u16(&mut self, value: u16) {
        self.bytes(&value.to_le_bytes());
    }
}
