//! Interface for interacting with glyphs.

/// The number of bytes used to store a single pixel row of a [`Glyph`].
pub const BYTES_PER_ROW: usize = 4;

/// Stores the on/off layout of a specific glyph in a font.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Glyph<'buffer> {
    /// The buffer utilized to store the glyph.
    buffer: &'buffer [u8],
    /// The width of the glyph.
    width: u8,
    /// The height of the glyph.
    height: u8,
}

impl<'buffer> Glyph<'buffer> {
    /// Creates a new [`Glyph`] of `width` by `height` pixels stored in `buffer`.
    ///
    /// Returns `None` if `buffer` cannot hold `height` rows.
    pub fn new(buffer: &'buffer [u8], width: u8, height: u8) -> Option<Self> {
        let buffer = buffer.get(..BYTES_PER_ROW * usize::from(height))?;

        let glyph = Self {
            buffer,
            width,
            height,
        };
        Some(glyph)
    }

    /// Returns the width of the [`Glyph`] in pixels.
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Returns the height of the [`Glyph`] in pixels.
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Returns the [`GlyphRow`] at `index` or `None` if out of bounds.
    pub fn row(&self, index: u8) -> Option<GlyphRow> {
        if index >= self.height {
            return None;
        }

        let offset = usize::from(index) * BYTES_PER_ROW;
        let bytes = self.buffer[offset..].first_chunk::<BYTES_PER_ROW>()?;
        let row = GlyphRow {
            bits: u32::from_le_bytes(*bytes),
            width: self.width,
        };
        Some(row)
    }

    /// Returns the raw bytes of the [`Glyph`].
    pub const fn as_bytes(&self) -> &'buffer [u8] {
        self.buffer
    }
}

impl<'buffer> IntoIterator for Glyph<'buffer> {
    type IntoIter = GlyphRowsIter<'buffer>;
    type Item = GlyphRow;

    fn into_iter(self) -> Self::IntoIter {
        GlyphRowsIter {
            glyph: self,
            index: 0,
        }
    }
}

/// An [`Iterator`] over the rows of a [`Glyph`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRowsIter<'buffer> {
    /// The glyph whose rows are being iterated.
    glyph: Glyph<'buffer>,
    /// The index of the row that will be returned next.
    index: u8,
}

impl Iterator for GlyphRowsIter<'_> {
    type Item = GlyphRow;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.glyph.row(self.index)?;
        self.index += 1;
        Some(row)
    }
}

/// A single row of a [`Glyph`].
///
/// Bit `x` of the row is the pixel in column `x`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRow {
    /// The pixels of the row.
    bits: u32,
    /// The width of the row.
    width: u8,
}

impl GlyphRow {
    /// Returns `true` if the pixel in column `x` is set. Columns past the width of the row are
    /// never set.
    pub const fn pixel(&self, x: u8) -> bool {
        x < self.width && x < 32 && (self.bits >> x) & 0b1 == 0b1
    }

    /// Returns the raw bits of the row.
    pub const fn bits(&self) -> u32 {
        self.bits
    }
}

impl IntoIterator for GlyphRow {
    type IntoIter = GlyphRowIter;
    type Item = bool;

    fn into_iter(self) -> Self::IntoIter {
        GlyphRowIter {
            row: self,
            index: 0,
        }
    }
}

/// An [`Iterator`] over the pixels in a [`GlyphRow`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRowIter {
    /// The row whose pixels are being iterated.
    row: GlyphRow,
    /// The index of the pixel value to be returned.
    index: u8,
}

impl Iterator for GlyphRowIter {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.row.width {
            return None;
        }

        let pixel = self.row.pixel(self.index);
        self.index += 1;
        Some(pixel)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rows_are_little_endian_words() {
        let buffer = [0b0000_0101, 0, 0, 0x80, 0b0000_0010, 0, 0, 0];
        let glyph = Glyph::new(&buffer, 3, 2).unwrap();

        let mut rows = glyph.into_iter();
        let first = rows.next().unwrap();
        assert_eq!(first.bits(), 0x8000_0005);
        assert_eq!(first.into_iter().collect::<Vec<_>>(), [true, false, true]);

        let second = rows.next().unwrap();
        assert_eq!(second.into_iter().collect::<Vec<_>>(), [false, true, false]);
        assert!(rows.next().is_none());
    }

    #[test]
    fn pixels_past_width_are_clear() {
        let row = GlyphRow {
            bits: u32::MAX,
            width: 4,
        };

        assert!(row.pixel(3));
        assert!(!row.pixel(4));
        assert!(!row.pixel(31));
    }

    #[test]
    fn short_buffer_is_rejected() {
        assert!(Glyph::new(&[0; 7], 8, 2).is_none());
        assert!(Glyph::new(&[0; 8], 8, 2).is_some());
    }
}
