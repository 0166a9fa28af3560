//! Splitting of a `!Fnt` body into its glyph tables and compaction of the stored blocks.

use font::{header::GLYPHS_PER_BLOCK, range_mask::RangeMask};

/// The row bitmaps and widths of a `!Fnt` font, indexed by code point.
///
/// Either table may be shorter than the glyph count requires if the font is truncated. Missing
/// bytes are treated as zero.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct GlyphTable<'buffer> {
    /// The row bitmaps, `bytes_per_glyph` bytes per glyph.
    rows: &'buffer [u8],
    /// The width of each glyph.
    widths: &'buffer [u8],
    /// The number of glyphs the font claims to contain.
    glyph_count: usize,
    /// The number of bytes used to store the bitmap of a single glyph.
    bytes_per_glyph: usize,
}

impl<'buffer> GlyphTable<'buffer> {
    /// Splits `body` into `glyph_count` row bitmaps of `bytes_per_glyph` bytes followed by
    /// `glyph_count` widths.
    ///
    /// Bytes past the end of the width table are ignored.
    pub fn split(body: &'buffer [u8], glyph_count: usize, bytes_per_glyph: usize) -> Self {
        let rows_end = (glyph_count * bytes_per_glyph).min(body.len());
        let widths_end = (glyph_count * bytes_per_glyph + glyph_count).min(body.len());

        Self {
            rows: &body[..rows_end],
            widths: &body[rows_end..widths_end],
            glyph_count,
            bytes_per_glyph,
        }
    }

    /// Returns the row bitmaps present in the body.
    pub const fn rows(&self) -> &'buffer [u8] {
        self.rows
    }

    /// Returns the widths present in the body.
    pub const fn widths(&self) -> &'buffer [u8] {
        self.widths
    }

    /// Returns the number of glyphs the font claims to contain.
    pub const fn glyph_count(&self) -> usize {
        self.glyph_count
    }

    /// Returns the number of bytes used to store the bitmap of a single glyph.
    pub const fn bytes_per_glyph(&self) -> usize {
        self.bytes_per_glyph
    }

    /// Returns the number of body bytes required to hold every glyph.
    pub const fn expected_size(&self) -> usize {
        self.glyph_count * (self.bytes_per_glyph + 1)
    }

    /// Returns the number of body bytes missing from the glyph tables.
    pub const fn missing_size(&self) -> usize {
        self.expected_size() - self.rows.len() - self.widths.len()
    }
}

/// The row bitmaps and widths of the blocks stored in a `+Fnt` font.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct CompactedGlyphs {
    /// The row bitmaps of every stored block, in ascending block order.
    pub rows: Vec<u8>,
    /// The widths of every stored block, in ascending block order.
    pub widths: Vec<u8>,
}

/// Copies every block of `table` that is set in `range_mask`, in ascending block order.
///
/// Each block is zero-padded to [`GLYPHS_PER_BLOCK`] glyphs if `table` ends inside it.
pub fn compact(table: &GlyphTable<'_>, range_mask: RangeMask<'_>) -> CompactedGlyphs {
    let block_count = range_mask.block_count();
    let block_rows_size = GLYPHS_PER_BLOCK * table.bytes_per_glyph();

    let mut compacted = CompactedGlyphs {
        rows: Vec::with_capacity(block_count * block_rows_size),
        widths: Vec::with_capacity(block_count * GLYPHS_PER_BLOCK),
    };
    for block in range_mask.blocks() {
        extend_padded(
            &mut compacted.rows,
            table.rows(),
            block * block_rows_size,
            block_rows_size,
        );
        extend_padded(
            &mut compacted.widths,
            table.widths(),
            block * GLYPHS_PER_BLOCK,
            GLYPHS_PER_BLOCK,
        );
    }

    compacted
}

/// Appends `size` bytes of `source` starting at `start` to `output`, substituting zero for any
/// byte past the end of `source`.
fn extend_padded(output: &mut Vec<u8>, source: &[u8], start: usize, size: usize) {
    let padded_len = output.len() + size;

    let start = start.min(source.len());
    let end = start.saturating_add(size).min(source.len());
    output.extend_from_slice(&source[start..end]);
    output.resize(padded_len, 0);
}
