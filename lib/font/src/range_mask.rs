//! Interface for the range mask of a `+Fnt` font.
//!
//! The range mask is a bit-vector over blocks of [`GLYPHS_PER_BLOCK`] code points. Bit
//! `block % 8` of byte `block / 8` is set if the block is stored in the font.

use core::{error, fmt};

use crate::header::GLYPHS_PER_BLOCK;

/// The number of code points addressable by a range mask.
pub const MAX_CODE_POINTS: usize = 0x110000;

/// The largest number of bytes a range mask can occupy.
pub const MAX_RANGE_MASK_SIZE: usize = MAX_CODE_POINTS / GLYPHS_PER_BLOCK / 8;

/// A borrowed range mask.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct RangeMask<'buffer> {
    /// The bytes of the mask.
    bytes: &'buffer [u8],
}

impl<'buffer> RangeMask<'buffer> {
    /// Creates a new [`RangeMask`] over `bytes`.
    pub const fn new(bytes: &'buffer [u8]) -> Self {
        Self { bytes }
    }

    /// Returns the raw bytes of the [`RangeMask`].
    pub const fn as_bytes(&self) -> &'buffer [u8] {
        self.bytes
    }

    /// Returns the number of bytes in the [`RangeMask`].
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the [`RangeMask`] has no bytes.
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns `true` if `block` is stored.
    pub fn contains_block(&self, block: usize) -> bool {
        self.bytes
            .get(block / 8)
            .is_some_and(|byte| byte & (1 << (block % 8)) != 0)
    }

    /// Returns the number of stored blocks.
    pub fn block_count(&self) -> usize {
        self.bytes
            .iter()
            .map(|byte| byte.count_ones() as usize)
            .sum()
    }

    /// Returns the position of `block` among the stored blocks, or `None` if `block` is not
    /// stored.
    pub fn block_position(&self, block: usize) -> Option<usize> {
        if !self.contains_block(block) {
            return None;
        }

        let byte_index = block / 8;
        let preceding_bits = (1u8 << (block % 8)) - 1;
        let position = RangeMask::new(&self.bytes[..byte_index]).block_count()
            + (self.bytes[byte_index] & preceding_bits).count_ones() as usize;
        Some(position)
    }

    /// Returns an [`Iterator`] over the stored blocks in ascending order.
    pub const fn blocks(&self) -> Blocks<'buffer> {
        Blocks {
            bytes: self.bytes,
            next: 0,
        }
    }
}

/// An [`Iterator`] over the stored blocks of a [`RangeMask`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Blocks<'buffer> {
    /// The bytes of the mask.
    bytes: &'buffer [u8],
    /// The next block to test.
    next: usize,
}

impl Iterator for Blocks<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.bytes.len() * 8 {
            let block = self.next;
            self.next += 1;

            if self.bytes[block / 8] & (1 << (block % 8)) != 0 {
                return Some(block);
            }
        }

        None
    }
}

/// Builder for a minimal [`RangeMask`].
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct RangeMaskBuilder {
    /// Scratch space large enough for every addressable block.
    bytes: [u8; MAX_RANGE_MASK_SIZE],
    /// The number of bytes up to and including the last non-zero byte.
    size: u16,
}

impl RangeMaskBuilder {
    /// Creates a new [`RangeMaskBuilder`] with no blocks set.
    pub const fn new() -> Self {
        Self {
            bytes: [0; MAX_RANGE_MASK_SIZE],
            size: 0,
        }
    }

    /// Creates a [`RangeMaskBuilder`] with a block set for every block containing a glyph with a
    /// non-zero width.
    ///
    /// `widths` is indexed by code point. Entries past [`MAX_CODE_POINTS`] are ignored.
    pub fn from_widths(widths: &[u8]) -> Self {
        let mut builder = Self::new();
        for (code_point, _) in widths
            .iter()
            .take(MAX_CODE_POINTS)
            .enumerate()
            .filter(|(_, width)| **width > 0)
        {
            let block = code_point / GLYPHS_PER_BLOCK;
            builder.bytes[block / 8] |= 1 << (block % 8);
            builder.size = builder.size.max(mask_size_for(block));
        }

        builder
    }

    /// Marks `block` as stored.
    ///
    /// # Errors
    ///
    /// Returns [`BlockOutOfRangeError`] if `block` lies past [`MAX_CODE_POINTS`].
    pub fn insert_block(&mut self, block: usize) -> Result<(), BlockOutOfRangeError> {
        if block >= MAX_RANGE_MASK_SIZE * 8 {
            return Err(BlockOutOfRangeError { block });
        }

        self.bytes[block / 8] |= 1 << (block % 8);
        self.size = self.size.max(mask_size_for(block));
        Ok(())
    }

    /// Returns the number of bytes in the minimal [`RangeMask`].
    pub const fn size(&self) -> u16 {
        self.size
    }

    /// Returns `true` if no block has been set.
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the minimal [`RangeMask`], without any trailing zero bytes.
    pub fn range_mask(&self) -> RangeMask<'_> {
        RangeMask::new(&self.bytes[..usize::from(self.size)])
    }
}

impl Default for RangeMaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the number of mask bytes required to contain `block`.
///
/// `block` must be addressable, so the result always fits in a `u16`.
#[expect(clippy::cast_possible_truncation)]
const fn mask_size_for(block: usize) -> u16 {
    (block / 8 + 1) as u16
}

/// An attempt was made to insert a block that a [`RangeMask`] cannot address.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct BlockOutOfRangeError {
    /// The rejected block.
    pub block: usize,
}

impl fmt::Display for BlockOutOfRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "block {} is past the last addressable block {}",
            self.block,
            MAX_RANGE_MASK_SIZE * 8 - 1
        )
    }
}

impl error::Error for BlockOutOfRangeError {}
