//! Defines the on-disk layouts of the `!Fnt` and `+Fnt` bitmap font formats.
//!
//! Includes both read-only and writable interfaces.
#![cfg_attr(not(test), no_std)]

pub mod bitmap_font;
pub mod glyph;
pub mod header;
pub mod range_mask;
