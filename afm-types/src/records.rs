//! Flattened records shared by the packed font-metrics format.
//!
//! These are stored as plain arrays of big-endian fields so a packed
//! table can be reinterpreted in place, without any copying or
//! per-record allocation.

use crate::raw::{BigEndian, FixedSize};

/// An entry in a font's high-character index.
///
/// Maps a code point above the direct window to the slot holding its
/// width and kerning index. The index is sorted ascending by code
/// point, with no duplicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "bytemuck",
    derive(bytemuck_derive::AnyBitPattern)
)]
#[repr(C)]
pub struct HighCharRecord {
    /// The code point, always above the direct window.
    pub codepoint: BigEndian<u16>,
    /// Index into the font's width and kerning-index arrays.
    pub slot: BigEndian<u16>,
}

impl HighCharRecord {
    pub fn new(codepoint: u16, slot: u16) -> Self {
        HighCharRecord {
            codepoint: codepoint.into(),
            slot: slot.into(),
        }
    }

    /// The code point this entry maps.
    pub fn codepoint(&self) -> u16 {
        self.codepoint.get()
    }

    /// The slot holding this code point's width and kerning index.
    pub fn slot(&self) -> u16 {
        self.slot.get()
    }
}

impl FixedSize for HighCharRecord {
    const RAW_BYTE_LEN: usize = u16::RAW_BYTE_LEN * 2;
}

/// A ligature substitution entry.
///
/// Purely informational: the string-width computation ignores
/// ligatures, but callers doing glyph substitution still need the
/// mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "bytemuck",
    derive(bytemuck_derive::AnyBitPattern)
)]
#[repr(C)]
pub struct LigatureRecord {
    /// The first code point of the pair.
    pub first: BigEndian<u16>,
    /// The second code point of the pair.
    pub second: BigEndian<u16>,
    /// The code point of the substituting glyph.
    pub ligature: BigEndian<u16>,
}

impl LigatureRecord {
    pub fn new(first: u16, second: u16, ligature: u16) -> Self {
        LigatureRecord {
            first: first.into(),
            second: second.into(),
            ligature: ligature.into(),
        }
    }

    /// The first code point of the pair.
    pub fn first(&self) -> u16 {
        self.first.get()
    }

    /// The second code point of the pair.
    pub fn second(&self) -> u16 {
        self.second.get()
    }

    /// The code point of the substituting glyph.
    pub fn ligature(&self) -> u16 {
        self.ligature.get()
    }
}

impl FixedSize for LigatureRecord {
    const RAW_BYTE_LEN: usize = u16::RAW_BYTE_LEN * 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_sizes_match_the_packed_layout() {
        assert_eq!(HighCharRecord::RAW_BYTE_LEN, 4);
        assert_eq!(LigatureRecord::RAW_BYTE_LEN, 6);
        assert_eq!(
            std::mem::size_of::<HighCharRecord>(),
            HighCharRecord::RAW_BYTE_LEN
        );
        assert_eq!(
            std::mem::size_of::<LigatureRecord>(),
            LigatureRecord::RAW_BYTE_LEN
        );
    }

    #[test]
    fn accessors() {
        let rec = HighCharRecord::new(0xE9, 97);
        assert_eq!(rec.codepoint(), 0xE9);
        assert_eq!(rec.slot(), 97);

        let lig = LigatureRecord::new(0x66, 0x69, 0xFB01);
        assert_eq!((lig.first(), lig.second(), lig.ligature()), (0x66, 0x69, 0xFB01));
    }
}
