//! A single font's packed metrics record

use afm_types::{
    BigEndian, CharWidth, FixedSize, HighCharRecord, KernValue, LigatureRecord, DIRECT_CHAR_COUNT,
    DIRECT_CHAR_MAX, DIRECT_CHAR_MIN,
};

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};
use crate::tables::kern::{KernData, KernPairs};

/// The length of a record's fixed header, in bytes.
pub(crate) const HEADER_LEN: usize = 8 * u16::RAW_BYTE_LEN;

/// The packed metrics for one font.
///
/// A record stores the font's names and vertical extents, one width
/// byte and one kerning-index entry per slot, the sorted
/// high-character index, the ligature list, and the shared kerning
/// array. Slots 0..95 always cover code points 32..=126 in order; any
/// further slots are reached through the high-character index.
#[derive(Debug, Clone)]
pub struct FontMetrics<'a> {
    full_name: &'a str,
    postscript_name: &'a str,
    ascender: u16,
    descender: u16,
    widths: &'a [u8],
    kerning_index: &'a [BigEndian<u16>],
    high_chars: &'a [HighCharRecord],
    ligatures: &'a [LigatureRecord],
    kerning: KernData<'a>,
}

impl<'a> FontRead<'a> for FontMetrics<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let full_name_len = cursor.read::<u16>()? as usize;
        let postscript_name_len = cursor.read::<u16>()? as usize;
        let ascender = cursor.read::<u16>()?;
        let descender = cursor.read::<u16>()?;
        let slot_count = cursor.read::<u16>()? as usize;
        let high_char_count = cursor.read::<u16>()? as usize;
        let ligature_count = cursor.read::<u16>()? as usize;
        let kerning_len = cursor.read::<u16>()? as usize;
        if slot_count < DIRECT_CHAR_COUNT {
            return Err(ReadError::MalformedData(
                "width array smaller than the direct window",
            ));
        }
        let full_name = read_str(cursor.read_array::<u8>(full_name_len)?)?;
        let postscript_name = read_str(cursor.read_array::<u8>(postscript_name_len)?)?;
        let widths = cursor.read_array::<u8>(slot_count)?;
        let kerning_index = cursor.read_array::<BigEndian<u16>>(slot_count)?;
        let high_chars = cursor.read_array::<HighCharRecord>(high_char_count)?;
        let ligatures = cursor.read_array::<LigatureRecord>(ligature_count)?;
        let kerning_start = cursor.position()?;
        let kerning = data
            .slice(kerning_start..kerning_start + kerning_len)
            .map(KernData::new)
            .ok_or(ReadError::OutOfBounds)?;

        let mut prev_codepoint = None;
        for record in high_chars {
            let codepoint = record.codepoint();
            if codepoint <= DIRECT_CHAR_MAX {
                return Err(ReadError::MalformedData(
                    "high character inside the direct window",
                ));
            }
            if prev_codepoint.is_some_and(|prev| prev >= codepoint) {
                return Err(ReadError::MalformedData("high characters out of order"));
            }
            if record.slot() as usize >= slot_count {
                return Err(ReadError::MalformedData("high character slot out of range"));
            }
            prev_codepoint = Some(codepoint);
        }
        for offset in kerning_index {
            kerning.validate_offset(offset.get())?;
        }

        Ok(FontMetrics {
            full_name,
            postscript_name,
            ascender,
            descender,
            widths,
            kerning_index,
            high_chars,
            ligatures,
            kerning,
        })
    }
}

impl<'a> FontMetrics<'a> {
    /// The font's full name, as used for catalog lookup.
    pub fn full_name(&self) -> &'a str {
        self.full_name
    }

    /// The font's PostScript name.
    pub fn postscript_name(&self) -> &'a str {
        self.postscript_name
    }

    /// The ascender, in AFM thousandths.
    pub fn ascender(&self) -> u16 {
        self.ascender
    }

    /// The descender, in AFM thousandths, stored as a positive
    /// distance below the baseline.
    pub fn descender(&self) -> u16 {
        self.descender
    }

    /// The number of width slots, including any high-character slots.
    pub fn slot_count(&self) -> usize {
        self.widths.len()
    }

    /// The raw width bytes, one per slot.
    pub fn width_bytes(&self) -> &'a [u8] {
        self.widths
    }

    /// The sorted high-character index.
    pub fn high_chars(&self) -> &'a [HighCharRecord] {
        self.high_chars
    }

    /// The ligature list.
    pub fn ligatures(&self) -> &'a [LigatureRecord] {
        self.ligatures
    }

    /// Map a code point to its width slot.
    ///
    /// Code points inside the direct window map by position; anything
    /// above it goes through a binary search of the high-character
    /// index. Control characters and code points beyond `u16` have no
    /// slot.
    pub fn slot(&self, codepoint: impl Into<u32>) -> Option<u16> {
        let codepoint = codepoint.into();
        if codepoint > 0xFFFF {
            return None;
        }
        let codepoint = codepoint as u16;
        if codepoint < DIRECT_CHAR_MIN {
            None
        } else if codepoint <= DIRECT_CHAR_MAX {
            Some(codepoint - DIRECT_CHAR_MIN)
        } else {
            self.high_char_slot(codepoint)
        }
    }

    fn high_char_slot(&self, codepoint: u16) -> Option<u16> {
        let mut lo = 0;
        let mut hi = self.high_chars.len();
        while lo < hi {
            let i = (lo + hi) / 2;
            let record = self.high_chars.get(i)?;
            if codepoint < record.codepoint() {
                hi = i;
            } else if codepoint > record.codepoint() {
                lo = i + 1;
            } else {
                return Some(record.slot());
            }
        }
        None
    }

    /// The stored width of a code point.
    ///
    /// Returns `None` if the code point has no slot; a slot whose
    /// width byte is the reserved marker yields
    /// [`CharWidth::MISSING`].
    pub fn width(&self, codepoint: impl Into<u32>) -> Option<CharWidth> {
        let slot = self.slot(codepoint)?;
        self.widths
            .get(slot as usize)
            .map(|&byte| CharWidth::new(byte))
    }

    /// The kerning adjustment for a pair of code points, if one is
    /// stored.
    pub fn kerning(&self, left: impl Into<u32>, right: impl Into<u32>) -> Option<KernValue> {
        let right = right.into();
        if right > 0xFFFF {
            return None;
        }
        let offset = self.kerning_offset(self.slot(left)?)?;
        self.kerning.adjustment(offset, right as u16)
    }

    /// The kerning pairs with `left` as their first character.
    pub fn kerning_pairs(&self, left: impl Into<u32>) -> Option<KernPairs<'a>> {
        let offset = self.kerning_offset(self.slot(left)?)?;
        self.kerning.pairs(offset)
    }

    fn kerning_offset(&self, slot: u16) -> Option<u16> {
        let offset = self.kerning_index.get(slot as usize)?.get();
        (offset != 0).then_some(offset)
    }

    /// The ligature code point substituting for a pair, if one is
    /// stored.
    pub fn ligature(&self, first: impl Into<u32>, second: impl Into<u32>) -> Option<u16> {
        let (first, second) = (first.into(), second.into());
        self.ligatures
            .iter()
            .find(|record| record.first() as u32 == first && record.second() as u32 == second)
            .map(|record| record.ligature())
    }
}

fn read_str(bytes: &[u8]) -> Result<&str, ReadError> {
    std::str::from_utf8(bytes).map_err(|_| ReadError::MalformedData("font name is not valid UTF-8"))
}
