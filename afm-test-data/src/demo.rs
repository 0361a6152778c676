//! Packed catalogs for a pair of synthetic fonts.
//!
//! "Demo Sans" exercises the whole format: a missing width in the
//! direct window, three kerning sub-lists (with two- and three-byte
//! partner encodings), three high characters and a ligature.
//! "Demo Serif" is the minimal case: widths only.

use afm_types::{FixedSize, CATALOG_VERSION};

use crate::bebuffer::BeBuffer;

/// Width bytes for "Demo Sans", one per slot.
///
/// Slots 0..95 are code points 32..=126 in order; slot 94 (`~`) is the
/// reserved missing marker. Slots 95..98 back the high-character
/// entries for é, Œ and Ω.
#[rustfmt::skip]
pub static DEMO_SANS_WIDTHS: [u8; 98] = [
    10, 12, 14, 28, 28, 44, 36, 10, 16, 16,  // 32..=41   ' '=10
    20, 28, 12, 16, 12, 14, 28, 28, 28, 28,  // 42..=51
    28, 28, 28, 28, 28, 28, 14, 14, 28, 28,  // 52..=61
    28, 24, 50, 40, 36, 36, 40, 33, 31, 39,  // 62..=71   'A'=40
    40, 15, 26, 39, 31, 48, 40, 42, 33, 42,  // 72..=81
    38, 33, 34, 40, 38, 52, 38, 36, 34, 16,  // 82..=91   'T'=34, 'V'=38
    12, 16, 20, 28, 14, 32, 33, 29, 33, 32,  // 92..=101
    20, 33, 33, 12, 12, 28, 12, 50, 33, 33,  // 102..=111 'f'=20, 'i'=12
    33, 33, 20, 28, 18, 33, 28, 44, 28, 28,  // 112..=121
    28, 20, 12, 20, 0xFF,                    // 122..=126 '~' missing
    30, 55, 42,                              // é, Œ, Ω
];

/// The shared packed kerning array for "Demo Sans".
///
/// Sub-lists appear in slot order of their first character.
#[rustfmt::skip]
pub static DEMO_SANS_KERNING: [u8; 23] = [
    0,                  // unused byte backing the null index
    // 'A', offset 1
    4,                  // count 3
    87, 0xFB,           // 'V', -5
    0, 84, 0xFD,        // 'Œ' (338, two-byte form), -3
    1, 0x03, 0xA9, 2,   // 'Ω' (937, three-byte form), +2
    // 'T', offset 11
    4,                  // count 3
    102, 0xFD,          // 'e', -3
    112, 0xFD,          // 'o', -3
    122, 0xFE,          // 'y', -2
    // 'V', offset 18
    3,                  // count 2
    66, 0xFC,           // 'A', -4
    102, 0xFE,          // 'e', -2
];

/// Kerning sub-list offset for 'A' in "Demo Sans".
pub const DEMO_SANS_KERN_A: u16 = 1;
/// Kerning sub-list offset for 'T' in "Demo Sans".
pub const DEMO_SANS_KERN_T: u16 = 11;
/// Kerning sub-list offset for 'V' in "Demo Sans".
pub const DEMO_SANS_KERN_V: u16 = 18;

/// Width bytes for "Demo Serif", covering exactly the direct window.
#[rustfmt::skip]
pub static DEMO_SERIF_WIDTHS: [u8; 95] = [
    15, 20, 24, 30, 30, 50, 47, 11, 20, 20,  // 32..=41
    30, 34, 15, 20, 15, 17, 30, 30, 30, 30,  // 42..=51
    30, 30, 30, 30, 30, 30, 17, 17, 34, 34,  // 52..=61
    34, 27, 55, 43, 40, 40, 43, 37, 33, 43,  // 62..=71
    43, 20, 23, 43, 37, 53, 43, 43, 33, 43,  // 72..=81
    40, 33, 37, 43, 43, 57, 43, 43, 37, 20,  // 82..=91
    17, 20, 28, 30, 20, 27, 30, 27, 30, 27,  // 92..=101
    20, 30, 30, 17, 17, 30, 17, 47, 30, 30,  // 102..=111
    30, 30, 20, 23, 17, 30, 30, 43, 30, 30,  // 112..=121
    27, 29, 12, 29, 32,                      // 122..=126
];

/// The packed record for "Demo Sans".
pub fn demo_sans_record() -> BeBuffer {
    let mut kerning_index = [0u16; 98];
    kerning_index[('A' as usize) - 32] = DEMO_SANS_KERN_A;
    kerning_index[('T' as usize) - 32] = DEMO_SANS_KERN_T;
    kerning_index[('V' as usize) - 32] = DEMO_SANS_KERN_V;

    BeBuffer::new()
        .push(9u16) // full name length
        .push(16u16) // postscript name length
        .push(718u16) // ascender
        .push(207u16) // descender
        .push(98u16) // slot count
        .push(3u16) // high character count
        .push(1u16) // ligature count
        .push(23u16) // kerning data length
        .extend(*b"Demo Sans")
        .extend(*b"DemoSans-Regular")
        .extend(DEMO_SANS_WIDTHS)
        .extend(kerning_index)
        .extend([233u16, 95]) // é
        .extend([338u16, 96]) // Œ
        .extend([937u16, 97]) // Ω
        .extend([102u16, 105, 0xFB01]) // f + i -> ﬁ
        .extend(DEMO_SANS_KERNING)
}

/// The packed record for "Demo Serif".
pub fn demo_serif_record() -> BeBuffer {
    BeBuffer::new()
        .push(10u16) // full name length
        .push(17u16) // postscript name length
        .push(683u16) // ascender
        .push(217u16) // descender
        .push(95u16) // slot count
        .push(0u16) // high character count
        .push(0u16) // ligature count
        .push(0u16) // kerning data length
        .extend(*b"Demo Serif")
        .extend(*b"DemoSerif-Regular")
        .extend(DEMO_SERIF_WIDTHS)
        .extend([0u16; 95])
}

/// A complete catalog holding both demo fonts, in name order.
pub fn catalog() -> BeBuffer {
    let sans = demo_sans_record();
    let serif = demo_serif_record();
    let header_len = u32::RAW_BYTE_LEN + u16::RAW_BYTE_LEN + 2 * u32::RAW_BYTE_LEN;
    let sans_offset = header_len as u32;
    let serif_offset = sans_offset + sans.len() as u32;

    BeBuffer::new()
        .push(CATALOG_VERSION)
        .push(2u16) // font count
        .push(sans_offset)
        .push(serif_offset)
        .extend(sans.iter().copied())
        .extend(serif.iter().copied())
}
