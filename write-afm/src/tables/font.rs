//! An editable font record

use std::collections::BTreeMap;

use afm_types::{
    varint, CharWidth, KernValue, DIRECT_CHAR_COUNT, DIRECT_CHAR_MAX, DIRECT_CHAR_MIN,
};

use crate::validate::{Validate, ValidationCtx};
use crate::write::{FontWrite, TableWriter};

/// The metrics of a single font, in editable form.
///
/// Character data lives in a map keyed by `char`, so entries can be set
/// in any order; compilation assigns storage slots deterministically,
/// covering the direct window first and then any higher characters in
/// code point order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Font {
    /// The font's full name, the catalog lookup key.
    pub full_name: String,
    /// The font's PostScript name.
    pub postscript_name: String,
    /// Typographic ascender, in AFM thousandths.
    pub ascender: u16,
    /// Typographic descender magnitude, in AFM thousandths.
    pub descender: u16,
    chars: BTreeMap<char, CharMetrics>,
    ligatures: Vec<Ligature>,
}

/// The width and kerning data stored for one character.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharMetrics {
    width: CharWidth,
    kerning: BTreeMap<char, KernValue>,
}

/// A ligature substitution entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ligature {
    /// The first character of the pair.
    pub first: char,
    /// The second character of the pair.
    pub second: char,
    /// The character substituting for the pair.
    pub ligature: char,
}

/// The slot assignment and packed arrays for one font record.
struct FontLayout {
    widths: Vec<u8>,
    kerning_index: Vec<u16>,
    high_chars: Vec<(u16, u16)>,
    kerning: Vec<u8>,
}

impl Font {
    /// Create a new font with the given names and no character data.
    pub fn new(full_name: impl Into<String>, postscript_name: impl Into<String>) -> Self {
        Font {
            full_name: full_name.into(),
            postscript_name: postscript_name.into(),
            ..Default::default()
        }
    }

    /// Set the advance width of a character, replacing any previous value.
    pub fn set_width(&mut self, ch: char, width: CharWidth) -> &mut Self {
        self.chars.entry(ch).or_default().width = width;
        self
    }

    /// Set the adjustment applied when `left` is followed by `right`.
    ///
    /// If `left` has no entry yet it is created with the missing-width
    /// marker, so that kern-only characters still get a storage slot.
    pub fn set_kerning(&mut self, left: char, right: char, value: KernValue) -> &mut Self {
        self.chars.entry(left).or_default().kerning.insert(right, value);
        self
    }

    /// Record a ligature formed by a pair of characters.
    pub fn add_ligature(&mut self, first: char, second: char, ligature: char) -> &mut Self {
        self.ligatures.push(Ligature {
            first,
            second,
            ligature,
        });
        self
    }

    /// The advance width of a character, if an entry exists.
    pub fn width(&self, ch: char) -> Option<CharWidth> {
        self.chars.get(&ch).map(|metrics| metrics.width)
    }

    /// The adjustment stored for a pair, if any.
    pub fn kerning(&self, left: char, right: char) -> Option<KernValue> {
        self.chars.get(&left)?.kerning.get(&right).copied()
    }

    /// Iterate all characters with an entry, in code point order.
    pub fn chars(&self) -> impl Iterator<Item = (char, &CharMetrics)> {
        self.chars.iter().map(|(ch, metrics)| (*ch, metrics))
    }

    /// The recorded ligatures.
    pub fn ligatures(&self) -> &[Ligature] {
        &self.ligatures
    }

    /// Assign storage slots and pack the variable-length arrays.
    ///
    /// Kerning sub-lists are emitted in slot order of their left-hand
    /// character, behind one pad byte so that offset zero stays
    /// reserved for "no kerning".
    fn compile_layout(&self) -> FontLayout {
        let mut widths = Vec::with_capacity(DIRECT_CHAR_COUNT + self.chars.len());
        let mut slots = Vec::with_capacity(widths.capacity());
        for codepoint in DIRECT_CHAR_MIN..=DIRECT_CHAR_MAX {
            let metrics = char::from_u32(codepoint as u32).and_then(|ch| self.chars.get(&ch));
            widths.push(metrics.map_or(CharWidth::MISSING, |m| m.width).to_byte());
            slots.push(metrics);
        }
        let mut high_chars = Vec::new();
        for (ch, metrics) in self.chars.range('\u{7F}'..) {
            // validation reports these
            let Ok(codepoint) = u16::try_from(*ch as u32) else {
                continue;
            };
            high_chars.push((codepoint, slots.len() as u16));
            widths.push(metrics.width.to_byte());
            slots.push(Some(metrics));
        }

        let mut kerning_index = vec![0u16; slots.len()];
        let mut kerning = Vec::new();
        let mut buf = [0u8; varint::MAX_ENCODED_LEN];
        for (slot, metrics) in slots.iter().enumerate() {
            let Some(metrics) = metrics else { continue };
            let pairs = metrics.storable_pairs();
            if pairs.is_empty() {
                continue;
            }
            if kerning.is_empty() {
                kerning.push(0);
            }
            kerning_index[slot] = kerning.len() as u16;
            let len = varint::encode(pairs.len() as u16, &mut buf);
            kerning.extend_from_slice(&buf[..len]);
            for (partner, value) in pairs {
                let len = varint::encode(partner, &mut buf);
                kerning.extend_from_slice(&buf[..len]);
                kerning.push(value.steps() as u8);
            }
        }

        FontLayout {
            widths,
            kerning_index,
            high_chars,
            kerning,
        }
    }

    /// The packed size of the kerning data, including its pad byte.
    fn compute_kerning_len(&self) -> usize {
        let mut len = 0;
        for metrics in self.chars.values() {
            let pairs = metrics.storable_pairs();
            if pairs.is_empty() {
                continue;
            }
            len += varint::encoded_len(pairs.len() as u16);
            for (partner, _) in pairs {
                len += varint::encoded_len(partner) + 1;
            }
        }
        if len > 0 {
            len += 1;
        }
        len
    }
}

impl CharMetrics {
    /// The character's advance width.
    pub fn width(&self) -> CharWidth {
        self.width
    }

    /// The adjustments applied when this character comes first in a pair.
    pub fn kerning(&self) -> impl Iterator<Item = (char, KernValue)> + '_ {
        self.kerning.iter().map(|(ch, value)| (*ch, *value))
    }

    fn storable_pairs(&self) -> Vec<(u16, KernValue)> {
        self.kerning
            .iter()
            .filter_map(|(partner, value)| {
                u16::try_from(*partner as u32)
                    .ok()
                    .map(|partner| (partner, *value))
            })
            .collect()
    }
}

impl Validate for Font {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("Font", |ctx| {
            ctx.in_field("full_name", |ctx| {
                if self.full_name.is_empty() {
                    ctx.report("full name must not be empty");
                }
                if self.full_name.len() > u16::MAX as usize {
                    ctx.report("full name longer than a length field can hold");
                }
            });
            ctx.in_field("postscript_name", |ctx| {
                if self.postscript_name.len() > u16::MAX as usize {
                    ctx.report("postscript name longer than a length field can hold");
                }
            });
            ctx.in_field("chars", |ctx| {
                for (ch, metrics) in &self.chars {
                    if (*ch as u32) < DIRECT_CHAR_MIN as u32 {
                        ctx.report(format!("control character {ch:?} cannot be stored"));
                    }
                    if u16::try_from(*ch as u32).is_err() {
                        ctx.report(format!("character {ch:?} is outside the 16-bit range"));
                    }
                    for (partner, value) in &metrics.kerning {
                        if u16::try_from(*partner as u32).is_err() {
                            ctx.report(format!(
                                "kerning partner {partner:?} is outside the 16-bit range"
                            ));
                        }
                        if value.is_zero() {
                            ctx.report(format!(
                                "kerning pair {ch:?}/{partner:?} has a zero adjustment"
                            ));
                        }
                    }
                }
            });
            ctx.in_field("ligatures", |ctx| {
                for lig in &self.ligatures {
                    for ch in [lig.first, lig.second, lig.ligature] {
                        if u16::try_from(ch as u32).is_err() {
                            ctx.report(format!("character {ch:?} is outside the 16-bit range"));
                        }
                    }
                }
            });
            ctx.in_field("kerning_data", |ctx| {
                if self.compute_kerning_len() > u16::MAX as usize {
                    ctx.report("kerning data too long for 16-bit offsets");
                }
            });
        })
    }
}

impl FontWrite for Font {
    fn write_into(&self, writer: &mut TableWriter) {
        let layout = self.compile_layout();
        log::trace!(
            "compiling '{}': {} slots, {} high chars, {} kerning bytes",
            self.full_name,
            layout.widths.len(),
            layout.high_chars.len(),
            layout.kerning.len()
        );
        (self.full_name.len() as u16).write_into(writer);
        (self.postscript_name.len() as u16).write_into(writer);
        self.ascender.write_into(writer);
        self.descender.write_into(writer);
        (layout.widths.len() as u16).write_into(writer);
        (layout.high_chars.len() as u16).write_into(writer);
        (self.ligatures.len() as u16).write_into(writer);
        (layout.kerning.len() as u16).write_into(writer);
        writer.write_slice(self.full_name.as_bytes());
        writer.write_slice(self.postscript_name.as_bytes());
        writer.write_slice(&layout.widths);
        layout.kerning_index.write_into(writer);
        for (codepoint, slot) in &layout.high_chars {
            codepoint.write_into(writer);
            slot.write_into(writer);
        }
        for lig in &self.ligatures {
            (lig.first as u16).write_into(writer);
            (lig.second as u16).write_into(writer);
            (lig.ligature as u16).write_into(writer);
        }
        writer.write_slice(&layout.kerning);
    }
}

#[cfg(test)]
mod tests {
    use afm_test_data::demo;
    use pretty_assertions::assert_eq;
    use read_afm::{tables::font::FontMetrics, FontData, FontRead};
    use rstest::rstest;

    use super::*;
    use crate::dump_table;

    fn demo_sans() -> Font {
        let mut font = Font::new("Demo Sans", "DemoSans-Regular");
        font.ascender = 718;
        font.descender = 207;
        for (slot, byte) in demo::DEMO_SANS_WIDTHS[..DIRECT_CHAR_COUNT].iter().enumerate() {
            let width = CharWidth::new(*byte);
            if width.is_missing() {
                continue;
            }
            let ch = char::from_u32(DIRECT_CHAR_MIN as u32 + slot as u32).unwrap();
            font.set_width(ch, width);
        }
        font.set_width('é', CharWidth::new(30));
        font.set_width('Œ', CharWidth::new(55));
        font.set_width('Ω', CharWidth::new(42));
        font.set_kerning('A', 'V', KernValue::new(-5));
        font.set_kerning('A', 'Œ', KernValue::new(-3));
        font.set_kerning('A', 'Ω', KernValue::new(2));
        font.set_kerning('T', 'e', KernValue::new(-3));
        font.set_kerning('T', 'o', KernValue::new(-3));
        font.set_kerning('T', 'y', KernValue::new(-2));
        font.set_kerning('V', 'A', KernValue::new(-4));
        font.set_kerning('V', 'e', KernValue::new(-2));
        font.add_ligature('f', 'i', 'ﬁ');
        font
    }

    #[test]
    fn demo_record_bytes() {
        let bytes = dump_table(&demo_sans()).unwrap();
        assert_eq!(bytes, demo::demo_sans_record());
    }

    #[test]
    fn round_trip_through_parse() {
        let bytes = dump_table(&demo_sans()).unwrap();
        let parsed = FontMetrics::read(FontData::new(&bytes)).unwrap();
        assert_eq!(parsed.full_name(), "Demo Sans");
        assert_eq!(parsed.postscript_name(), "DemoSans-Regular");
        assert_eq!(parsed.ascender(), 718);
        assert_eq!(parsed.descender(), 207);
        assert_eq!(parsed.slot_count(), DIRECT_CHAR_COUNT + 3);
        assert_eq!(parsed.width('A'), Some(CharWidth::new(40)));
        assert_eq!(parsed.width('é'), Some(CharWidth::new(30)));
        assert_eq!(parsed.width('~'), Some(CharWidth::MISSING));
        assert_eq!(parsed.kerning('A', 'V'), Some(KernValue::new(-5)));
        assert_eq!(parsed.kerning('V', 'e'), Some(KernValue::new(-2)));
        assert_eq!(parsed.ligature('f', 'i'), Some(0xFB01));
    }

    #[test]
    fn kerning_creates_missing_width_entries() {
        let mut font = Font::new("Test", "Test");
        font.set_width('o', CharWidth::new(30));
        font.set_kerning('ľ', 'o', KernValue::new(-2));
        assert_eq!(font.width('ľ'), Some(CharWidth::MISSING));

        let bytes = dump_table(&font).unwrap();
        let parsed = FontMetrics::read(FontData::new(&bytes)).unwrap();
        assert_eq!(parsed.width('ľ'), Some(CharWidth::MISSING));
        assert_eq!(parsed.kerning('ľ', 'o'), Some(KernValue::new(-2)));
    }

    #[test]
    fn empty_font_still_covers_the_direct_window() {
        let bytes = dump_table(&Font::new("Empty", "E")).unwrap();
        let parsed = FontMetrics::read(FontData::new(&bytes)).unwrap();
        assert_eq!(parsed.slot_count(), DIRECT_CHAR_COUNT);
        assert_eq!(parsed.width('A'), Some(CharWidth::MISSING));
        assert!(parsed.kerning('A', 'V').is_none());
    }

    fn control_char_font() -> Font {
        let mut font = Font::new("Bad", "Bad");
        font.set_width('\u{10}', CharWidth::new(1));
        font
    }

    fn zero_kern_font() -> Font {
        let mut font = Font::new("Bad", "Bad");
        font.set_kerning('A', 'V', KernValue::new(0));
        font
    }

    fn wide_char_font() -> Font {
        let mut font = Font::new("Bad", "Bad");
        font.set_width('\u{1F600}', CharWidth::new(10));
        font
    }

    fn wide_partner_font() -> Font {
        let mut font = Font::new("Bad", "Bad");
        font.set_kerning('A', '\u{1F600}', KernValue::new(-1));
        font
    }

    fn wide_ligature_font() -> Font {
        let mut font = Font::new("Bad", "Bad");
        font.add_ligature('f', 'i', '\u{1F600}');
        font
    }

    #[rstest]
    #[case::empty_full_name(Font::new("", "Empty"), "full name must not be empty")]
    #[case::control_character(control_char_font(), "cannot be stored")]
    #[case::zero_adjustment(zero_kern_font(), "zero adjustment")]
    #[case::char_past_sixteen_bits(wide_char_font(), "outside the 16-bit range")]
    #[case::partner_past_sixteen_bits(wide_partner_font(), "outside the 16-bit range")]
    #[case::ligature_past_sixteen_bits(wide_ligature_font(), "outside the 16-bit range")]
    fn validation_failures(#[case] font: Font, #[case] message: &str) {
        let report = font.validate().unwrap_err();
        assert!(report.to_string().contains(message), "{report}");
    }

    #[test]
    fn one_pass_collects_every_failure() {
        let mut font = Font::new("", "Bad");
        font.set_width('\u{10}', CharWidth::new(1));
        font.set_kerning('A', 'V', KernValue::new(0));
        let report = font.validate().unwrap_err();
        let message = report.to_string();
        assert!(message.contains("3 validation errors"), "{message}");
        assert!(message.contains("full name must not be empty"), "{message}");
        assert!(message.contains("cannot be stored"), "{message}");
        assert!(message.contains("zero adjustment"), "{message}");
    }

    #[test]
    fn oversized_kerning_data_is_rejected() {
        let mut font = Font::new("Big", "Big");
        // three-byte partner encodings, four bytes per pair
        for left in (0x4E00..0x4E00 + 250).flat_map(char::from_u32) {
            for partner in (0x4F00..0x4F00 + 80).flat_map(char::from_u32) {
                font.set_kerning(left, partner, KernValue::new(-1));
            }
        }
        let report = font.validate().unwrap_err();
        assert!(report.to_string().contains("kerning data too long"), "{report}");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let font = demo_sans();
        let dumped = serde_json::to_string(&font).unwrap();
        let parsed: Font = serde_json::from_str(&dumped).unwrap();
        assert_eq!(font, parsed);
    }
}
