//! Traits for converting parsed metrics back to their editable equivalents

use afm_types::{CharWidth, DIRECT_CHAR_COUNT, DIRECT_CHAR_MAX, DIRECT_CHAR_MIN};
use read_afm::{tables::font::FontMetrics, FontData};

use crate::tables::catalog::Catalog;
use crate::tables::font::Font;

/// A trait for types that can fully resolve themselves.
///
/// This means that any record offsets held in this type are resolved
/// relative to the start of the table itself (and not some parent
/// table).
pub trait FromTableRef<T>: FromObjRef<T> {
    fn from_table_ref(from: &T) -> Self {
        let data = FontData::new(&[]);
        Self::from_obj_ref(from, data)
    }
}

/// A trait for types that can resolve themselves when provided data to
/// resolve offsets.
///
/// Values that cannot be represented in editable form, such as code
/// points in the surrogate range, are dropped during conversion. The
/// result can still be checked by calling [`validate`][] on the
/// generated object.
///
/// [`validate`]: crate::validate::Validate::validate
pub trait FromObjRef<T: ?Sized>: Sized {
    /// Convert `from` to an instance of `Self`, using the provided data to resolve offsets.
    fn from_obj_ref(from: &T, data: FontData) -> Self;
}

/// A conversion from a parsed metrics type to an owned version, resolving
/// offsets.
///
/// You should avoid implementing this trait manually. Like [`std::convert::Into`],
/// it is provided as a blanket impl when you implement [`FromObjRef<T>`].
pub trait ToOwnedObj<T> {
    /// Convert this type into `T`, using the provided data to resolve any offsets.
    fn to_owned_obj(&self, data: FontData) -> T;
}

/// A conversion from a fully resolveable parsed table to its owned equivalent.
///
/// As with [`ToOwnedObj`], you should not need to implement this manually.
pub trait ToOwnedTable<T>: ToOwnedObj<T> {
    fn to_owned_table(&self) -> T;
}

impl<U, T> ToOwnedObj<U> for T
where
    U: FromObjRef<T>,
{
    fn to_owned_obj(&self, data: FontData) -> U {
        U::from_obj_ref(self, data)
    }
}

impl<U, T> ToOwnedTable<U> for T
where
    U: FromTableRef<T>,
{
    fn to_owned_table(&self) -> U {
        U::from_table_ref(self)
    }
}

impl<'a> FromObjRef<FontMetrics<'a>> for Font {
    fn from_obj_ref(from: &FontMetrics<'a>, _: FontData) -> Self {
        let mut font = Font::new(from.full_name(), from.postscript_name());
        font.ascender = from.ascender();
        font.descender = from.descender();

        for (slot, byte) in from
            .width_bytes()
            .iter()
            .enumerate()
            .take(DIRECT_CHAR_COUNT)
        {
            let width = CharWidth::new(*byte);
            if width.is_missing() {
                continue;
            }
            if let Some(ch) = char::from_u32(DIRECT_CHAR_MIN as u32 + slot as u32) {
                font.set_width(ch, width);
            }
        }
        for record in from.high_chars() {
            let Some(ch) = char::from_u32(record.codepoint() as u32) else {
                continue;
            };
            if let Some(width) = from.width(record.codepoint()).filter(|w| !w.is_missing()) {
                font.set_width(ch, width);
            }
        }

        let codepoints = (DIRECT_CHAR_MIN as u32..=DIRECT_CHAR_MAX as u32)
            .chain(from.high_chars().iter().map(|rec| rec.codepoint() as u32));
        for codepoint in codepoints {
            let Some(left) = char::from_u32(codepoint) else {
                continue;
            };
            let Some(pairs) = from.kerning_pairs(codepoint) else {
                continue;
            };
            for (partner, value) in pairs {
                if let Some(right) = char::from_u32(partner as u32) {
                    font.set_kerning(left, right, value);
                }
            }
        }

        for record in from.ligatures() {
            let (Some(first), Some(second), Some(ligature)) = (
                char::from_u32(record.first() as u32),
                char::from_u32(record.second() as u32),
                char::from_u32(record.ligature() as u32),
            ) else {
                continue;
            };
            font.add_ligature(first, second, ligature);
        }
        font
    }
}

impl<'a> FromTableRef<FontMetrics<'a>> for Font {}

impl<'a> FromObjRef<read_afm::Catalog<'a>> for Catalog {
    fn from_obj_ref(from: &read_afm::Catalog<'a>, data: FontData) -> Self {
        Catalog::new(
            from.fonts()
                .map(|font| Font::from_obj_ref(&font, data))
                .collect(),
        )
    }
}

impl<'a> FromTableRef<read_afm::Catalog<'a>> for Catalog {}
