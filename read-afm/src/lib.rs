//! Reading packed AFM metrics catalogs
//!
//! This crate provides memory safe zero-allocation parsing of packed
//! font-metrics catalogs: compact binary tables of per-character
//! advance widths, kerning pairs and ligatures distilled from Adobe
//! Font Metrics files. It is intended for embedding a fixed set of
//! font metrics into a program that needs to measure text without
//! shipping the fonts themselves.
//!
//! A catalog starts with a version and an offset for each font record,
//! with records sorted by full font name so lookup can binary search.
//! The records themselves are described in the [`tables`] module, and
//! scaled measurement on top of them lives in [`metrics`].
//!
//! # Example
//!
//! ```no_run
//! # let path_to_my_catalog = std::path::Path::new("");
//! use read_afm::{Catalog, Size, TextMetrics};
//! let bytes = std::fs::read(path_to_my_catalog).unwrap();
//! let catalog = Catalog::new(&bytes).expect("failed to read catalog");
//! let font = catalog.find("Demo Sans").expect("missing font");
//! let metrics = TextMetrics::new(font, Size::new(12.0));
//!
//! println!("width of 'Hello': {}", metrics.advance_width("Hello"));
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(all(not(feature = "std"), not(test)))]
#[macro_use]
extern crate core as std;

mod font_data;
pub mod metrics;
mod read;
pub mod tables;

pub use font_data::FontData;
pub use metrics::{MissingWidth, Size, TextMetrics};
pub use read::{FontRead, ReadError};

/// Public re-export of the afm-types crate.
pub extern crate afm_types as types;

use std::cmp::Ordering;

use types::{BigEndian, CATALOG_VERSION};

use tables::font::{FontMetrics, HEADER_LEN};

/// Reference to an in-memory metrics catalog.
///
/// Reading a catalog validates every record up front, so the accessors
/// on [`FontMetrics`] can stay cheap. Fonts are stored sorted by full
/// name, compared byte-wise, and [`find`](Self::find) relies on that
/// order.
#[derive(Clone, Debug)]
pub struct Catalog<'a> {
    data: FontData<'a>,
    offsets: &'a [BigEndian<u32>],
}

impl<'a> Catalog<'a> {
    /// Creates a new reference to an in-memory catalog backed by the
    /// given data.
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        Self::read(FontData::new(data))
    }

    /// Returns the number of fonts in the catalog.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Returns true if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Returns the font with the given full name.
    ///
    /// Names are compared byte-wise, so the match is case sensitive.
    pub fn find(&self, full_name: &str) -> Result<FontMetrics<'a>, ReadError> {
        let mut lo = 0;
        let mut hi = self.offsets.len();
        while lo < hi {
            let i = (lo + hi) / 2;
            match full_name.cmp(self.full_name_at(i)?) {
                Ordering::Less => hi = i,
                Ordering::Greater => lo = i + 1,
                Ordering::Equal => return self.get(i),
            }
        }
        Err(ReadError::FontNotFound)
    }

    /// Returns the font at the given index.
    pub fn get(&self, index: usize) -> Result<FontMetrics<'a>, ReadError> {
        FontMetrics::read(self.record_data(index)?)
    }

    /// Returns an iterator over the fonts in the catalog, in name
    /// order.
    pub fn fonts(&self) -> impl Iterator<Item = FontMetrics<'a>> + '_ {
        (0..self.offsets.len()).filter_map(|index| self.get(index).ok())
    }

    fn record_data(&self, index: usize) -> Result<FontData<'a>, ReadError> {
        let start = self.offsets.get(index).ok_or(ReadError::OutOfBounds)?.get() as usize;
        let end = match self.offsets.get(index + 1) {
            Some(next) => next.get() as usize,
            None => self.data.len(),
        };
        self.data.slice(start..end).ok_or(ReadError::OutOfBounds)
    }

    /// Reads just far enough into a record for a name comparison.
    fn full_name_at(&self, index: usize) -> Result<&'a str, ReadError> {
        let data = self.record_data(index)?;
        let len = data.read_at::<u16>(0)? as usize;
        let bytes = data.read_array::<u8>(HEADER_LEN..HEADER_LEN + len)?;
        std::str::from_utf8(bytes)
            .map_err(|_| ReadError::MalformedData("font name is not valid UTF-8"))
    }
}

impl<'a> FontRead<'a> for Catalog<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version = cursor.read::<u32>()?;
        if version != CATALOG_VERSION {
            return Err(ReadError::InvalidVersion(version));
        }
        let font_count = cursor.read::<u16>()? as usize;
        let offsets = cursor.read_array::<BigEndian<u32>>(font_count)?;
        let catalog = Catalog { data, offsets };
        let mut prev_name: Option<&str> = None;
        for index in 0..font_count {
            let font = catalog.get(index)?;
            if prev_name.is_some_and(|prev| prev >= font.full_name()) {
                return Err(ReadError::MalformedData("font names out of order"));
            }
            prev_name = Some(font.full_name());
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use afm_test_data::bebuffer::BeBuffer;
    use afm_test_data::demo;

    use super::*;

    fn catalog_bytes() -> Vec<u8> {
        demo::catalog().to_vec()
    }

    /// A sorted-by-name catalog of minimal records, each made
    /// recognizable by its space width.
    fn build_catalog(names: &[&str]) -> Vec<u8> {
        let records: Vec<BeBuffer> = names
            .iter()
            .enumerate()
            .map(|(index, name)| minimal_record(name, index as u8 + 1))
            .collect();
        let mut buf = BeBuffer::new()
            .push(CATALOG_VERSION)
            .push(names.len() as u16);
        let mut offset = (6 + names.len() * 4) as u32;
        for record in &records {
            buf = buf.push(offset);
            offset += record.len() as u32;
        }
        for record in &records {
            buf = buf.extend(record.iter().copied());
        }
        buf.to_vec()
    }

    fn minimal_record(full_name: &str, space_width: u8) -> BeBuffer {
        let mut widths = [20u8; 95];
        widths[0] = space_width;
        BeBuffer::new()
            .push(full_name.len() as u16)
            .push(0u16) // no postscript name
            .push(700u16)
            .push(200u16)
            .push(95u16)
            .push(0u16)
            .push(0u16)
            .push(0u16)
            .extend(full_name.bytes())
            .extend(widths)
            .extend([0u16; 95])
    }

    #[test]
    fn lookup_by_full_name() {
        let bytes = catalog_bytes();
        let catalog = Catalog::new(&bytes).unwrap();
        assert_eq!(catalog.len(), 2);
        let sans = catalog.find("Demo Sans").unwrap();
        assert_eq!(sans.postscript_name(), "DemoSans-Regular");
        assert_eq!(sans.width(' ').unwrap().steps(), Some(10));
        let serif = catalog.find("Demo Serif").unwrap();
        assert_eq!(serif.postscript_name(), "DemoSerif-Regular");
        assert_eq!(serif.width(' ').unwrap().steps(), Some(15));
    }

    #[test]
    fn lookup_misses() {
        let bytes = catalog_bytes();
        let catalog = Catalog::new(&bytes).unwrap();
        assert_eq!(catalog.find("Demo").unwrap_err(), ReadError::FontNotFound);
        assert_eq!(
            catalog.find("Demo Sans ").unwrap_err(),
            ReadError::FontNotFound
        );
        // comparison is byte-wise, so case matters
        assert_eq!(
            catalog.find("demo sans").unwrap_err(),
            ReadError::FontNotFound
        );
        assert_eq!(catalog.find("").unwrap_err(), ReadError::FontNotFound);
    }

    #[test]
    fn binary_search_covers_every_position() {
        let names = [
            "Avenir",
            "Bookman",
            "Courier",
            "Courier Bold",
            "Helvetica",
            "Palatino",
            "Times",
            "Zapf Dingbats",
        ];
        let bytes = build_catalog(&names);
        let catalog = Catalog::new(&bytes).unwrap();
        for (index, name) in names.iter().enumerate() {
            let font = catalog.find(name).unwrap();
            assert_eq!(font.full_name(), *name);
            assert_eq!(font.width(' ').unwrap().steps(), Some(index as u8 + 1));
        }
        for miss in ["", "Aaa", "Cour", "Courier Bold Oblique", "courier", "Zzz"] {
            assert_eq!(catalog.find(miss).unwrap_err(), ReadError::FontNotFound);
        }
    }

    #[test]
    fn iteration_in_name_order() {
        let bytes = catalog_bytes();
        let catalog = Catalog::new(&bytes).unwrap();
        let names: Vec<_> = catalog.fonts().map(|font| font.full_name()).collect();
        assert_eq!(names, vec!["Demo Sans", "Demo Serif"]);
        assert_eq!(catalog.get(0).unwrap().full_name(), "Demo Sans");
        assert!(catalog.get(2).is_err());
    }

    #[test]
    fn empty_catalog() {
        let bytes = build_catalog(&[]);
        let catalog = Catalog::new(&bytes).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(
            catalog.find("Demo Sans").unwrap_err(),
            ReadError::FontNotFound
        );
    }

    #[test]
    fn rejects_unknown_version() {
        let mut bytes = catalog_bytes();
        bytes[3] = 2;
        assert_eq!(
            Catalog::new(&bytes).unwrap_err(),
            ReadError::InvalidVersion(2)
        );
    }

    #[test]
    fn rejects_names_out_of_order() {
        let sans = demo::demo_sans_record();
        let serif = demo::demo_serif_record();
        let bytes = BeBuffer::new()
            .push(CATALOG_VERSION)
            .push(2u16)
            .push(14u32)
            .push((14 + serif.len()) as u32)
            .extend(serif.iter().copied())
            .extend(sans.iter().copied());
        assert_eq!(
            Catalog::new(&bytes).unwrap_err(),
            ReadError::MalformedData("font names out of order")
        );
    }

    #[test]
    fn rejects_duplicate_names() {
        let sans = demo::demo_sans_record();
        let bytes = BeBuffer::new()
            .push(CATALOG_VERSION)
            .push(2u16)
            .push(14u32)
            .push((14 + sans.len()) as u32)
            .extend(sans.iter().copied())
            .extend(sans.iter().copied());
        assert_eq!(
            Catalog::new(&bytes).unwrap_err(),
            ReadError::MalformedData("font names out of order")
        );
    }

    #[test]
    fn rejects_truncated_catalog() {
        let bytes = catalog_bytes();
        assert_eq!(Catalog::new(&bytes[..4]).unwrap_err(), ReadError::OutOfBounds);
        assert_eq!(
            Catalog::new(&bytes[..10]).unwrap_err(),
            ReadError::OutOfBounds
        );
        assert_eq!(
            Catalog::new(&bytes[..bytes.len() - 1]).unwrap_err(),
            ReadError::OutOfBounds
        );
    }

    #[test]
    fn rejects_record_offset_out_of_bounds() {
        let mut bytes = catalog_bytes();
        // second record offset, high byte
        bytes[10] = 0xFF;
        assert_eq!(Catalog::new(&bytes).unwrap_err(), ReadError::OutOfBounds);
    }

    #[test]
    fn catalog_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Catalog<'static>>();
    }
}
