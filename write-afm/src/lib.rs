//! Compiling packed font-metrics catalogs.
//!
//! This crate provides owned, editable versions of the tables in
//! [`read-afm`][read_afm], along with the machinery to validate them
//! and compile them back into packed bytes.
//!
//! # Example
//!
//! ```
//! use write_afm::tables::font::Font;
//! use write_afm::types::{CharWidth, KernValue};
//! use write_afm::CatalogBuilder;
//!
//! let mut font = Font::new("Demo Sans", "DemoSans-Regular");
//! font.ascender = 718;
//! font.descender = 207;
//! font.set_width('A', CharWidth::from_units(667.0));
//! font.set_width('V', CharWidth::from_units(667.0));
//! font.set_kerning('A', 'V', KernValue::from_units(-200.0));
//!
//! let mut builder = CatalogBuilder::new();
//! builder.add_font(font)?;
//! let bytes = builder.build()?;
//! # let _ = bytes;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod catalog_builder;
pub mod from_obj;
pub mod tables;
pub mod validate;
pub mod write;

pub use catalog_builder::{BuilderError, CatalogBuilder};
pub use validate::Validate;
pub use write::{dump_table, FontWrite};

pub extern crate read_afm as read;

pub use read_afm::types;
