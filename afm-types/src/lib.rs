//! Common scalar data types used in packed font-metrics tables.

#![cfg_attr(not(feature = "bytemuck"), forbid(unsafe_code))]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(all(not(feature = "std"), not(test)))]
#[macro_use]
extern crate core as std;

mod raw;
mod records;
pub mod varint;
mod width;

#[cfg(all(test, feature = "serde"))]
mod serde_test;

pub use raw::{BigEndian, FixedSize, Scalar};
pub use records::{HighCharRecord, LigatureRecord};
pub use width::{CharWidth, KernValue, UNITS_PER_STEP};

/// The version of the packed catalog format understood by these crates.
pub const CATALOG_VERSION: u32 = 1;

/// The lowest code point covered by the direct-indexed width window.
pub const DIRECT_CHAR_MIN: u16 = 0x20;

/// The highest code point covered by the direct-indexed width window.
pub const DIRECT_CHAR_MAX: u16 = 0x7E;

/// The number of slots in the direct-indexed width window.
///
/// The first slots of a font's width and kerning-index arrays always
/// map code points 32..=126, in order; any further slots are reached
/// through the high-character index.
pub const DIRECT_CHAR_COUNT: usize = (DIRECT_CHAR_MAX - DIRECT_CHAR_MIN + 1) as usize;
