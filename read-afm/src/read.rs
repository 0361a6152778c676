//! Traits for interpreting packed metrics data

use crate::font_data::FontData;

/// A type that can be read from raw catalog data.
///
/// This trait is implemented for all tables that are self-describing: that
/// is, tables that do not require any external state in order to interpret
/// their underlying bytes.
pub trait FontRead<'a>: Sized {
    /// Read an instance of `Self` from the provided data, performing validation.
    ///
    /// In the case of a table, this method is responsible for ensuring the
    /// input data is consistent: this means ensuring that any array lengths
    /// declared in the header are not out-of-bounds, and that any invariants
    /// assumed by the lookup methods (such as sort order) actually hold.
    fn read(data: FontData<'a>) -> Result<Self, ReadError>;
}

/// An error that occurs when reading packed metrics data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// No font in the catalog has the requested full name.
    FontNotFound,
    OutOfBounds,
    InvalidVersion(u32),
    InvalidArrayLen,
    MalformedData(&'static str),
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::FontNotFound => write!(f, "No font with the requested name"),
            ReadError::OutOfBounds => write!(f, "An offset was out of bounds"),
            ReadError::InvalidVersion(ver) => write!(f, "Invalid catalog version 0x{ver:08X}"),
            ReadError::InvalidArrayLen => {
                write!(f, "Specified array length not a multiple of item size")
            }
            ReadError::MalformedData(msg) => write!(f, "Malformed data: '{msg}'"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ReadError {}
