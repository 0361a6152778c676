//! The owned versions of the packed tables

pub mod catalog;
pub mod font;
