//! The tables of a packed metrics catalog

pub mod font;
pub mod kern;
