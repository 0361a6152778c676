//! test data shared between the packed font-metrics crates.

pub mod bebuffer;
pub mod demo;
