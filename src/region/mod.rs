//! Region classification: maps a feature's country code to a single-character
//! region label.

mod builtin;
mod table;

pub use builtin::{builtin_sets, DEFAULT_LABEL};
pub use table::{RegionSet, RegionTable};
