//! Input translation module
//!
//! Converts raw scroll deltas, clicks and numeric entry edits into engine
//! commands.

pub mod numeric_entry;
pub mod scroll;

pub use hit_test::{Geometry, Point, Region};
pub use numeric_entry::NumericEntry;
pub use scroll::ScrollGranularity;
