//! IO surface for chipr region sets.
//!
//! Reading lives in `chipr-core` (the `RegionSet` constructors); this crate
//! owns the write side, where the bed format imposes constraints the
//! in-memory model does not: scores are capped at 1000 and written as
//! integers, and unnamed intervals get their row number as a name.

pub mod bed;

pub use bed::BedWrite;

/// Maximum score the bed format permits in column 5.
pub const BED_MAX_SCORE: f64 = 1000.0;
