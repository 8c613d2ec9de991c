//! Core data model for chipr: genomic interval value types, BED-backed
//! interval collections, and shared reader utilities.
//!
//! Everything downstream (set algebra, depth profiling, caller adapters)
//! speaks the types defined here. Coordinates are 0-based, half-open
//! `[start, end)` throughout.

pub mod errors;
pub mod models;
pub mod utils;

pub use errors::CoreError;
pub use models::{Region, RegionSet};
