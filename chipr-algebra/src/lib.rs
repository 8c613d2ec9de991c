//! Interval set algebra over bed collections.
//!
//! Three operations implement the replicate-consistency and
//! control-subtraction logic of interval calling:
//!
//! - [`merge`] — union of two or more collections, with overlapping or
//!   abutting spans coalesced.
//! - [`intersect`] — base-level portions of the first collection covered
//!   by every other collection.
//! - [`subtract`] — base-level removal of everything in one collection
//!   that is covered by another.
//!
//! All operations sort internally, so results are deterministic and stable
//! under permutation of the regions inside any one input collection.
//! Output interval ids are renumbered 1-based in output order.
//!
//! [`normalize`] (self-merge) is exposed separately: it is what the other
//! operations use to put a single collection into canonical
//! non-overlapping form, and is useful on its own for consolidating one
//! caller's raw output before re-scoring.

pub mod error;
pub mod ops;

pub use error::AlgebraError;
pub use ops::{intersect, merge, normalize, subtract};
