//! Adapters for external peak-caller output.
//!
//! Peak callers are independent OS processes; this crate consumes what
//! they leave behind — the peak table and the run log — and turns it into
//! the unified [`PeakRecord`] schema the rest of the pipeline works with.
//! Two callers are supported, selected explicitly via [`CallerKind`]
//! (never inferred from file names):
//!
//! - MACS: `_peaks.xls` tables and `#2 predicted fragment length` /
//!   `#2 Use N as shiftsize` log markers.
//! - Zinba: `.peaks` tables (refined coordinates) and the `$offset`
//!   marker in the R output.
//!
//! [`filter::filter_peaks`] applies the significance thresholds to parsed
//! records and re-scores survivors against the aligned reads.

pub mod errors;
pub mod filter;
pub mod macs;
pub mod records;
pub mod table;
pub mod zinba;

pub use errors::CallerError;
pub use filter::{filter_peaks, FilterCounters, FilterThresholds, ScoredPeak};
pub use records::{CallerKind, PeakRecord};

use std::io::BufRead;

///
/// Parse a caller's peak table into the unified record schema.
///
pub fn read_peaks(kind: CallerKind, reader: impl BufRead) -> Result<Vec<PeakRecord>, CallerError> {
    match kind {
        CallerKind::Macs => macs::read_peaks(reader),
        CallerKind::Zinba => zinba::read_peaks(reader),
    }
}

///
/// Extract the fragment-shift estimate from a caller's run log.
///
/// Returns `Ok(None)` when the log carries no shift marker; downstream
/// must treat a missing shift as fatal rather than substituting zero.
///
pub fn peak_shift(kind: CallerKind, reader: impl BufRead) -> Result<Option<u32>, CallerError> {
    match kind {
        CallerKind::Macs => macs::peak_shift(reader),
        CallerKind::Zinba => zinba::peak_shift(reader),
    }
}
