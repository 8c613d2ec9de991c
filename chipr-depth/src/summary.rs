use crate::errors::DepthError;
use crate::profile::{compute_depth, DepthProfile};
use crate::source::ReadSource;

///
/// Summary statistics of one depth profile.
///
#[derive(Debug, Clone, PartialEq)]
pub struct PeakSummary {
    /// Number of positions attaining the peak value.
    pub npeaks: usize,
    /// Genomic coordinate of the peak center (floor-median of the
    /// positions attaining the peak value).
    pub peak_center: u32,
    /// Interval length in bases.
    pub length: u32,
    /// Mean coverage over the interval.
    pub avg_value: f64,
    /// Maximum coverage over the interval.
    pub peak_value: u32,
    /// Number of reads contributing to the profile.
    pub nprobes: u64,
}

///
/// Reduce a depth profile to its peak summary.
///
/// The peak center is the position at the floor-midpoint index of the
/// ascending list of positions attaining the maximum. This is not the
/// numeric average of those positions: it is always one of them, so the
/// center stays a valid in-range coordinate even for multi-modal
/// profiles. Zero-length profiles cannot be summarized.
///
pub fn summarize(profile: &DepthProfile) -> Result<PeakSummary, DepthError> {
    if profile.is_empty() {
        return Err(DepthError::EmptyInterval);
    }

    let peak_value = *profile.counts.iter().max().unwrap();
    let avg_value =
        profile.counts.iter().map(|&c| c as f64).sum::<f64>() / profile.len() as f64;

    let positions: Vec<u32> = profile
        .counts
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c == peak_value)
        .map(|(i, _)| i as u32)
        .collect();
    let npeaks = positions.len();
    let peak_center = profile.start + positions[npeaks / 2];

    Ok(PeakSummary {
        npeaks,
        peak_center,
        length: profile.len() as u32,
        avg_value,
        peak_value,
        nprobes: profile.read_count,
    })
}

///
/// Profile an interval and summarize it in one step.
///
pub fn count_peaks<S: ReadSource>(
    chr: &str,
    start: u32,
    end: u32,
    sources: &mut [S],
    offsets: Option<&[u32]>,
) -> Result<PeakSummary, DepthError> {
    let profile = compute_depth(chr, start, end, sources, offsets)?;
    summarize(&profile)
}
