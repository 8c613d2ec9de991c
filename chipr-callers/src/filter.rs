use indicatif::{ProgressBar, ProgressStyle};

use chipr_depth::{count_peaks, PeakSummary, ReadSource};

use crate::errors::CallerError;
use crate::records::PeakRecord;

///
/// Significance thresholds for one filtering pass.
///
/// Built once by the driver from explicit options and passed by value;
/// there is no ambient configuration. `min_pvalue` is on the caller's
/// p-value scale (for MACS that is `-10*log10`, so bigger means more
/// significant). `control_max_height` must be set whenever control
/// sources are supplied.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterThresholds {
    pub max_qvalue: f64,
    pub min_pvalue: f64,
    pub min_fold: f64,
    pub control_max_height: Option<u32>,
}

///
/// Per-reason rejection counts for one filtering pass. Counters always
/// sum to the number of input records.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCounters {
    pub removed_qvalue: u64,
    pub removed_pvalue: u64,
    pub removed_fold: u64,
    pub removed_control: u64,
    pub output: u64,
}

impl FilterCounters {
    pub fn total(&self) -> u64 {
        self.removed_qvalue
            + self.removed_pvalue
            + self.removed_fold
            + self.removed_control
            + self.output
    }

    ///
    /// Render the diagnostic counter table (`category\tcounts`).
    ///
    pub fn as_table(&self) -> String {
        format!(
            "category\tcounts\n\
             removed_qvalue\t{}\n\
             removed_pvalue\t{}\n\
             removed_fold\t{}\n\
             removed_control\t{}\n\
             output\t{}\n",
            self.removed_qvalue,
            self.removed_pvalue,
            self.removed_fold,
            self.removed_control,
            self.output
        )
    }
}

///
/// A caller record that survived filtering, re-scored against the
/// primary read sources.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPeak {
    pub record: PeakRecord,
    pub summary: PeakSummary,
}

///
/// Filter caller records by significance and re-score the survivors.
///
/// Thresholds apply in order: q-value, p-value, fold change, then — when
/// control sources are given — a depth re-count over the record's span
/// against the control reads, rejecting records whose control peak
/// height exceeds `control_max_height` (callers flag regions that are
/// simply read-dense in the input). Survivors are profiled against the
/// primary sources and emitted with their summary statistics.
///
/// `offsets` applies to primary and control queries alike (both stem
/// from the same fragment-size estimate).
///
/// A record violating `start < end` aborts the pass: that is corrupt
/// caller output, not a filterable condition. An exhausted input with
/// zero survivors is *not* an error; callers get an empty vector plus
/// the counter table and must still produce their (empty) output
/// artifact.
///
pub fn filter_peaks<S: ReadSource>(
    records: impl IntoIterator<Item = PeakRecord>,
    thresholds: &FilterThresholds,
    sources: &mut [S],
    offsets: Option<&[u32]>,
    mut control_sources: Option<&mut [S]>,
) -> Result<(Vec<ScoredPeak>, FilterCounters), CallerError> {
    if control_sources.is_some() && thresholds.control_max_height.is_none() {
        return Err(CallerError::MissingControlThreshold);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg} ({per_sec})")
            .unwrap()
            .tick_strings(&["-", "\\", "|", "/"]),
    );
    spinner.set_message("Filtering peaks...");

    let mut counters = FilterCounters::default();
    let mut scored = Vec::new();

    for record in records {
        spinner.inc(1);

        if record.start >= record.end {
            return Err(CallerError::DataIntegrity {
                chr: record.chr.clone(),
                start: record.start,
                end: record.end,
            });
        }

        if record.fdr > thresholds.max_qvalue {
            counters.removed_qvalue += 1;
            continue;
        }
        if record.pvalue < thresholds.min_pvalue {
            counters.removed_pvalue += 1;
            continue;
        }
        if record.fold < thresholds.min_fold {
            counters.removed_fold += 1;
            continue;
        }

        if let Some(control) = control_sources.as_deref_mut() {
            let control_summary =
                count_peaks(&record.chr, record.start, record.end, control, offsets)?;
            // checked above
            let max_height = thresholds.control_max_height.unwrap_or(u32::MAX);
            if control_summary.peak_value > max_height {
                counters.removed_control += 1;
                continue;
            }
        }

        let summary = count_peaks(&record.chr, record.start, record.end, sources, offsets)?;

        counters.output += 1;
        scored.push(ScoredPeak { record, summary });
    }

    spinner.finish_and_clear();

    Ok((scored, counters))
}
