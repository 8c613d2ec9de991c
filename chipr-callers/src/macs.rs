use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::CallerError;
use crate::records::PeakRecord;

static RE_FRAGMENT_LENGTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#2 predicted fragment length is (\d+) bps").unwrap());

static RE_SHIFTSIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#2 Use (\d+) as shiftsize").unwrap());

///
/// Get the peak shift from a MACS run log.
///
/// Returns `Ok(None)` if no shift marker is found. When MACS fell back to
/// an automatic shiftsize the value is still returned, with a notice,
/// since the model-building step failed and the estimate is weaker.
///
pub fn peak_shift(reader: impl BufRead) -> Result<Option<u32>, CallerError> {
    for line in reader.lines() {
        let line = line?;

        if let Some(captures) = RE_FRAGMENT_LENGTH.captures(&line) {
            let shift = parse_u32(&captures[1], &line)?;
            return Ok(Some(shift));
        }

        if let Some(captures) = RE_SHIFTSIZE.captures(&line) {
            let shift = parse_u32(&captures[1], &line)?;
            eprintln!("shift size was set automatically - see MACS logfiles");
            return Ok(Some(shift));
        }
    }

    Ok(None)
}

///
/// Parse a MACS `_peaks.xls` table into unified peak records.
///
/// Expected columns: `chr start end length summit tags -10*log10(pvalue)
/// fold_enrichment [FDR(%)]`. Comment lines (`#`), blank lines and the
/// column header are skipped. MACS reports 1-based inclusive coordinates;
/// starts are shifted to the 0-based half-open convention on ingest. The
/// FDR column is a percentage and is rescaled to a fraction; runs without
/// a control file have no FDR column, which ingests as 0.
///
pub fn read_peaks(reader: impl BufRead) -> Result<Vec<PeakRecord>, CallerError> {
    let mut peaks = Vec::new();

    for line in reader.lines() {
        let line = line?;

        if line.is_empty() || line.starts_with('#') || line.starts_with("chr\t") {
            continue;
        }

        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < 8 {
            return Err(CallerError::ParseError(format!(
                "expected at least 8 columns in MACS peak line, got {}: {:?}",
                parts.len(),
                line
            )));
        }

        let start = parse_u32(parts[1], &line)?.saturating_sub(1);
        let end = parse_u32(parts[2], &line)?;

        if start >= end {
            return Err(CallerError::DataIntegrity {
                chr: parts[0].to_string(),
                start,
                end,
            });
        }

        peaks.push(PeakRecord {
            chr: parts[0].to_string(),
            start,
            end,
            summit_offset: parse_u32(parts[4], &line)?,
            tags: parse_u32(parts[5], &line)? as u64,
            pvalue: parse_f64(parts[6], &line)?,
            fold: parse_f64(parts[7], &line)?,
            fdr: match parts.get(8) {
                Some(fdr) => parse_f64(fdr, &line)? / 100.0,
                None => 0.0,
            },
        });
    }

    Ok(peaks)
}

/// Regex patterns, labels and subgroup headers for the MACS run-log
/// metric table, in output column order.
const LOG_METRICS: &[(&str, &str, &[&str])] = &[
    (r"tags after filtering in treatment: (\d+)", "tag_treatment_filtered", &[]),
    (r"total tags in treatment: (\d+)", "tag_treatment_total", &[]),
    (r"tags after filtering in control: (\d+)", "tag_control_filtered", &[]),
    (r"total tags in control: (\d+)", "tag_control_total", &[]),
    (r"#2 number of paired peaks: (\d+)", "paired_peaks", &[]),
    (r"#2   min_tags: (\d+)", "min_tags", &[]),
    (r"#2   d: (\d+)", "shift", &[]),
    (r"#2   scan_window: (\d+)", "scan_window", &[]),
    (
        r"#3 Total number of candidates: (\d+)",
        "ncandidates",
        &["positive", "negative"],
    ),
    (
        r"#3 Finally, (\d+) peaks are called!",
        "called",
        &["positive", "negative"],
    ),
];

///
/// Column headers for [`summarize_log`] rows, subgroup-expanded
/// (`ncandidates_positive`, `ncandidates_negative`, ...).
///
pub fn log_metric_headers() -> Vec<String> {
    let mut headers = Vec::new();
    for (_, label, subgroups) in LOG_METRICS {
        if subgroups.is_empty() {
            headers.push(label.to_string());
        } else {
            for subgroup in *subgroups {
                headers.push(format!("{}_{}", label, subgroup));
            }
        }
    }
    headers
}

///
/// Extract peak-calling parameters and results from one MACS run log.
///
/// Returns one table cell per header from [`log_metric_headers`];
/// metrics the log does not carry come back as `na` (runs without a
/// control produce no negative-peak numbers). Scanning stops at the
/// diagnostics section.
///
pub fn summarize_log(reader: impl BufRead) -> Result<Vec<String>, CallerError> {
    let patterns: Vec<Regex> = LOG_METRICS
        .iter()
        .map(|(pattern, _, _)| Regex::new(pattern).unwrap())
        .collect();

    let mut results: Vec<Vec<String>> = vec![Vec::new(); LOG_METRICS.len()];

    for line in reader.lines() {
        let line = line?;
        if line.contains("diag:") {
            break;
        }
        for (i, pattern) in patterns.iter().enumerate() {
            if let Some(captures) = pattern.captures(&line) {
                results[i].push(captures[1].to_string());
                break;
            }
        }
    }

    let mut row = Vec::new();
    for (i, (_, _, subgroups)) in LOG_METRICS.iter().enumerate() {
        let ncells = subgroups.len().max(1);
        for j in 0..ncells {
            row.push(results[i].get(j).cloned().unwrap_or_else(|| "na".to_string()));
        }
    }

    Ok(row)
}

fn parse_u32(value: &str, line: &str) -> Result<u32, CallerError> {
    value
        .parse()
        .map_err(|_| CallerError::ParseError(format!("bad integer {:?} in line {:?}", value, line)))
}

fn parse_f64(value: &str, line: &str) -> Result<f64, CallerError> {
    value
        .parse()
        .map_err(|_| CallerError::ParseError(format!("bad float {:?} in line {:?}", value, line)))
}
