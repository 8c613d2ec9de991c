use std::io::BufRead;

use crate::errors::CallerError;
use crate::records::PeakRecord;

///
/// Get the peak shift from a Zinba run log.
///
/// The R output prints the offset as a named list element:
///
/// ```text
/// $offset
/// [1] 125
/// ```
///
/// Returns `Ok(None)` if no `$offset` marker is found.
///
pub fn peak_shift(reader: impl BufRead) -> Result<Option<u32>, CallerError> {
    let mut lines = reader.lines();

    while let Some(line) = lines.next() {
        let line = line?;
        if !line.starts_with("$offset") {
            continue;
        }

        let Some(value_line) = lines.next() else {
            return Ok(None);
        };
        let value_line = value_line?;

        // "[1] 125" - the value is the second whitespace-separated field
        return match value_line.split_whitespace().nth(1) {
            Some(value) => {
                let shift = value.parse().map_err(|_| {
                    CallerError::ParseError(format!("bad offset value: {:?}", value_line))
                })?;
                Ok(Some(shift))
            }
            None => Err(CallerError::ParseError(format!(
                "malformed $offset line: {:?}",
                value_line
            ))),
        };
    }

    Ok(None)
}

///
/// Parse a Zinba `.peaks` table into unified peak records.
///
/// Expected columns: `PEAKID Chrom Start Stop Strand Sig Maxloc Max
/// pStart pStop Median qValue`. The refined coordinates (`pStart`,
/// `pStop`) are used; records where refinement produced an inverted span
/// are corrupt caller output. Zinba reports 1-based inclusive R
/// coordinates, shifted to 0-based half-open on ingest.
///
/// Zinba attaches a posterior probability rather than a p-value; the
/// unified record carries `pvalue = 1 - posterior`, `fold = 1`, and the
/// q-value as `fdr`. Peak height lands in `tags`.
///
pub fn read_peaks(reader: impl BufRead) -> Result<Vec<PeakRecord>, CallerError> {
    let mut peaks = Vec::new();

    for line in reader.lines() {
        let line = line?;

        if line.is_empty() || line.starts_with("PEAKID") {
            continue;
        }

        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < 12 {
            return Err(CallerError::ParseError(format!(
                "expected 12 columns in Zinba peak line, got {}: {:?}",
                parts.len(),
                line
            )));
        }

        let chr = parts[1].to_string();
        let posterior = parse_f64(parts[5], &line)?;
        let maxloc = parse_u32(parts[6], &line)?;
        let height = parse_f64(parts[7], &line)?;
        let refined_start = parse_u32(parts[8], &line)?.saturating_sub(1);
        let refined_end = parse_u32(parts[9], &line)?;
        let qvalue = parse_f64(parts[11], &line)?;

        if refined_start >= refined_end {
            return Err(CallerError::DataIntegrity {
                chr,
                start: refined_start,
                end: refined_end,
            });
        }

        peaks.push(PeakRecord {
            chr,
            start: refined_start,
            end: refined_end,
            summit_offset: maxloc.saturating_sub(refined_start),
            pvalue: 1.0 - posterior,
            fold: 1.0,
            fdr: qvalue,
            tags: height as u64,
        });
    }

    Ok(peaks)
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

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_peak_shift() {
        let log = "$bincount\n[1] 42\n$offset\n[1] 125\n";
        assert_eq!(peak_shift(log.as_bytes()).unwrap(), Some(125));
    }

    #[rstest]
    fn test_peak_shift_absent() {
        let log = "$bincount\n[1] 42\n";
        assert_eq!(peak_shift(log.as_bytes()).unwrap(), None);
    }

    #[rstest]
    fn test_peak_shift_malformed_value() {
        let log = "$offset\n[1] not_a_number\n";
        assert!(matches!(
            peak_shift(log.as_bytes()),
            Err(CallerError::ParseError(_))
        ));
    }

    const PEAKS: &str = "\
PEAKID\tChrom\tStart\tStop\tStrand\tSig\tMaxloc\tMax\tpStart\tpStop\tMedian\tqValue\n\
1\tchr1\t900\t1400\t+\t0.99\t1150\t35.0\t1001\t1300\t1150\t0.002\n";

    #[rstest]
    fn test_read_peaks_uses_refined_coordinates() {
        let peaks = read_peaks(PEAKS.as_bytes()).unwrap();
        assert_eq!(peaks.len(), 1);

        let peak = &peaks[0];
        assert_eq!(peak.chr, "chr1");
        assert_eq!(peak.start, 1000);
        assert_eq!(peak.end, 1300);
        assert!((peak.pvalue - 0.01).abs() < 1e-9);
        assert_eq!(peak.fold, 1.0);
        assert_eq!(peak.fdr, 0.002);
        assert_eq!(peak.tags, 35);
    }

    #[rstest]
    fn test_read_peaks_rejects_inverted_refinement() {
        let table = "\
PEAKID\tChrom\tStart\tStop\tStrand\tSig\tMaxloc\tMax\tpStart\tpStop\tMedian\tqValue\n\
1\tchr1\t900\t1400\t+\t0.99\t1150\t35.0\t1301\t1300\t1150\t0.002\n";
        assert!(matches!(
            read_peaks(table.as_bytes()),
            Err(CallerError::DataIntegrity { .. })
        ));
    }
}
