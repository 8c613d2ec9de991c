use std::io::Write;

use crate::filter::{FilterCounters, ScoredPeak};

/// Column set of the interval table consumed by the storage sink.
pub const INTERVAL_TABLE_HEADER: &str = "interval_id\tcontig\tstart\tend\tnpeaks\tpeakcenter\tlength\tavgval\tpeakval\tnprobes\tpvalue\tfold\tqvalue\tsummit\ttags";

///
/// Emit scored peaks as the storage sink's tab-separated row stream,
/// interval ids sequential in output order. Always writes the header, so
/// an empty pass still produces a loadable (empty) table.
///
pub fn write_scored_peaks<W: Write>(writer: &mut W, peaks: &[ScoredPeak]) -> std::io::Result<()> {
    writeln!(writer, "{}", INTERVAL_TABLE_HEADER)?;

    for (id, peak) in peaks.iter().enumerate() {
        let record = &peak.record;
        let summary = &peak.summary;
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            id + 1,
            record.chr,
            record.start,
            record.end,
            summary.npeaks,
            summary.peak_center,
            summary.length,
            summary.avg_value,
            summary.peak_value,
            summary.nprobes,
            record.pvalue,
            record.fold,
            record.fdr,
            record.summit(),
            record.tags,
        )?;
    }

    Ok(())
}

///
/// Write the filtering summary (`category\tcounts` table) next to the
/// interval table.
///
pub fn write_filter_summary<W: Write>(
    writer: &mut W,
    counters: &FilterCounters,
) -> std::io::Result<()> {
    writer.write_all(counters.as_table().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chipr_depth::PeakSummary;
    use crate::records::PeakRecord;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn scored_peak() -> ScoredPeak {
        ScoredPeak {
            record: PeakRecord {
                chr: "chr1".to_string(),
                start: 100,
                end: 200,
                summit_offset: 40,
                pvalue: 310.5,
                fold: 12.3,
                fdr: 0.005,
                tags: 25,
            },
            summary: PeakSummary {
                npeaks: 3,
                peak_center: 141,
                length: 100,
                avg_value: 2.5,
                peak_value: 7,
                nprobes: 19,
            },
        }
    }

    #[rstest]
    fn test_write_scored_peaks() {
        let mut out = Vec::new();
        write_scored_peaks(&mut out, &[scored_peak()]).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], INTERVAL_TABLE_HEADER);
        assert_eq!(
            lines[1],
            "1\tchr1\t100\t200\t3\t141\t100\t2.5\t7\t19\t310.5\t12.3\t0.005\t139\t25"
        );
    }

    #[rstest]
    fn test_empty_pass_still_writes_header() {
        let mut out = Vec::new();
        write_scored_peaks(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", INTERVAL_TABLE_HEADER));
    }

    #[rstest]
    fn test_write_filter_summary() {
        let mut out = Vec::new();
        let counters = FilterCounters {
            output: 2,
            ..Default::default()
        };
        write_filter_summary(&mut out, &counters).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("output\t2\n"));
    }
}
