use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::ArgMatches;

use chipr_core::models::RegionSet;
use chipr_depth::{count_peaks, BamReadSource};

const RESCORE_HEADER: &str =
    "interval_id\tcontig\tstart\tend\tnpeaks\tpeakcenter\tlength\tavgval\tpeakval\tnprobes";

#[derive(Debug, Default, Clone, Copy)]
struct RescoreCounters {
    input: u64,
    skipped_length: u64,
    skipped_reads: u64,
    output: u64,
}

pub fn run_rescore(matches: &ArgMatches) -> Result<()> {
    let bed_path = matches.get_one::<String>("bed").expect("--bed is required");
    let regions = RegionSet::try_from(bed_path.as_str())
        .with_context(|| format!("Failed to load BED file: {}", bed_path))?;

    let mut sources = matches
        .get_many::<String>("bam")
        .expect("--bam is required")
        .map(|path| {
            BamReadSource::open(path).with_context(|| format!("Failed to open BAM file: {}", path))
        })
        .collect::<Result<Vec<_>>>()?;

    let offsets: Option<Vec<u32>> = matches
        .get_one::<String>("shift")
        .map(|raw| -> Result<Vec<u32>> {
            let shift: u32 = raw
                .parse()
                .map_err(|_| anyhow::anyhow!("--shift must be a positive integer, got {:?}", raw))?;
            Ok(vec![shift / 2; sources.len()])
        })
        .transpose()?;

    let min_length: u32 = matches
        .get_one::<String>("min-length")
        .expect("--min-length has a default")
        .parse()
        .context("--min-length must be a positive integer")?;

    let mut counters = RescoreCounters::default();
    let mut rows: Vec<String> = Vec::new();

    for region in &regions {
        counters.input += 1;

        // very short intervals are merge artifacts, not binding sites
        if region.width() < min_length {
            counters.skipped_length += 1;
            continue;
        }

        let summary = count_peaks(
            &region.chr,
            region.start,
            region.end,
            &mut sources,
            offsets.as_deref(),
        )?;

        // intervals that only marginally overlapped their replicates can
        // end up with no reads in the consolidated span; not worth a row
        if summary.nprobes == 0 {
            counters.skipped_reads += 1;
            continue;
        }

        counters.output += 1;
        rows.push(format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            counters.output,
            region.chr,
            region.start,
            region.end,
            summary.npeaks,
            summary.peak_center,
            summary.length,
            summary.avg_value,
            summary.peak_value,
            summary.nprobes,
        ));
    }

    match matches.get_one::<String>("output") {
        Some(path) => {
            let mut writer = BufWriter::new(
                File::create(path).with_context(|| format!("Failed to write {}", path))?,
            );
            write_rows(&mut writer, &rows)?;
        }
        None => write_rows(&mut io::stdout().lock(), &rows)?,
    }

    eprintln!(
        "{}: input={}, skipped_length={}, skipped_reads={}, output={}",
        bed_path, counters.input, counters.skipped_length, counters.skipped_reads, counters.output
    );
    if counters.output == 0 {
        eprintln!("{}: no intervals", bed_path);
    }

    Ok(())
}

fn write_rows<W: Write>(writer: &mut W, rows: &[String]) -> io::Result<()> {
    writeln!(writer, "{}", RESCORE_HEADER)?;
    for row in rows {
        writeln!(writer, "{}", row)?;
    }
    Ok(())
}
