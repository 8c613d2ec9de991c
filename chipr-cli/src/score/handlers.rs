use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use chipr_callers::table::{write_filter_summary, write_scored_peaks};
use chipr_callers::{filter_peaks, peak_shift, read_peaks};
use chipr_callers::{CallerError, CallerKind, FilterThresholds};
use chipr_core::utils::get_dynamic_reader;
use chipr_depth::BamReadSource;

pub fn run_score(matches: &ArgMatches) -> Result<()> {
    let caller: CallerKind = matches
        .get_one::<String>("caller")
        .expect("--caller is required")
        .parse()
        .map_err(anyhow::Error::msg)?;

    let log_path = matches.get_one::<String>("log").expect("--log is required");
    let peaks_path = matches
        .get_one::<String>("peaks")
        .expect("--peaks is required");
    let bam_path = matches.get_one::<String>("bam").expect("--bam is required");

    // a missing shift is caller-data corruption, never silently zero
    let shift = peak_shift(caller, get_dynamic_reader(Path::new(log_path))?)?
        .ok_or_else(|| CallerError::MissingShift(log_path.to_string()))?;
    eprintln!("{}: found peak shift of {}", log_path, shift);

    let control_path = matches.get_one::<String>("control");
    let read_length: u32 = parse_arg(matches, "read-length")?;

    let thresholds = FilterThresholds {
        max_qvalue: parse_arg(matches, "max-qvalue")?,
        min_pvalue: parse_arg(matches, "min-pvalue")?,
        min_fold: parse_arg(matches, "min-fold")?,
        control_max_height: control_path.map(|_| read_length / 2),
    };

    let mut sources = vec![BamReadSource::open(bam_path)
        .with_context(|| format!("Failed to open BAM file: {}", bam_path))?];
    let offsets = vec![shift / 2];

    let mut control_sources = match control_path {
        Some(path) => {
            eprintln!(
                "removing intervals in which control has peak higher than {} reads",
                read_length / 2
            );
            Some(vec![BamReadSource::open(path)
                .with_context(|| format!("Failed to open control BAM file: {}", path))?])
        }
        None => None,
    };

    let records = read_peaks(caller, get_dynamic_reader(Path::new(peaks_path))?)
        .with_context(|| format!("Failed to parse peak table: {}", peaks_path))?;

    let (scored, counters) = filter_peaks(
        records,
        &thresholds,
        &mut sources,
        Some(&offsets),
        control_sources.as_deref_mut(),
    )?;

    match matches.get_one::<String>("output") {
        Some(path) => {
            let mut writer = BufWriter::new(
                File::create(path).with_context(|| format!("Failed to write {}", path))?,
            );
            write_scored_peaks(&mut writer, &scored)?;
        }
        None => write_scored_peaks(&mut io::stdout().lock(), &scored)?,
    }

    match matches.get_one::<String>("summary") {
        Some(path) => {
            let mut writer = BufWriter::new(
                File::create(path).with_context(|| format!("Failed to write {}", path))?,
            );
            write_filter_summary(&mut writer, &counters)?;
        }
        None => write_filter_summary(&mut io::stderr().lock(), &counters)?,
    }

    if counters.output == 0 {
        eprintln!("{}: no peaks found", peaks_path);
    }

    Ok(())
}

fn parse_arg<T: std::str::FromStr>(matches: &ArgMatches, name: &str) -> Result<T> {
    let raw = matches
        .get_one::<String>(name)
        .unwrap_or_else(|| panic!("--{} has a default", name));
    raw.parse()
        .map_err(|_| anyhow::anyhow!("--{} must be a number, got {:?}", name, raw))
}
