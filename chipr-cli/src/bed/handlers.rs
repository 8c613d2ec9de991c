use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ArgMatches;

use chipr_algebra::{intersect, merge, subtract};
use chipr_core::models::RegionSet;
use chipr_io::BedWrite;

pub fn run_bed(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("merge", m)) => {
            let sets = load_inputs(m)?;
            let result = merge(&sets)?;
            write_output(&result, m.get_one::<String>("output"))
        }
        Some(("intersect", m)) => {
            let sets = load_inputs(m)?;
            let result = intersect(&sets)?;
            write_output(&result, m.get_one::<String>("output"))
        }
        Some(("subtract", m)) => {
            let a = load_bed(m.get_one::<String>("BED_A").expect("-a is required"))?;
            let b = load_bed(m.get_one::<String>("BED_B").expect("-b is required"))?;
            let result = subtract(&a, &b);
            write_output(&result, m.get_one::<String>("output"))
        }
        _ => unreachable!("bed subcommand not found"),
    }
}

fn load_bed(path: &str) -> Result<RegionSet> {
    RegionSet::try_from(path).with_context(|| format!("Failed to load BED file: {}", path))
}

fn load_inputs(matches: &ArgMatches) -> Result<Vec<RegionSet>> {
    matches
        .get_many::<String>("beds")
        .expect("input BED files are required")
        .map(|path| load_bed(path))
        .collect()
}

fn write_output(result: &RegionSet, output: Option<&String>) -> Result<()> {
    match output {
        Some(path) if path.ends_with(".gz") => result
            .write_bed_gz(path)
            .with_context(|| format!("Failed to write {}", path)),
        Some(path) => result
            .write_bed(path)
            .with_context(|| format!("Failed to write {}", path)),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            for region in result {
                writeln!(handle, "{}", region)?;
            }
            Ok(())
        }
    }
}
