use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use chipr_callers::macs::{log_metric_headers, summarize_log};
use chipr_core::utils::get_dynamic_reader;

pub fn run_macs_summary(matches: &ArgMatches) -> Result<()> {
    let logs: Vec<&String> = matches
        .get_many::<String>("LOGS")
        .expect("at least one log file is required")
        .collect();

    let mut rows: Vec<String> = Vec::new();
    for path in logs {
        let track = Path::new(path)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone());

        // a broken log should not take the other tracks down with it
        match summarize(path) {
            Ok(cells) => rows.push(format!("{}\t{}", track, cells.join("\t"))),
            Err(e) => eprintln!("{}: {:#}", path, e),
        }
    }

    match matches.get_one::<String>("output") {
        Some(path) => {
            let mut writer = BufWriter::new(
                File::create(path).with_context(|| format!("Failed to write {}", path))?,
            );
            write_table(&mut writer, &rows)?;
        }
        None => write_table(&mut io::stdout().lock(), &rows)?,
    }

    Ok(())
}

fn summarize(path: &str) -> Result<Vec<String>> {
    let reader = get_dynamic_reader(Path::new(path))?;
    Ok(summarize_log(reader)?)
}

fn write_table<W: Write>(writer: &mut W, rows: &[String]) -> io::Result<()> {
    writeln!(writer, "track\t{}", log_metric_headers().join("\t"))?;
    for row in rows {
        writeln!(writer, "{}", row)?;
    }
    Ok(())
}
