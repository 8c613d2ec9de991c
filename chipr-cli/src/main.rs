mod bed;
mod logs;
mod rescore;
mod score;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "chipr";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Re-score, filter and consolidate ChIP-seq intervals produced by external peak callers.")
        .subcommand_required(true)
        .subcommand(bed::cli::create_bed_cli())
        .subcommand(score::cli::create_score_cli())
        .subcommand(rescore::cli::create_rescore_cli())
        .subcommand(logs::cli::create_macs_summary_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // BED SET ALGEBRA
        //
        Some((bed::cli::BED_CMD, matches)) => {
            bed::handlers::run_bed(matches)?;
        }

        //
        // CALLER OUTPUT FILTERING + RE-SCORING
        //
        Some((score::cli::SCORE_CMD, matches)) => {
            score::handlers::run_score(matches)?;
        }

        //
        // RE-SCORE AN ARBITRARY BED COLLECTION
        //
        Some((rescore::cli::RESCORE_CMD, matches)) => {
            rescore::handlers::run_rescore(matches)?;
        }

        //
        // MACS RUN-LOG SUMMARY TABLE
        //
        Some((logs::cli::MACS_SUMMARY_CMD, matches)) => {
            logs::handlers::run_macs_summary(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
