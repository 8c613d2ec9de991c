use clap::{Arg, Command, arg};

pub const MACS_SUMMARY_CMD: &str = "macs-summary";

pub fn create_macs_summary_cli() -> Command {
    Command::new(MACS_SUMMARY_CMD)
        .about("Collect peak-calling parameters and results from MACS run logs into one table.")
        .arg(
            Arg::new("LOGS")
                .num_args(1..)
                .required(true)
                .help("MACS run log(s), one table row per file"),
        )
        .arg(arg!(--output <FILE> "Output metric table (default: stdout)").required(false))
}
