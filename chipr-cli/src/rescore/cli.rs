use clap::{Arg, Command, arg};

pub const RESCORE_CMD: &str = "rescore";

pub fn create_rescore_cli() -> Command {
    Command::new(RESCORE_CMD)
        .about("Re-score an arbitrary BED collection by counting reads within each interval.")
        .arg(arg!(--bed <FILE> "Input BED(.gz) interval collection").required(true))
        .arg(
            Arg::new("bam")
                .long("bam")
                .num_args(1..)
                .required(true)
                .help("Coordinate-sorted, indexed BAM file(s) with aligned reads"),
        )
        .arg(
            arg!(--shift <N> "Fragment-shift estimate; tags are moved by shift/2 before counting")
                .required(false),
        )
        .arg(
            arg!(--"min-length" <N> "Skip intervals shorter than this")
                .required(false)
                .default_value("0"),
        )
        .arg(arg!(--output <FILE> "Output interval table (default: stdout)").required(false))
}
