use clap::{Arg, Command, arg};

pub const BED_CMD: &str = "bed";

pub fn create_bed_cli() -> Command {
    Command::new(BED_CMD)
        .about("Interval set algebra operations on BED files.")
        .subcommand_required(true)
        .subcommand(
            Command::new("merge")
                .about("Union of two or more BED files, overlapping or abutting intervals coalesced.")
                .arg(
                    Arg::new("beds")
                        .num_args(2..)
                        .required(true)
                        .help("Input BED(.gz) files (at least two)"),
                )
                .arg(arg!(--output <OUTPUT> "Output BED file, .gz aware (default: stdout)").required(false)),
        )
        .subcommand(
            Command::new("intersect")
                .about("Portions of the first BED file covered by every other BED file.")
                .arg(
                    Arg::new("beds")
                        .num_args(1..)
                        .required(true)
                        .help("Input BED(.gz) files; coordinates come from the first"),
                )
                .arg(arg!(--output <OUTPUT> "Output BED file, .gz aware (default: stdout)").required(false)),
        )
        .subcommand(
            Command::new("subtract")
                .about("Remove every portion of A covered by B.")
                .arg(arg!(-a <BED_A> "Input BED file A").required(true))
                .arg(arg!(-b <BED_B> "Input BED file B to subtract").required(true))
                .arg(arg!(--output <OUTPUT> "Output BED file, .gz aware (default: stdout)").required(false)),
        )
}
