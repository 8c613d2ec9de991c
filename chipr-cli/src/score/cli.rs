use clap::{Command, arg};

pub const SCORE_CMD: &str = "score";

pub fn create_score_cli() -> Command {
    Command::new(SCORE_CMD)
        .about("Filter caller output by significance and re-score surviving intervals against aligned reads.")
        .arg(arg!(--caller <CALLER> "Which caller produced the peak table (macs or zinba)").required(true))
        .arg(arg!(--peaks <FILE> "Caller peak table (_peaks.xls for MACS, .peaks for Zinba), .gz aware").required(true))
        .arg(arg!(--log <FILE> "Caller run log carrying the fragment-shift estimate").required(true))
        .arg(arg!(--bam <FILE> "Coordinate-sorted, indexed BAM with the treatment reads").required(true))
        .arg(arg!(--control <FILE> "Indexed BAM with control reads; intervals with tall control pile-ups are removed").required(false))
        .arg(
            arg!(--"read-length" <N> "Read length used to derive the control height ceiling (read_length / 2)")
                .required(false)
                .default_value("36"),
        )
        .arg(
            arg!(--"max-qvalue" <Q> "Reject records with q-value/FDR above this")
                .required(false)
                .default_value("0.01"),
        )
        .arg(
            arg!(--"min-pvalue" <P> "Reject records with p-value (caller scale) below this")
                .required(false)
                .default_value("0"),
        )
        .arg(
            arg!(--"min-fold" <F> "Reject records with fold enrichment below this")
                .required(false)
                .default_value("0"),
        )
        .arg(arg!(--output <FILE> "Output interval table (default: stdout)").required(false))
        .arg(arg!(--summary <FILE> "Where to write the filtering counter table (default: stderr)").required(false))
}
