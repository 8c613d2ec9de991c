use std::fmt::{self, Display};
use std::str::FromStr;

///
/// Which external caller produced a peak table.
///
/// Chosen once by the orchestration layer and passed down as a typed
/// parameter; file suffixes are never sniffed.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallerKind {
    Macs,
    Zinba,
}

impl FromStr for CallerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "macs" => Ok(CallerKind::Macs),
            "zinba" => Ok(CallerKind::Zinba),
            other => Err(format!("unknown caller: {} (expected macs or zinba)", other)),
        }
    }
}

impl Display for CallerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallerKind::Macs => write!(f, "macs"),
            CallerKind::Zinba => write!(f, "zinba"),
        }
    }
}

///
/// Unified caller-output record, 0-based half-open coordinates.
///
/// `pvalue` stays on whatever scale the caller reports (-10*log10 for
/// MACS, `1 - posterior` for Zinba); it is only compared against a
/// threshold, never interpreted. `summit_offset` is the caller's 1-based
/// summit position relative to `start`.
///
#[derive(Debug, Clone, PartialEq)]
pub struct PeakRecord {
    pub chr: String,
    pub start: u32,
    pub end: u32,
    pub summit_offset: u32,
    pub pvalue: f64,
    pub fold: f64,
    pub fdr: f64,
    pub tags: u64,
}

impl PeakRecord {
    /// Absolute summit coordinate.
    pub fn summit(&self) -> u32 {
        (self.start + self.summit_offset).saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("macs", CallerKind::Macs)]
    #[case("MACS", CallerKind::Macs)]
    #[case("zinba", CallerKind::Zinba)]
    fn test_caller_kind_from_str(#[case] input: &str, #[case] expected: CallerKind) {
        assert_eq!(input.parse::<CallerKind>().unwrap(), expected);
    }

    #[rstest]
    fn test_unknown_caller_rejected() {
        assert!("spp".parse::<CallerKind>().is_err());
    }
}
