use std::fmt::{self, Display};

///
/// Region struct, representation of one interval in a RegionSet.
///
/// Coordinates are 0-based, half-open `[start, end)` on a contig.
///
#[derive(PartialEq, Debug, Clone)]
pub struct Region {
    pub chr: String,
    pub start: u32,
    pub end: u32,

    pub name: Option<String>,
    pub score: Option<f64>,
}

impl Region {
    pub fn new(chr: impl Into<String>, start: u32, end: u32) -> Self {
        Region {
            chr: chr.into(),
            start,
            end,
            name: None,
            score: None,
        }
    }

    ///
    /// Get width of the region
    ///
    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    /// Calculate the midpoint of this region: `start + width / 2`.
    pub fn mid_point(&self) -> u32 {
        self.start + self.width() / 2
    }

    ///
    /// True if the other region shares at least one base with this one.
    /// Regions on different contigs never overlap.
    ///
    pub fn overlaps(&self, other: &Region) -> bool {
        self.chr == other.chr && self.start < other.end && other.start < self.end
    }

    ///
    /// Get BED line of Region (tab-separated, without trailing newline)
    ///
    pub fn as_string(&self) -> String {
        let mut line = format!("{}\t{}\t{}", self.chr, self.start, self.end);
        if let Some(name) = &self.name {
            line.push_str(&format!("\t{}", name));
            if let Some(score) = self.score {
                line.push_str(&format!("\t{}", score));
            }
        }
        line
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
