use std::path::{Path, PathBuf};

use anyhow::Result;
use std::io::BufRead;

use crate::errors::CoreError;
use crate::models::Region;
use crate::utils::get_dynamic_reader;

///
/// RegionSet struct, the representation of an interval collection backed
/// by a bed-like file.
///
/// Unlike annotation universes, an empty RegionSet is a legal value here:
/// the set algebra assigns meaning to empty collections (intersection
/// short-circuits, subtraction of nothing is a copy).
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionSet {
    pub regions: Vec<Region>,
    pub path: Option<PathBuf>,
}

impl TryFrom<&Path> for RegionSet {
    type Error = anyhow::Error;

    ///
    /// Create a new [RegionSet] from a bed or bed.gz file.
    ///
    /// # Arguments:
    /// - value: path to bed file on disk.
    fn try_from(value: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(value)?;

        let mut new_regions: Vec<Region> = Vec::new();

        for line in reader.lines() {
            let string_line = line?;

            if string_line.is_empty()
                || string_line.starts_with("browser")
                || string_line.starts_with("track")
                || string_line.starts_with('#')
            {
                continue;
            }

            new_regions.push(parse_bed_line(&string_line)?);
        }

        let mut rs = RegionSet {
            regions: new_regions,
            path: Some(value.to_owned()),
        };
        rs.sort();

        Ok(rs)
    }
}

impl TryFrom<&str> for RegionSet {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        RegionSet::try_from(Path::new(value))
    }
}

impl TryFrom<PathBuf> for RegionSet {
    type Error = anyhow::Error;

    fn try_from(value: PathBuf) -> Result<Self> {
        RegionSet::try_from(value.as_path())
    }
}

impl From<Vec<Region>> for RegionSet {
    fn from(regions: Vec<Region>) -> Self {
        RegionSet {
            regions,
            path: None,
        }
    }
}

///
/// Parse one tab-separated bed line: `chr start end [name [score]]`.
///
/// Fails when the coordinate columns are missing or malformed, or when
/// the region violates `start < end`.
///
pub fn parse_bed_line(line: &str) -> Result<Region, CoreError> {
    let parts: Vec<&str> = line.split('\t').collect();

    if parts.len() < 3 {
        return Err(CoreError::RegionParseError(format!(
            "expected at least 3 columns, got {}: {:?}",
            parts.len(),
            line
        )));
    }

    let start: u32 = parts[1]
        .parse()
        .map_err(|_| CoreError::RegionParseError(format!("bad start position: {:?}", parts)))?;
    let end: u32 = parts[2]
        .parse()
        .map_err(|_| CoreError::RegionParseError(format!("bad end position: {:?}", parts)))?;

    if start >= end {
        return Err(CoreError::InvalidRegion {
            chr: parts[0].to_string(),
            start,
            end,
        });
    }

    let name = parts.get(3).map(|s| s.to_string());
    let score = match parts.get(4) {
        Some(s) => Some(
            s.parse::<f64>()
                .map_err(|_| CoreError::RegionParseError(format!("bad score: {:?}", parts)))?,
        ),
        None => None,
    };

    Ok(Region {
        chr: parts[0].to_string(),
        start,
        end,
        name,
        score,
    })
}

pub struct RegionSetIterator<'a> {
    region_set: &'a RegionSet,
    index: usize,
}

impl<'a> Iterator for RegionSetIterator<'a> {
    type Item = &'a Region;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.region_set.regions.len() {
            let region = &self.region_set.regions[self.index];
            self.index += 1;
            Some(region)
        } else {
            None
        }
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = RegionSetIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        RegionSetIterator {
            region_set: self,
            index: 0,
        }
    }
}

impl RegionSet {
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    ///
    /// Sort regions by (chr, start, end)
    ///
    pub fn sort(&mut self) {
        self.regions
            .sort_by(|a, b| (&a.chr, a.start, a.end).cmp(&(&b.chr, b.start, b.end)));
    }

    ///
    /// Assign 1-based sequential interval ids (in current order) to the
    /// name field, replacing whatever was there.
    ///
    pub fn renumber(&mut self) {
        for (id, region) in self.regions.iter_mut().enumerate() {
            region.name = Some((id + 1).to_string());
        }
    }

    ///
    /// Number of bases covered by at least one region.
    ///
    pub fn total_coverage(&self) -> u64 {
        let mut sorted = self.clone();
        sorted.sort();

        let mut covered: u64 = 0;
        let mut last: Option<(&str, u32, u32)> = None;

        for region in &sorted.regions {
            match last {
                Some((chr, _start, end)) if chr == region.chr && region.start < end => {
                    if region.end > end {
                        covered += (region.end - end) as u64;
                        last = Some((&region.chr, region.start, region.end));
                    }
                }
                _ => {
                    covered += region.width() as u64;
                    last = Some((&region.chr, region.start, region.end));
                }
            }
        }

        covered
    }

    ///
    /// Iterate through regions located on a specific contig.
    ///
    pub fn iter_chr_regions<'a>(&'a self, chr: &'a str) -> impl Iterator<Item = &'a Region> {
        self.regions.iter().filter(move |r| r.chr == chr)
    }
}
