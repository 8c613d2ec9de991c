use std::fs::File;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{BufWriter, Write};

use chipr_core::models::{Region, RegionSet};

use crate::BED_MAX_SCORE;

pub trait BedWrite {
    ///
    /// Write data to disk as bed file
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_bed<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()>;

    ///
    /// Write data to disk as bed.gz file
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_bed_gz<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()>;
}

/// Format one region as an output bed line. The score column is truncated
/// to an integer and capped at 1000, the maximum the bed format permits;
/// unnamed regions get their 1-based row number.
fn format_bed_line(region: &Region, row: usize) -> String {
    let name = region
        .name
        .clone()
        .unwrap_or_else(|| (row + 1).to_string());

    match region.score {
        Some(score) => {
            let score = score.clamp(0.0, BED_MAX_SCORE) as i64;
            format!(
                "{}\t{}\t{}\t{}\t{}",
                region.chr, region.start, region.end, name, score
            )
        }
        None => format!("{}\t{}\t{}\t{}", region.chr, region.start, region.end, name),
    }
}

impl BedWrite for RegionSet {
    fn write_bed<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = File::create(path)?;

        for (row, region) in self.regions.iter().enumerate() {
            writeln!(file, "{}", format_bed_line(region, row))?;
        }
        Ok(())
    }

    fn write_bed_gz<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::best());

        for (row, region) in self.regions.iter().enumerate() {
            writeln!(encoder, "{}", format_bed_line(region, row))?;
        }

        encoder.finish()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn scored_set() -> RegionSet {
        let mut high = Region::new("chr1", 100, 200);
        high.name = Some("1".to_string());
        high.score = Some(1523.7);

        let mut low = Region::new("chr1", 300, 400);
        low.name = Some("2".to_string());
        low.score = Some(12.9);

        RegionSet::from(vec![high, low])
    }

    #[rstest]
    fn test_score_clamped_on_export(scored_set: RegionSet) {
        let tempdir = tempfile::tempdir().unwrap();
        let out = tempdir.path().join("peaks.bed");

        scored_set.write_bed(&out).unwrap();

        let contents = std::fs::read_to_string(&out).unwrap();
        assert_eq!(contents, "chr1\t100\t200\t1\t1000\nchr1\t300\t400\t2\t12\n");
    }

    #[rstest]
    fn test_unnamed_regions_get_row_numbers() {
        let rs = RegionSet::from(vec![
            Region::new("chr1", 1, 5),
            Region::new("chr1", 10, 20),
        ]);

        let tempdir = tempfile::tempdir().unwrap();
        let out = tempdir.path().join("out.bed");
        rs.write_bed(&out).unwrap();

        let contents = std::fs::read_to_string(&out).unwrap();
        assert_eq!(contents, "chr1\t1\t5\t1\nchr1\t10\t20\t2\n");
    }

    #[rstest]
    fn test_bed_gz_round_trip(scored_set: RegionSet) {
        let tempdir = tempfile::tempdir().unwrap();
        let out = tempdir.path().join("peaks.bed.gz");

        scored_set.write_bed_gz(&out).unwrap();

        let reloaded = RegionSet::try_from(out.as_path()).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.regions[0].score, Some(1000.0));
    }
}
