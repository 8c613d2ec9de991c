use std::fs::File;
use std::path::Path;

use noodles::bam;
use noodles::bgzf;
use noodles::core::Region;
use noodles::sam;

use crate::errors::DepthError;
use crate::source::{ReadRecord, ReadSource};

///
/// Windowed read queries against a coordinate-sorted, indexed bam file.
///
/// Requires the companion `.bai` index next to the file. Unmapped and
/// duplicate-flagged records are filtered out at this level so the
/// profiler only ever sees usable reads.
///
pub struct BamReadSource {
    reader: bam::io::IndexedReader<bgzf::Reader<File>>,
    header: sam::Header,
}

impl BamReadSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DepthError> {
        let mut reader = bam::io::indexed_reader::Builder::default()
            .build_from_path(path.as_ref())?;
        let header = reader.read_header()?;

        Ok(BamReadSource { reader, header })
    }
}

impl ReadSource for BamReadSource {
    fn fetch(&mut self, chr: &str, start: u32, end: u32) -> Result<Vec<ReadRecord>, DepthError> {
        if start >= end {
            return Ok(Vec::new());
        }

        // noodles regions are 1-based inclusive
        let raw = format!("{}:{}-{}", chr, start + 1, end);
        let region: Region = raw
            .parse()
            .map_err(|e| DepthError::InvalidQuery(format!("{raw}: {e}")))?;

        let mut reads = Vec::new();

        for result in self.reader.query(&self.header, &region)? {
            let record = result?;

            let flags = record.flags();
            if flags.is_unmapped() || flags.is_duplicate() {
                continue;
            }

            let Some(position) = record.alignment_start() else {
                continue;
            };
            let position = position?;

            reads.push(ReadRecord {
                start: (position.get() - 1) as u32,
                length: record.sequence().len() as u32,
                reverse: flags.is_reverse_complemented(),
            });
        }

        Ok(reads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn test_open_missing_file_fails() {
        let result = BamReadSource::open("/nonexistent/reads.bam");
        assert!(matches!(result, Err(DepthError::Io(_))));
    }
}
