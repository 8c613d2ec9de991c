use crate::errors::DepthError;
use crate::source::ReadSource;

///
/// Per-base coverage over a half-open interval, one count per base in
/// `[start, start + len)`, plus the number of reads that contributed.
///
/// Created fresh per profiler invocation and not mutated afterwards.
///
#[derive(Debug, Clone, PartialEq)]
pub struct DepthProfile {
    pub start: u32,
    pub counts: Vec<u32>,
    pub read_count: u64,
}

impl DepthProfile {
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

///
/// Count reads per position over `[start, end)` across all sources.
///
/// Without offsets, every base covered by a read's observed span is
/// incremented (clipped to the window), and `read_count` goes up once per
/// overlapping read.
///
/// With offsets (one per source, mismatched lengths are rejected), tags
/// are shifted following the caller's fragment-modeling convention: only
/// read ends are taken, extended by the offset toward the fragment
/// midpoint. Forward-strand reads are gathered from the window shifted
/// upstream by the offset and accumulate `[pos, pos + 2*offset)`;
/// reverse-strand reads from the window shifted downstream and accumulate
/// `[end3 - 2*offset, end3)` where `end3 = pos + length`. Window starts
/// clamp at zero genome-side, and every increment clips to the profile.
///
pub fn compute_depth<S: ReadSource>(
    chr: &str,
    start: u32,
    end: u32,
    sources: &mut [S],
    offsets: Option<&[u32]>,
) -> Result<DepthProfile, DepthError> {
    if let Some(offsets) = offsets {
        if offsets.len() != sources.len() {
            return Err(DepthError::MismatchedOffsets {
                sources: sources.len(),
                offsets: offsets.len(),
            });
        }
    }

    let length = end.saturating_sub(start) as i64;
    let mut counts = vec![0u32; length as usize];
    let mut read_count: u64 = 0;

    match offsets {
        Some(offsets) => {
            for (source, &offset) in sources.iter_mut().zip(offsets) {
                let off = offset as i64;

                // forward strand: shift tags upstream, i.e. query the
                // downstream-shifted window
                let xstart = (start as i64 - off).max(0);
                let xend = (end as i64 - off).max(0);

                for read in source.fetch(chr, xstart as u32, xend as u32)? {
                    if read.reverse {
                        continue;
                    }
                    read_count += 1;
                    let pos = read.start as i64;
                    let rstart = (pos - xstart - off).max(0);
                    let rend = (pos - xstart + off).min(length);
                    for count in &mut counts[clip(rstart, rend, length)] {
                        *count += 1;
                    }
                }

                // reverse strand: shift tags downstream
                let xstart = (start as i64 + off).max(0);
                let xend = (end as i64 + off).max(0);

                for read in source.fetch(chr, xstart as u32, xend as u32)? {
                    if !read.reverse {
                        continue;
                    }
                    read_count += 1;
                    let end3 = read.end() as i64;
                    let rstart = (end3 - xstart - off).max(0);
                    let rend = (end3 - xstart + off).min(length);
                    for count in &mut counts[clip(rstart, rend, length)] {
                        *count += 1;
                    }
                }
            }
        }
        None => {
            for source in sources.iter_mut() {
                for read in source.fetch(chr, start, end)? {
                    read_count += 1;
                    let pos = read.start as i64 - start as i64;
                    let rstart = pos.max(0);
                    let rend = (pos + read.length as i64).min(length);
                    for count in &mut counts[clip(rstart, rend, length)] {
                        *count += 1;
                    }
                }
            }
        }
    }

    Ok(DepthProfile {
        start,
        counts,
        read_count,
    })
}

/// Turn possibly-inverted i64 bounds into a valid index range.
fn clip(rstart: i64, rend: i64, length: i64) -> std::ops::Range<usize> {
    let lo = rstart.clamp(0, length) as usize;
    let hi = rend.clamp(0, length) as usize;
    lo..hi.max(lo)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::source::ReadRecord;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    /// In-memory read source for profiler tests.
    pub(crate) struct VecReadSource {
        pub reads: Vec<ReadRecord>,
    }

    impl ReadSource for VecReadSource {
        fn fetch(
            &mut self,
            _chr: &str,
            start: u32,
            end: u32,
        ) -> Result<Vec<ReadRecord>, DepthError> {
            Ok(self
                .reads
                .iter()
                .copied()
                .filter(|r| r.start < end && r.end() > start)
                .collect())
        }
    }

    fn fwd(start: u32, length: u32) -> ReadRecord {
        ReadRecord {
            start,
            length,
            reverse: false,
        }
    }

    fn rev(start: u32, length: u32) -> ReadRecord {
        ReadRecord {
            start,
            length,
            reverse: true,
        }
    }

    #[rstest]
    fn test_single_read_no_offsets() {
        let mut sources = vec![VecReadSource {
            reads: vec![fwd(1002, 5)],
        }];

        let profile = compute_depth("chr1", 1000, 1010, &mut sources, None).unwrap();

        assert_eq!(profile.counts, vec![0, 0, 1, 1, 1, 1, 1, 0, 0, 0]);
        assert_eq!(profile.read_count, 1);
    }

    #[rstest]
    #[case(500, 600)]
    #[case(0, 1)]
    #[case(1000, 1010)]
    fn test_profile_length_matches_interval(#[case] start: u32, #[case] end: u32) {
        let mut sources = vec![VecReadSource { reads: vec![] }];
        let profile = compute_depth("chr1", start, end, &mut sources, None).unwrap();
        assert_eq!(profile.len() as u32, end - start);
    }

    #[rstest]
    fn test_read_clipped_to_window() {
        // read spans past both window edges
        let mut sources = vec![VecReadSource {
            reads: vec![fwd(95, 20)],
        }];

        let profile = compute_depth("chr1", 100, 110, &mut sources, None).unwrap();

        assert_eq!(profile.counts, vec![1; 10]);
        assert_eq!(profile.read_count, 1);
    }

    #[rstest]
    fn test_multiple_sources_accumulate() {
        let mut sources = vec![
            VecReadSource {
                reads: vec![fwd(100, 10)],
            },
            VecReadSource {
                reads: vec![fwd(105, 10)],
            },
        ];

        let profile = compute_depth("chr1", 100, 115, &mut sources, None).unwrap();

        assert_eq!(profile.read_count, 2);
        assert_eq!(profile.counts[5], 2); // both reads cover 105..110
        assert_eq!(profile.counts[0], 1);
        assert_eq!(profile.counts[12], 1);
    }

    #[rstest]
    fn test_mismatched_offsets_rejected() {
        let mut sources = vec![
            VecReadSource { reads: vec![] },
            VecReadSource { reads: vec![] },
        ];

        let result = compute_depth("chr1", 0, 10, &mut sources, Some(&[5]));
        assert!(matches!(
            result,
            Err(DepthError::MismatchedOffsets {
                sources: 2,
                offsets: 1
            })
        ));
    }

    #[rstest]
    fn test_forward_shift_window() {
        // offset 10: a forward read at 1005 contributes the 2*offset
        // window [1005, 1025) relative to the genome, clipped to the
        // interval [1000, 1020)
        let mut sources = vec![VecReadSource {
            reads: vec![fwd(1005, 5)],
        }];

        let profile = compute_depth("chr1", 1000, 1020, &mut sources, Some(&[10])).unwrap();

        let mut expected = vec![0u32; 20];
        for count in &mut expected[5..20] {
            *count = 1;
        }
        assert_eq!(profile.counts, expected);
        assert_eq!(profile.read_count, 1);
    }

    #[rstest]
    fn test_reverse_shift_window() {
        // offset 10: a reverse read with 3' end 1017 contributes
        // [997, 1017), clipped to [1000, 1017)
        let mut sources = vec![VecReadSource {
            reads: vec![rev(1012, 5)],
        }];

        let profile = compute_depth("chr1", 1000, 1020, &mut sources, Some(&[10])).unwrap();

        let mut expected = vec![0u32; 20];
        for count in &mut expected[0..17] {
            *count = 1;
        }
        assert_eq!(profile.counts, expected);
        assert_eq!(profile.read_count, 1);
    }

    #[rstest]
    fn test_shift_mode_separates_strands() {
        // the forward pass must ignore reverse reads and vice versa;
        // each read is still counted exactly once
        let mut sources = vec![VecReadSource {
            reads: vec![fwd(1005, 5), rev(1012, 5)],
        }];

        let profile = compute_depth("chr1", 1000, 1020, &mut sources, Some(&[10])).unwrap();

        assert_eq!(profile.read_count, 2);
        // forward window [5,20) and reverse window [0,17) overlap in [5,17)
        assert_eq!(profile.counts[10], 2);
        assert_eq!(profile.counts[2], 1);
        assert_eq!(profile.counts[18], 1);
    }

    #[rstest]
    fn test_shifted_query_reaches_outside_reads() {
        // a forward read upstream of the interval still contributes once
        // its shifted window overlaps: read at 995, offset 10 covers
        // genome [995, 1015)
        let mut sources = vec![VecReadSource {
            reads: vec![fwd(995, 5)],
        }];

        let profile = compute_depth("chr1", 1000, 1020, &mut sources, Some(&[10])).unwrap();

        assert_eq!(profile.read_count, 1);
        let mut expected = vec![0u32; 20];
        for count in &mut expected[0..15] {
            *count = 1;
        }
        assert_eq!(profile.counts, expected);
    }

    #[rstest]
    fn test_deterministic() {
        let reads = vec![fwd(100, 10), rev(120, 10), fwd(130, 10)];
        let mut a = vec![VecReadSource {
            reads: reads.clone(),
        }];
        let mut b = vec![VecReadSource { reads }];

        let pa = compute_depth("chr1", 90, 160, &mut a, Some(&[7])).unwrap();
        let pb = compute_depth("chr1", 90, 160, &mut b, Some(&[7])).unwrap();
        assert_eq!(pa, pb);
    }
}
