use chipr_core::models::{Region, RegionSet};

use crate::error::AlgebraError;

///
/// Self-merge a collection into canonical form: sorted by (chr, start),
/// with overlapping *or abutting* regions coalesced into their union span.
/// Names and scores do not survive coalescing. Idempotent.
///
pub fn normalize(rs: &RegionSet) -> RegionSet {
    let mut sorted = rs.clone();
    sorted.sort();

    let mut merged: Vec<Region> = Vec::with_capacity(sorted.len());

    for region in &sorted.regions {
        match merged.last_mut() {
            Some(last) if last.chr == region.chr && region.start <= last.end => {
                last.end = last.end.max(region.end);
            }
            _ => merged.push(Region::new(region.chr.clone(), region.start, region.end)),
        }
    }

    let mut result = RegionSet::from(merged);
    result.renumber();
    result
}

///
/// Union of two or more collections.
///
/// All input regions are pooled, sorted, and coalesced; ids are
/// renumbered 1-based in output order. A single-collection "merge" is a
/// misuse (it would be [`normalize`]) and is rejected.
///
pub fn merge(collections: &[RegionSet]) -> Result<RegionSet, AlgebraError> {
    if collections.len() < 2 {
        return Err(AlgebraError::InvalidArity {
            op: "merge",
            expected: 2,
            got: collections.len(),
        });
    }

    let pooled: Vec<Region> = collections
        .iter()
        .flat_map(|rs| rs.regions.iter().cloned())
        .collect();

    Ok(normalize(&RegionSet::from(pooled)))
}

///
/// Base-level intersection across collections.
///
/// Output coordinates are portions of the *first* collection's
/// (normalized) regions that are covered by every other collection. Each
/// collection is normalized before folding, so overlap structure within
/// one input does not affect the result.
///
/// With a single collection the input is returned as an unmodified copy.
/// Any empty input collection short-circuits to an empty result.
///
pub fn intersect(collections: &[RegionSet]) -> Result<RegionSet, AlgebraError> {
    if collections.is_empty() {
        return Err(AlgebraError::InvalidArity {
            op: "intersect",
            expected: 1,
            got: 0,
        });
    }

    if collections.len() == 1 {
        return Ok(collections[0].clone());
    }

    if collections.iter().any(|rs| rs.is_empty()) {
        return Ok(RegionSet::default());
    }

    let mut acc = normalize(&collections[0]);
    for other in &collections[1..] {
        acc = clip_to_coverage(&acc, &normalize(other));
        if acc.is_empty() {
            break;
        }
    }

    acc.renumber();
    Ok(acc)
}

///
/// Remove from `a` every base covered by `b`.
///
/// An empty `b` yields an unmodified copy of `a`; an empty `a` yields an
/// empty result. Otherwise `a` is normalized and the surviving
/// sub-intervals are renumbered.
///
pub fn subtract(a: &RegionSet, b: &RegionSet) -> RegionSet {
    if b.is_empty() {
        return a.clone();
    }
    if a.is_empty() {
        return RegionSet::default();
    }

    let a = normalize(a);
    let b = normalize(b);

    let mut out: Vec<Region> = Vec::new();

    for region in &a.regions {
        let mut cursor = region.start;

        for hit in b.iter_chr_regions(&region.chr) {
            if hit.end <= cursor || hit.start >= region.end {
                continue;
            }
            if hit.start > cursor {
                out.push(Region::new(region.chr.clone(), cursor, hit.start));
            }
            cursor = cursor.max(hit.end);
            if cursor >= region.end {
                break;
            }
        }

        if cursor < region.end {
            out.push(Region::new(region.chr.clone(), cursor, region.end));
        }
    }

    let mut result = RegionSet::from(out);
    result.renumber();
    result
}

/// Both inputs must be normalized (sorted, non-overlapping). Returns the
/// base-level intersection segments via a two-pointer sweep.
fn clip_to_coverage(a: &RegionSet, b: &RegionSet) -> RegionSet {
    let mut out: Vec<Region> = Vec::new();

    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let ra = &a.regions[i];
        let rb = &b.regions[j];

        if ra.chr < rb.chr {
            i += 1;
            continue;
        }
        if rb.chr < ra.chr {
            j += 1;
            continue;
        }

        let start = ra.start.max(rb.start);
        let end = ra.end.min(rb.end);
        if start < end {
            out.push(Region::new(ra.chr.clone(), start, end));
        }

        if ra.end <= rb.end {
            i += 1;
        } else {
            j += 1;
        }
    }

    RegionSet::from(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn set(spans: &[(&str, u32, u32)]) -> RegionSet {
        RegionSet::from(
            spans
                .iter()
                .map(|(chr, s, e)| Region::new(*chr, *s, *e))
                .collect::<Vec<_>>(),
        )
    }

    fn spans(rs: &RegionSet) -> Vec<(String, u32, u32)> {
        rs.regions
            .iter()
            .map(|r| (r.chr.clone(), r.start, r.end))
            .collect()
    }

    #[fixture]
    fn replicate_a() -> RegionSet {
        set(&[("chr1", 100, 200), ("chr1", 150, 250)])
    }

    #[fixture]
    fn replicate_b() -> RegionSet {
        set(&[("chr1", 180, 300)])
    }

    #[rstest]
    fn test_normalize_coalesces_overlap(replicate_a: RegionSet) {
        let merged = normalize(&replicate_a);
        assert_eq!(spans(&merged), vec![("chr1".to_string(), 100, 250)]);
        assert_eq!(merged.regions[0].name.as_deref(), Some("1"));
    }

    #[rstest]
    fn test_normalize_coalesces_abutting() {
        let merged = normalize(&set(&[("chr1", 100, 200), ("chr1", 200, 300)]));
        assert_eq!(spans(&merged), vec![("chr1".to_string(), 100, 300)]);
    }

    #[rstest]
    fn test_normalize_keeps_contigs_apart() {
        let merged = normalize(&set(&[("chr2", 100, 200), ("chr1", 150, 250)]));
        assert_eq!(
            spans(&merged),
            vec![("chr1".to_string(), 150, 250), ("chr2".to_string(), 100, 200)]
        );
    }

    #[rstest]
    fn test_normalize_stable_under_permutation(replicate_a: RegionSet) {
        let mut reversed = replicate_a.clone();
        reversed.regions.reverse();
        assert_eq!(normalize(&replicate_a), normalize(&reversed));
    }

    #[rstest]
    fn test_merge_requires_two_collections(replicate_a: RegionSet) {
        assert!(matches!(
            merge(&[replicate_a]),
            Err(AlgebraError::InvalidArity { op: "merge", .. })
        ));
    }

    #[rstest]
    fn test_merge_unions_collections(replicate_a: RegionSet, replicate_b: RegionSet) {
        let merged = merge(&[replicate_a, replicate_b]).unwrap();
        assert_eq!(spans(&merged), vec![("chr1".to_string(), 100, 300)]);
    }

    #[rstest]
    fn test_merge_idempotent_on_own_output(replicate_a: RegionSet, replicate_b: RegionSet) {
        let merged = merge(&[replicate_a, replicate_b]).unwrap();
        let remerged = merge(&[merged.clone(), merged.clone()]).unwrap();
        assert_eq!(spans(&remerged), spans(&merged));
    }

    #[rstest]
    fn test_intersect_single_collection_is_copy(replicate_a: RegionSet) {
        let result = intersect(std::slice::from_ref(&replicate_a)).unwrap();
        assert_eq!(result, replicate_a);
    }

    #[rstest]
    fn test_intersect_clips_to_first_collection(replicate_a: RegionSet, replicate_b: RegionSet) {
        // scenario from the pipeline: consolidated replicates vs. a control set
        let consolidated = normalize(&replicate_a);
        let result = intersect(&[consolidated, replicate_b]).unwrap();
        assert_eq!(spans(&result), vec![("chr1".to_string(), 180, 250)]);
        assert_eq!(result.regions[0].name.as_deref(), Some("1"));
    }

    #[rstest]
    fn test_intersect_empty_input_short_circuits(replicate_a: RegionSet) {
        let result = intersect(&[replicate_a, RegionSet::default()]).unwrap();
        assert!(result.is_empty());
    }

    #[rstest]
    fn test_intersect_three_way() {
        let a = set(&[("chr1", 0, 100)]);
        let b = set(&[("chr1", 50, 150)]);
        let c = set(&[("chr1", 75, 200)]);
        let result = intersect(&[a, b, c]).unwrap();
        assert_eq!(spans(&result), vec![("chr1".to_string(), 75, 100)]);
    }

    #[rstest]
    fn test_subtract_trims_overlap(replicate_a: RegionSet, replicate_b: RegionSet) {
        let consolidated = normalize(&replicate_a);
        let result = subtract(&consolidated, &replicate_b);
        assert_eq!(spans(&result), vec![("chr1".to_string(), 100, 180)]);
        assert_eq!(result.regions[0].name.as_deref(), Some("1"));
    }

    #[rstest]
    fn test_subtract_splits_around_hole() {
        let a = set(&[("chr1", 0, 100)]);
        let b = set(&[("chr1", 40, 60)]);
        let result = subtract(&a, &b);
        assert_eq!(
            spans(&result),
            vec![("chr1".to_string(), 0, 40), ("chr1".to_string(), 60, 100)]
        );
    }

    #[rstest]
    fn test_subtract_empty_b_is_copy(replicate_a: RegionSet) {
        let result = subtract(&replicate_a, &RegionSet::default());
        assert_eq!(result, replicate_a);
    }

    #[rstest]
    fn test_subtract_empty_a_is_empty(replicate_b: RegionSet) {
        let result = subtract(&RegionSet::default(), &replicate_b);
        assert!(result.is_empty());
    }

    #[rstest]
    fn test_subtract_intersect_partition_a(replicate_a: RegionSet, replicate_b: RegionSet) {
        // subtract(A,B) and intersect([A,B]) partition A's covered bases
        let removed = subtract(&replicate_a, &replicate_b);
        let kept = intersect(&[replicate_a.clone(), replicate_b]).unwrap();
        let recovered = merge(&[removed, kept]).unwrap();
        assert_eq!(
            recovered.total_coverage(),
            normalize(&replicate_a).total_coverage()
        );
        assert_eq!(spans(&recovered), spans(&normalize(&replicate_a)));
    }
}
