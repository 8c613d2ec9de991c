use crate::errors::DepthError;

///
/// Minimal projection of an aligned read needed for depth counting.
///
/// `start` is the 0-based 5'-most reference coordinate of the alignment,
/// `length` the observed span on the reference. Duplicate-marked and
/// unmapped reads are excluded at the source and never reach the profiler.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRecord {
    pub start: u32,
    pub length: u32,
    pub reverse: bool,
}

impl ReadRecord {
    /// 3' end of the read on the reference (exclusive).
    pub fn end(&self) -> u32 {
        self.start + self.length
    }
}

///
/// A random-access windowed read query, half-open coordinates.
///
/// Implementations must be readable repeatedly; callers that parallelize
/// across intervals are expected to give each worker its own source
/// handle rather than share one.
///
pub trait ReadSource {
    fn fetch(&mut self, chr: &str, start: u32, end: u32) -> Result<Vec<ReadRecord>, DepthError>;
}
