use thiserror::Error;

#[derive(Error, Debug)]
pub enum DepthError {
    #[error("sources/offsets length mismatch: {sources} read sources but {offsets} offsets")]
    MismatchedOffsets { sources: usize, offsets: usize },

    #[error("zero-length depth profile: nothing to summarize")]
    EmptyInterval,

    #[error("invalid query region {0}")]
    InvalidQuery(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
