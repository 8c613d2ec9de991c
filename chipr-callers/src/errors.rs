use thiserror::Error;

use chipr_depth::DepthError;

#[derive(Error, Debug)]
pub enum CallerError {
    #[error("peak record {chr}:{start}-{end} violates start < end (corrupt caller output)")]
    DataIntegrity { chr: String, start: u32, end: u32 },

    #[error("could not determine peak shift from {0}")]
    MissingShift(String),

    #[error("Error parsing peak record: {0}")]
    ParseError(String),

    #[error("control filtering requested without a control height threshold")]
    MissingControlThreshold,

    #[error(transparent)]
    Depth(#[from] DepthError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
