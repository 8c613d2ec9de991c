use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Error parsing region: {0}")]
    RegionParseError(String),

    #[error("Invalid region {chr}:{start}-{end}: start must be < end")]
    InvalidRegion { chr: String, start: u32, end: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
