use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlgebraError {
    #[error("{op} expects at least {expected} input collections, got {got}")]
    InvalidArity {
        op: &'static str,
        expected: usize,
        got: usize,
    },
}
