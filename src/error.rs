use thiserror::Error;

/// Errors raised while binding a filter to caller-owned buffers.
///
/// `process` and `flush` never fail; only construction and retuning
/// validate their arguments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DspError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
}

pub type Result<T> = std::result::Result<T, DspError>;
