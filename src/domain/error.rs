// Core error taxonomy - only caller misuse is signalled, data-shape issues are recovered
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("unknown horizon: {0}")]
    UnknownHorizon(String),

    #[error("window size must be positive, got {0}")]
    InvalidWindow(usize),

    #[error("horizon listed more than once in catalog: {0}")]
    DuplicateHorizon(String),

    #[error("date axis has {dates} entries but {records} records were supplied")]
    AxisMismatch { dates: usize, records: usize },
}
