use thiserror::Error;

/// Every failure the network engine can report.
///
/// Validation errors are returned at the offending call; a call that fails
/// leaves the network exactly as it was before the call.
#[derive(Debug, Error)]
pub enum NetError {
    /// A layer size was zero.
    #[error("invalid structure: {0}")]
    Structure(String),

    /// A learning rate or momentum factor was negative (or not a number).
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Training/validation inputs and labels do not agree in shape.
    #[error("invalid dataset: {0}")]
    Dataset(String),

    /// `infer` received the wrong number of inputs.
    #[error("inference failed: {0}")]
    Inference(String),

    /// Wrong label count, non-positive threshold, or out-of-order backpropagation.
    #[error("training failed: {0}")]
    Train(String),

    #[error("expected {expected} weights, got {actual}")]
    Weights { expected: usize, actual: usize },

    /// Malformed persisted record or unknown activation tag.
    #[error("storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for NetError {
    fn from(err: serde_json::Error) -> Self {
        NetError::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NetError>;
