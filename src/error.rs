use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimatorError {
    #[error("Malformed cost: {0}")]
    MalformedCost(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    #[error("Arithmetic domain error: {0}")]
    ArithmeticDomain(String),

    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    #[error("Algorithm `{tag}` panicked: {message}")]
    Panicked { tag: String, message: String },
}

pub type Result<T> = std::result::Result<T, EstimatorError>;

impl From<rayon::ThreadPoolBuildError> for EstimatorError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::WorkerPool(err.to_string())
    }
}
