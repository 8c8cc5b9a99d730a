use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("invalid orbital elements: {0}")]
    InvalidElements(String),
    #[error("propagation error: {0}")]
    Propagation(String),
    #[error("minimum elevation {0}° is outside [-90°, 90°]")]
    InvalidThreshold(f64),
    #[error("prediction window is empty")]
    EmptyWindow,
}
