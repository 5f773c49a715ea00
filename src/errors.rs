use thiserror::Error;

/// Error type for payload-level failures at the engine boundary.
///
/// Data-quality problems inside a record (missing amounts, unparsable
/// dates) are never errors; they normalize to defined zero/`None` results.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Payload error: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("Sales API rejected the request: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
