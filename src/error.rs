// Crate-level error type

/// Errors surfaced by the teleop runtime
#[derive(Debug, thiserror::Error)]
pub enum TeleopError {
    #[error("terminal input error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("failed to encode command: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(#[from] zenoh::Error),

    #[error("key reader task failed: {0}")]
    Reader(#[from] tokio::task::JoinError),
}
