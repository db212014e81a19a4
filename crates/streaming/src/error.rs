use thiserror::Error;

/// Failure talking to the truck backend.
///
/// The pipeline never propagates these; they end up as a fetch status and a
/// log line while the last accepted trucks stay on screen.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("failed to decode trucks: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
