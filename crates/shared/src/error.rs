use thiserror::Error;

/// Failure of a single upstream recipe request.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid source url: {0}")]
    InvalidUrl(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("upstream returned HTTP {status}")]
    Status { status: u16 },
    #[error("malformed recipe payload: {0}")]
    Decode(String),
    #[error("upstream payload contained no recipe")]
    Empty,
}

impl From<serde_json::Error> for SourceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}
