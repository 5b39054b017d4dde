use thiserror::Error;

/// Everything that can go wrong talking to the Car Service.
///
/// The UI collapses all of these into one per-operation message; the
/// variants only exist so the log says what actually happened.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, timeout, etc.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status
    #[error("unexpected status {0}")]
    Status(u16),

    /// The body was not the JSON we expected
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}
