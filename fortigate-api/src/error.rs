use thiserror::Error;

/// Errors raised by the management API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },
    /// Login did not yield a CSRF token cookie.
    #[error("login to {host} failed: no CSRF token issued (check credentials)")]
    Login { host: String },
    /// A listing call returned a non-success status.
    #[error("GET {path} returned status {status}")]
    Status { path: String, status: u16 },
    /// Response body was not valid JSON.
    #[error("invalid JSON from {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    /// Response JSON did not have the expected layout.
    #[error("unexpected response layout from {path}: {reason}")]
    Shape { path: String, reason: String },
    /// HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
