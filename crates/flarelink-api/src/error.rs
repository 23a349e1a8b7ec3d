use thiserror::Error;

/// Top-level error type for the `flarelink-api` crate.
///
/// Covers every failure mode across the client: authentication, transport,
/// request composition, and the controller's two in-band failure channels
/// (HTTP status and per-item error records inside a 2xx body).
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Token acquisition failed (wrong credentials, expired account, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Request composition ─────────────────────────────────────────
    /// The input could not be serialized into the body shape the
    /// controller accepts (e.g. a scalar where an object is required).
    #[error("Cannot serialize {resource} body: expected {expected}, got {got}")]
    Serialization {
        resource: &'static str,
        expected: &'static str,
        got: String,
    },

    /// An optional filter value is malformed and would address the wrong
    /// resource if sent (e.g. a non-numeric port number).
    #[error("Invalid {param} filter: {value:?}")]
    InvalidFilter { param: &'static str, value: String },

    // ── Controller responses ────────────────────────────────────────
    /// The controller rejected the request with a non-2xx status.
    #[error("Controller error (HTTP {status}): {message}")]
    RemoteRequest { status: u16, message: String },

    /// A 2xx response whose body carries an in-band error record
    /// (an array element with an `"error"` key).
    #[error("Controller returned error record: {message}")]
    RemoteData { message: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// This layer never retries; callers use this to decide for themselves.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::RemoteRequest { status, .. } => matches!(status, 502 | 503 | 504),
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::RemoteRequest { status: 404, .. } => true,
            _ => false,
        }
    }

    /// The HTTP status the controller answered with, if the failure
    /// originated from a response at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteRequest { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
