use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `dianti`.
///
/// The session client and the config layer each define their own error enum.
/// Library callers can match on these to decide whether to abort or restart a
/// run; the binary continues to use `anyhow::Result` for context chains.
#[derive(Debug, Error)]
pub enum DiantiError {
    // ── Simulation API ──────────────────────────────────────────────────
    #[error("api: {0}")]
    Api(#[from] ApiError),

    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Simulation API errors ───────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, refused, timeout).
    #[error("connection to {url} failed: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success HTTP status.
    #[error("server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not a simulation state we understand.
    #[error("malformed response: {0}")]
    Protocol(String),

    #[error("session has not been started")]
    NotStarted,

    #[error("session was already started")]
    AlreadyStarted,

    #[error("simulation has ended; start a new session to play again")]
    Ended,
}

impl ApiError {
    /// Transport-level failures, as opposed to misuse of the session.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. } | Self::Status { .. } | Self::Protocol(_)
        )
    }
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, DiantiError>;
