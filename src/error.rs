use thiserror::Error;

/// Failures the harness itself can produce.
///
/// Shape mismatches on 2xx bodies stay plain test assertions; only the
/// conditions shared between scenarios get a variant here.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A single request failed at the transport level (refused, reset,
    /// timed out).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The readiness poll exhausted its timeout without seeing a sub-500
    /// response.
    #[error("service not ready: {url} (waited {waited_secs}s, last error: {last_error})")]
    ServiceUnavailable {
        url: String,
        waited_secs: u64,
        last_error: String,
    },

    /// A response carried a status outside the allowed set.
    #[error("unexpected status from {url}: expected {expected}, got {actual}")]
    UnexpectedStatus {
        url: String,
        expected: String,
        actual: u16,
    },

    /// An error response violated the minimal `{id, message}` body contract.
    #[error("invalid error shape from {url}: {reason}")]
    InvalidErrorShape { url: String, reason: String },
}
