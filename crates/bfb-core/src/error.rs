// ── Core error types ──
//
// User-facing errors from bfb-core. Transport and backend failures from
// bfb-api collapse into `Request`; validation failures never touch the
// network.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Local validation ─────────────────────────────────────────────
    #[error("{message}")]
    Validation { message: String },

    // ── Remote failures ──────────────────────────────────────────────
    #[error("{message}")]
    Request {
        message: String,
        /// HTTP status code, `None` when the backend was unreachable.
        status: Option<u16>,
    },

    #[error("Unexpected response from backend: {message}")]
    Data { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<bfb_api::Error> for CoreError {
    fn from(err: bfb_api::Error) -> Self {
        match err {
            bfb_api::Error::Request { status, message } => {
                let message = match status {
                    Some(code) => format!("Request failed (HTTP {code}): {message}"),
                    None => format!("Cannot reach backend: {message}"),
                };
                CoreError::Request { message, status }
            }
            bfb_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            bfb_api::Error::Deserialization { message, .. } => CoreError::Data { message },
            bfb_api::Error::Build(message) => CoreError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_failure_keeps_status() {
        let err: CoreError = bfb_api::Error::Request {
            status: Some(404),
            message: "Not Found".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Request { status: Some(404), .. }));
        assert_eq!(err.to_string(), "Request failed (HTTP 404): Not Found");
    }

    #[test]
    fn transport_failure_reads_as_unreachable() {
        let err: CoreError = bfb_api::Error::Request {
            status: None,
            message: "connection refused".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Cannot reach backend: connection refused");
    }
}
