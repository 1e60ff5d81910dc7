use thiserror::Error;

/// Top-level error type for the `bfb-api` crate.
///
/// Transport failures and non-success HTTP statuses share one variant,
/// [`Error::Request`]; callers only need to know that the call failed and,
/// when the backend answered, with which status.
#[derive(Debug, Error)]
pub enum Error {
    // ── Request ─────────────────────────────────────────────────────
    /// The request could not be completed. `status` is `None` when no
    /// response was received (connection refused, DNS, timeout).
    #[error("Request failed{}: {message}", status_suffix(.status))]
    Request {
        status: Option<u16>,
        message: String,
    },

    /// Base URL or resource path could not be turned into a URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Data ────────────────────────────────────────────────────────
    /// Success response whose body was not the expected JSON.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    Build(String),
}

#[allow(clippy::ref_option)]
fn status_suffix(status: &Option<u16>) -> String {
    status.map(|code| format!(" (HTTP {code})")).unwrap_or_default()
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Request {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl Error {
    /// HTTP status carried by the failure, if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns `true` when no response was received at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request { status: None, .. })
    }

    /// Returns `true` if the backend answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_display_includes_status_when_present() {
        let err = Error::Request {
            status: Some(500),
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "Request failed (HTTP 500): boom");
        assert!(!err.is_transport());
    }

    #[test]
    fn transport_failure_has_no_status() {
        let err = Error::Request {
            status: None,
            message: "connection refused".into(),
        };
        assert_eq!(err.to_string(), "Request failed: connection refused");
        assert!(err.is_transport());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn not_found_detection() {
        let err = Error::Request {
            status: Some(404),
            message: "Not Found".into(),
        };
        assert!(err.is_not_found());
    }
}
