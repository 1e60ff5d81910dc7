//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use bfb_config::ConfigError;
use bfb_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the portal backend")]
    #[diagnostic(
        code(bfb::connection_failed),
        help(
            "Check that the backend is running and the base URL is right.\n\
             Try: bfb health --base-url http://127.0.0.1:5000/api"
        )
    )]
    ConnectionFailed { reason: String },

    // ── Backend ──────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(bfb::request_failed))]
    RequestFailed { message: String, status: Option<u16> },

    #[error("{resource_type} {identifier} not found")]
    #[diagnostic(
        code(bfb::not_found),
        help("Run: bfb {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Unexpected response from backend")]
    #[diagnostic(code(bfb::bad_response), help("{detail}"))]
    BadResponse { detail: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("{reason}")]
    #[diagnostic(code(bfb::validation))]
    Validation { reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(bfb::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: bfb config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(bfb::config), help("Check the file shown by: bfb config path"))]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Prompt failed: {0}")]
    #[diagnostic(
        code(bfb::prompt),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    Prompt(String),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ProfileNotFound { .. } | Self::Config { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { message } => CliError::Validation { reason: message },
            CoreError::Request {
                message,
                status: None,
            } => CliError::ConnectionFailed { reason: message },
            CoreError::Request { message, status } => CliError::RequestFailed { message, status },
            CoreError::Data { message } => CliError::BadResponse { detail: message },
            CoreError::Config { message } => CliError::Config { message },
            CoreError::Internal(message) => CliError::RequestFailed {
                message,
                status: None,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: String::new(),
            },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}

impl CliError {
    /// Upgrade a backend 404 into a `NotFound` that points at a list command.
    pub fn or_not_found(self, resource_type: &str, identifier: u64, list_command: &str) -> Self {
        match self {
            Self::RequestFailed {
                status: Some(404), ..
            } => Self::NotFound {
                resource_type: resource_type.into(),
                identifier: format!("#{identifier}"),
                list_command: list_command.into(),
            },
            other => other,
        }
    }
}
