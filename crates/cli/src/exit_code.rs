//! Exit codes for the geq CLI.
//!
//! This module defines distinct exit codes for different error types,
//! allowing scripts and CI systems to distinguish between different
//! failure modes.

use geq_introspect::IntrospectionError;

/// Exit codes used by the CLI.
///
/// These follow standard Unix conventions where 0 indicates success
/// and non-zero values indicate different types of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - schema written
    Success = 0,
    /// Configuration error (missing endpoint, malformed header)
    ConfigError = 2,
    /// Fetch error (connection failure, HTTP or GraphQL error response)
    FetchError = 3,
    /// I/O error (file write failure)
    IoError = 4,
    /// Parse error (response is not valid introspection JSON)
    ParseError = 5,
}

impl ExitCode {
    /// Get the numeric value of this exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Classifies a command failure.
    ///
    /// Errors that carry no recognizable source are usage problems and map to
    /// [`ExitCode::ConfigError`].
    #[must_use]
    pub fn for_error(error: &anyhow::Error) -> Self {
        if let Some(error) = error.downcast_ref::<IntrospectionError>() {
            return match error {
                IntrospectionError::InvalidHeader(_) => Self::ConfigError,
                IntrospectionError::Network(_)
                | IntrospectionError::Http { .. }
                | IntrospectionError::Graphql(_) => Self::FetchError,
                IntrospectionError::Parse { .. } => Self::ParseError,
            };
        }
        if error.downcast_ref::<std::io::Error>().is_some() {
            return Self::IoError;
        }
        Self::ConfigError
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(u8::try_from(code.code()).unwrap_or(1))
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::FetchError => write!(f, "fetch error"),
            Self::IoError => write!(f, "I/O error"),
            Self::ParseError => write!(f, "parse error"),
        }
    }
}
