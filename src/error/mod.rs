use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

pub mod codes;
pub mod helpers;

pub use codes::{describe_error_code, ErrorCode};
pub use helpers::ErrorExt;

/// Operational errors for clinic-intake.
///
/// Rule violations in a submitted record are never represented here; they are
/// returned as data by the validation pipeline.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Input error: {message}")]
    Input {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The value handed to the validator is not a record at all
    #[error("[E{code:04}] Malformed patient record: {message}")]
    MalformedRecord { code: u16, message: String },

    #[error("[E{code:04}] {message}")]
    Other {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl IntakeError {
    /// Create a configuration error with default code
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            code: ErrorCode::CONFIG_GENERIC,
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with specific code
    pub fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create an input error with default code
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            code: ErrorCode::INPUT_GENERIC,
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Create an input error with specific code and file path
    pub fn input_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Input {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Record root is not an object; a caller defect, not a validation result
    pub fn not_an_object(found: &str) -> Self {
        Self::MalformedRecord {
            code: ErrorCode::RECORD_NOT_AN_OBJECT,
            message: format!("expected an object at the record root, found {}", found),
        }
    }

    /// Create a generic other error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            code: ErrorCode::OTHER_GENERIC,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error to this error
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::Input { source: src, .. }
            | Self::Other { source: src, .. } => {
                *src = Some(source.into());
            }
            Self::MalformedRecord { .. } => {}
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::Config { message, .. }
            | Self::Input { message, .. }
            | Self::MalformedRecord { message, .. }
            | Self::Other { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
        }
        self
    }

    /// Get the exit code for this error
    ///
    /// Exit code 1 is reserved by the binary for rejected records.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::Input { .. } => 3,
            Self::MalformedRecord { .. } => 4,
            Self::Other { .. } => 70,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::Input { code, .. }
            | Self::MalformedRecord { code, .. }
            | Self::Other { code, .. } => *code,
        }
    }

    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, .. } => format!("Configuration problem: {}", message),
            Self::Input { message, path, .. } => {
                if let Some(p) = path {
                    format!("Cannot use input {}: {}", p.display(), message)
                } else {
                    format!("Input problem: {}", message)
                }
            }
            Self::MalformedRecord { message, .. } => {
                format!("The submitted data is not a patient record: {}", message)
            }
            Self::Other { message, .. } => message.clone(),
        }
    }

    /// Get a detailed developer message including the source chain
    pub fn developer_message(&self) -> String {
        let mut out = format!("{}", self);
        let mut current = std::error::Error::source(self);
        while let Some(cause) = current {
            out.push_str(&format!("\n  caused by: {}", cause));
            current = cause.source();
        }
        out
    }
}
