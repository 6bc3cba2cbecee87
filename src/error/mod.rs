use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

/// The unified error type for the recipe allocator
///
/// Insufficient stock is not represented here: an order batch that cannot be
/// met is an ordinary negative outcome of the allocation run. These variants
/// cover malformed input, configuration and file access problems only.
#[derive(Error, Debug)]
pub enum AllocatorError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Storage error: {message}")]
    Storage {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Invalid input: {message}")]
    Input {
        code: u16,
        message: String,
        field: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AllocatorError {
    /// Create a configuration error with specific code
    pub fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a storage error with specific code and path
    pub fn storage_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Storage {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create an input validation error with specific code and field
    pub fn input_with_code(code: u16, message: impl Into<String>, field: Option<String>) -> Self {
        Self::Input {
            code,
            message: message.into(),
            field,
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
            | Self::Storage { source: src, .. }
            | Self::Input { source: src, .. } => {
                *src = Some(source.into());
            }
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::Config { message, .. }
            | Self::Storage { message, .. }
            | Self::Input { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
        }
        self
    }

    /// Attach the file path a storage error relates to
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        if let Self::Storage {
            path: ref mut p, ..
        } = self
        {
            *p = Some(path.into());
        }
        self
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::Storage { .. } => 4,
            Self::Input { .. } => 8,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::Storage { code, .. }
            | Self::Input { code, .. } => *code,
        }
    }

    /// Error code with its registry description, e.g. `[E3004] Input file not found`
    pub fn code_summary(&self) -> String {
        let code = self.code();
        format!("[E{code:04}] {}", describe_error_code(code))
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, .. } => format!("Configuration problem: {}", message),
            Self::Storage { message, path, .. } => {
                if let Some(p) = path {
                    format!("Cannot read {}: {}", p.display(), message)
                } else {
                    format!("Storage error: {}", message)
                }
            }
            Self::Input { message, field, .. } => {
                if let Some(f) = field {
                    format!("Invalid input for '{}': {}", f, message)
                } else {
                    format!("Invalid input: {}", message)
                }
            }
        }
    }
}

/// Type alias for Results using AllocatorError
pub type Result<T> = std::result::Result<T, AllocatorError>;

impl From<std::io::Error> for AllocatorError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let (code, message) = match err.kind() {
            ErrorKind::NotFound => (ErrorCode::STORAGE_NOT_FOUND, "File or directory not found"),
            ErrorKind::PermissionDenied => {
                (ErrorCode::STORAGE_PERMISSION_DENIED, "Permission denied")
            }
            ErrorKind::InvalidData => (ErrorCode::VALIDATION_INVALID_DATA, "Invalid data"),
            _ => (ErrorCode::STORAGE_IO_ERROR, "IO operation failed"),
        };

        AllocatorError::storage_with_code(code, message, None).with_source(err)
    }
}

impl From<serde_json::Error> for AllocatorError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Data => AllocatorError::input_with_code(
                ErrorCode::VALIDATION_INVALID_TYPE,
                err.to_string(),
                None,
            ),
            _ => AllocatorError::input_with_code(
                ErrorCode::VALIDATION_INVALID_FORMAT,
                format!("Invalid JSON syntax: {err}"),
                None,
            )
            .with_source(err),
        }
    }
}

impl From<toml::de::Error> for AllocatorError {
    fn from(err: toml::de::Error) -> Self {
        AllocatorError::config_with_code(ErrorCode::CONFIG_INVALID_TOML, "Invalid TOML syntax")
            .with_source(err)
    }
}
