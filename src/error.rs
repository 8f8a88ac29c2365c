//! This module defines all error types used throughout the application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Malformed XML in the pit file
    #[error("XML error in {file:?}: {message}")]
    Xml { file: PathBuf, message: String },

    /// No StateModel element with an initialState attribute was found
    #[error("no StateModel with an initialState attribute found under namespace {namespace:?}")]
    NoStateModel { namespace: String },

    /// Layout or raster backend errors
    #[error("Render error: {0}")]
    Render(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),

    /// Wrapped anyhow errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a custom error with a message
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Create an XML parse error for the given file
    pub fn xml(file: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Xml {
            file: file.into(),
            message: msg.into(),
        }
    }

    /// Create a render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Create a no-state-model error for the given namespace
    pub fn no_state_model(namespace: impl Into<String>) -> Self {
        Self::NoStateModel {
            namespace: namespace.into(),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

// Helper macros for creating errors

/// Create a custom error with formatting
#[macro_export]
macro_rules! custom_error {
    ($($arg:tt)*) => {
        $crate::error::Error::Custom(format!($($arg)*))
    };
}

/// Bail with a custom error message
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::custom_error!($($arg)*))
    };
}

/// Ensure a condition is true or return error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($($arg)*);
        }
    };
}
