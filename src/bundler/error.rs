//! Error types for bundle assembly.
//!
//! The variants follow the failure taxonomy of the assembler: invalid build
//! metadata, filesystem failures, malformed jar archives, and template
//! rendering problems. Missing optional inputs are not errors; the
//! assemblers log a warning and skip the step.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bundle assembly operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all bundle assembly operations
#[derive(Error, Debug)]
pub enum Error {
    /// Required build metadata is missing or inconsistent.
    ///
    /// Reported before any file operation begins.
    #[error("invalid project metadata: {0}")]
    Validation(String),

    /// A filesystem operation failed.
    #[error("{context} ({path}): {source}")]
    Fs {
        /// What the assembler was doing when the operation failed
        context: String,
        /// The path involved
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// IO errors without a more specific context
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A jar archive could not be read or written
    #[error("jar error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// A template failed to render
    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Generic errors
    #[error("{0}")]
    GenericError(String),
}

/// Bail out of the current function with a [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)).into())
    };
}

/// Attach a message to `Option` / error values, producing a bundler error.
pub trait Context<T> {
    /// Converts the value into a `Result`, using `msg` as the error message.
    fn context(self, msg: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

impl<T, E: std::error::Error> Context<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{msg}: {e}")))
    }
}

/// Attach filesystem context (what + where) to I/O results.
pub trait ErrorExt<T> {
    /// Wraps an I/O error with the operation description and the path involved.
    fn fs_context(self, context: &str, path: &std::path::Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &str, path: &std::path::Path) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context: context.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}
