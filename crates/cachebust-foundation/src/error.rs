//! Error handling for the cachebust transform

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while rewriting import specifiers.
///
/// Nothing in the transform catches or downgrades these: every variant aborts
/// the pipeline step for the compilation unit that produced it.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BustError {
    /// A dynamic `import()` whose argument is not a string literal.
    #[error(
        "Cannot transform dynamic import if argument is not string literal ({}:{line})",
        .file.display()
    )]
    NonLiteralDynamicImport { file: PathBuf, line: usize },

    /// The import target could not be read for hashing.
    #[error("Cannot read import target {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The host driver failed to parse a source file.
    #[error("Parse error in {}:{line}: {message}", .file.display())]
    Parse {
        file: PathBuf,
        line: usize,
        message: String,
    },

    /// Code generation failed after the tree was rewritten.
    #[error("Failed to emit code for {}: {message}", .file.display())]
    Emit { file: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The host driver failed to read the importing file itself.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BustError {
    /// Create a non-literal dynamic import error
    pub fn non_literal_dynamic_import(file: impl Into<PathBuf>, line: usize) -> Self {
        Self::NonLiteralDynamicImport {
            file: file.into(),
            line,
        }
    }

    /// Create a file access error for an unreadable import target
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Create a parse error
    pub fn parse(file: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an emit error
    pub fn emit(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Emit {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an I/O error for the file being transformed
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        use error_codes::*;

        match self {
            Self::NonLiteralDynamicImport { .. } => E2001_NON_LITERAL_DYNAMIC_IMPORT,
            Self::FileAccess { .. } => E2002_TARGET_UNREADABLE,
            Self::Parse { .. } => E2003_PARSE_FAILED,
            Self::Emit { .. } => E2004_EMIT_FAILED,
            Self::Config { .. } => E2005_INVALID_CONFIG,
            Self::Io { .. } => E2006_SOURCE_IO,
        }
    }

    /// The file this error is attributed to, if any
    pub fn file(&self) -> Option<&Path> {
        match self {
            Self::NonLiteralDynamicImport { file, .. }
            | Self::Parse { file, .. }
            | Self::Emit { file, .. } => Some(file),
            Self::FileAccess { path, .. } | Self::Io { path, .. } => Some(path),
            Self::Config { .. } => None,
        }
    }

    /// Source line (1-based) for errors tied to a location
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::NonLiteralDynamicImport { line, .. } | Self::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result type alias for convenience
pub type BustResult<T> = Result<T, BustError>;

/// Stable error codes for build tooling
pub mod error_codes {
    /// Dynamic import argument is not a string literal
    pub const E2001_NON_LITERAL_DYNAMIC_IMPORT: &str = "E2001";
    /// Import target is missing or unreadable
    pub const E2002_TARGET_UNREADABLE: &str = "E2002";
    /// Source file could not be parsed
    pub const E2003_PARSE_FAILED: &str = "E2003";
    /// Code generation failed
    pub const E2004_EMIT_FAILED: &str = "E2004";
    /// Invalid configuration
    pub const E2005_INVALID_CONFIG: &str = "E2005";
    /// Source file could not be read
    pub const E2006_SOURCE_IO: &str = "E2006";
}
