use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A document could not be decoded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure while flattening an extends chain.
///
/// Every recursive frame wraps the error it received in [`ResolutionError::Nested`],
/// so the rendered message reads as a chain of `at <path>:` prefixes down to the
/// root cause.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("circular reference in {}", .0.display())]
    CircularReference(PathBuf),

    #[error("unable to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("failed to read {}: {error}", path.display())]
    Io { path: PathBuf, error: io::Error },

    #[error("at {}: {cause}", path.display())]
    Nested {
        path: PathBuf,
        cause: Box<ResolutionError>,
    },
}

impl ResolutionError {
    pub(crate) fn nested(path: &Path, cause: ResolutionError) -> Self {
        ResolutionError::Nested {
            path: path.to_path_buf(),
            cause: Box::new(cause),
        }
    }

    /// The innermost error, with all path context stripped.
    pub fn root_cause(&self) -> &ResolutionError {
        match self {
            ResolutionError::Nested { cause, .. } => cause.root_cause(),
            other => other,
        }
    }

    pub fn is_circular(&self) -> bool {
        matches!(self.root_cause(), ResolutionError::CircularReference(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self.root_cause(),
            ResolutionError::Io { error, .. } if error.kind() == io::ErrorKind::NotFound
        )
    }
}

/// Anything that can go wrong once a migration has started.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to rename {} to {}: {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}
