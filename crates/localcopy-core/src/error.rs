//! Error types for loads, freshness checks, downloads and synchronization.
//!
//! Each operation has its own error so callers can tell which phase failed.
//! Nothing here is retried; every error is returned to the immediate caller.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// A request could not be issued or completed.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid URL {url:?}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported URL scheme {scheme:?} in {url} (expected http or https)")]
    UnsupportedScheme { url: String, scheme: String },
    /// Curl reported an error (timeout, connection refused, DNS, ...).
    #[error("{method} {url} failed")]
    Curl {
        method: &'static str,
        url: String,
        #[source]
        source: curl::Error,
    },
}

impl TransportError {
    /// True if the request hit the configured timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Curl { source, .. } if source.is_operation_timedout())
    }
}

/// Error from [`crate::LocalCopy::load_local`] or [`crate::LocalCopy::load_remote`].
///
/// `Parse` carries the parsing function's own error unchanged.
#[derive(Debug)]
pub enum LoadError<E> {
    /// The local file could not be opened.
    Open { path: PathBuf, source: io::Error },
    /// The GET request failed.
    Transport(TransportError),
    /// The parsing function failed.
    Parse(E),
}

impl<E> LoadError<E> {
    /// Returns the parser's error, if that is what failed.
    pub fn into_parse_error(self) -> Option<E> {
        match self {
            LoadError::Parse(e) => Some(e),
            LoadError::Open { .. } | LoadError::Transport(_) => None,
        }
    }
}

impl<E> From<TransportError> for LoadError<E> {
    fn from(e: TransportError) -> Self {
        LoadError::Transport(e)
    }
}

impl<E: fmt::Display> fmt::Display for LoadError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Open { path, .. } => write!(f, "cannot open {}", path.display()),
            LoadError::Transport(e) => write!(f, "{}", e),
            LoadError::Parse(e) => write!(f, "parse failed: {}", e),
        }
    }
}

impl<E> std::error::Error for LoadError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Open { source, .. } => Some(source),
            LoadError::Transport(e) => std::error::Error::source(e),
            LoadError::Parse(e) => e.source(),
        }
    }
}

/// Error from [`crate::LocalCopy::needs_update`].
#[derive(Debug, thiserror::Error)]
pub enum FreshnessError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("response from {url} does not contain a Last-Modified header")]
    MissingLastModified { url: String },
    #[error("Last-Modified header from {url} is empty")]
    EmptyLastModified { url: String },
    #[error("cannot parse Last-Modified header {value:?}")]
    InvalidLastModified {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    /// Stat of the local copy failed for a reason other than "not found".
    #[error("cannot stat local copy {}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Error from [`crate::LocalCopy::download`] and [`crate::LocalCopy::download_validated`].
///
/// The destination is only replaced on success, so any error means the
/// previous content (if any) is still in place.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("failed to download resource")]
    Transport(#[from] TransportError),
    #[error("failed to create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to open local file in {}", dir.display())]
    CreateFile {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Writing the body failed, or the transfer broke after bytes were written.
    #[error("failed to store resource locally at {}", path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The parsing function refused the downloaded content.
    #[error("content downloaded from {url} was rejected")]
    Rejected {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("failed to move download into place at {}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Error from [`crate::LocalCopy::synchronize`].
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("update check failed")]
    Check(#[from] FreshnessError),
    #[error("update failed")]
    Download(#[from] DownloadError),
}

impl SyncError {
    /// True when the remote was newer and a download was started (and failed).
    pub fn download_attempted(&self) -> bool {
        matches!(self, SyncError::Download(_))
    }
}
