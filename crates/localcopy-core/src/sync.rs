//! [`LocalCopy`]: the entry point tying loading, freshness checks and downloads together.

use std::io::BufRead;
use std::path::Path;

use crate::config::TransportConfig;
use crate::download;
use crate::error::{DownloadError, FreshnessError, LoadError, SyncError};
use crate::freshness;
use crate::loader;
use crate::transport::Transport;

/// Manages a local copy of a remote resource. Holds no state besides the
/// transport configuration; the (url, path) pair is passed on every call.
///
/// Calls targeting the same path are not synchronized with each other.
#[derive(Debug, Clone, Default)]
pub struct LocalCopy {
    transport: Transport,
}

impl LocalCopy {
    pub fn new(config: TransportConfig) -> Self {
        Self {
            transport: Transport::new(config),
        }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Parses the local copy at `path`.
    pub fn load_local<T, E, F>(&self, path: &Path, parse: F) -> Result<T, LoadError<E>>
    where
        F: FnOnce(&mut dyn BufRead) -> Result<T, E>,
    {
        loader::load_local(path, parse)
    }

    /// Parses the remote resource without storing it.
    pub fn load_remote<T, E, F>(&self, url: &str, parse: F) -> Result<T, LoadError<E>>
    where
        F: FnOnce(&mut dyn BufRead) -> Result<T, E>,
    {
        loader::load_remote(&self.transport, url, parse)
    }

    /// Downloads `url` to `path` unconditionally. Returns the number of bytes written.
    pub fn download(&self, url: &str, path: &Path) -> Result<u64, DownloadError> {
        download::download(&self.transport, url, path)
    }

    /// Downloads `url` and replaces `path` only if `parse` accepts the content.
    pub fn download_validated<T, E, F>(
        &self,
        url: &str,
        path: &Path,
        parse: F,
    ) -> Result<T, DownloadError>
    where
        F: FnOnce(&mut dyn BufRead) -> Result<T, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        download::download_validated(&self.transport, url, path, parse)
    }

    /// True if `path` is missing or older than the remote `Last-Modified`.
    pub fn needs_update(&self, url: &str, path: &Path) -> Result<bool, FreshnessError> {
        freshness::needs_update(&self.transport, url, path)
    }

    /// Downloads `url` to `path` if the remote copy is newer.
    ///
    /// Returns `Ok(false)` without any further I/O when the local copy is up
    /// to date, and `Ok(true)` after a successful download. A failed download
    /// is [`SyncError::Download`]; a failed check is [`SyncError::Check`] and
    /// nothing was downloaded.
    pub fn synchronize<T, E, F>(
        &self,
        url: &str,
        path: &Path,
        parse: F,
    ) -> Result<bool, SyncError>
    where
        F: FnOnce(&mut dyn BufRead) -> Result<T, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        if !self.needs_update(url, path)? {
            tracing::info!("{} is up to date with {}", path.display(), url);
            return Ok(false);
        }
        tracing::info!("updating {} from {}", path.display(), url);
        self.download_validated(url, path, parse)?;
        Ok(true)
    }
}
