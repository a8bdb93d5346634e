//! Freshness check: compare the remote `Last-Modified` with the local copy's mtime.

use std::io;
use std::path::Path;
use std::time::SystemTime;

use crate::error::FreshnessError;
use crate::http_date;
use crate::transport::{HeaderValue, Transport};

/// Returns true if the local copy at `path` is missing or older than the remote resource.
///
/// Never touches the local copy. Equal timestamps count as up to date.
pub fn needs_update(
    transport: &Transport,
    url: &str,
    path: &Path,
) -> Result<bool, FreshnessError> {
    let head = transport.head(url)?;
    let remote = remote_modified(url, &head.last_modified)?;

    let local = match local_modified(path)? {
        Some(t) => t,
        None => {
            tracing::debug!("local copy {} does not exist; update needed", path.display());
            return Ok(true);
        }
    };

    let stale = is_newer(remote, local);
    tracing::debug!(
        "{}: remote {} vs local {}: {}",
        path.display(),
        http_date::format(remote),
        http_date::format(local),
        if stale { "stale" } else { "fresh" }
    );
    Ok(stale)
}

/// Extracts and parses `Last-Modified`, keeping missing, empty and malformed apart.
pub(crate) fn remote_modified(
    url: &str,
    header: &HeaderValue,
) -> Result<SystemTime, FreshnessError> {
    match header {
        HeaderValue::Absent => Err(FreshnessError::MissingLastModified {
            url: url.to_string(),
        }),
        HeaderValue::Empty => Err(FreshnessError::EmptyLastModified {
            url: url.to_string(),
        }),
        HeaderValue::Value(value) => {
            http_date::parse(value).map_err(|source| FreshnessError::InvalidLastModified {
                value: value.clone(),
                source,
            })
        }
    }
}

/// Modification time of `path`, or `None` if it does not exist.
pub(crate) fn local_modified(path: &Path) -> Result<Option<SystemTime>, FreshnessError> {
    let stat_err = |source| FreshnessError::Stat {
        path: path.to_path_buf(),
        source,
    };
    match std::fs::metadata(path) {
        Ok(meta) => meta.modified().map(Some).map_err(stat_err),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(stat_err(e)),
    }
}

/// Strictly-after comparison.
pub(crate) fn is_newer(remote: SystemTime, local: SystemTime) -> bool {
    remote > local
}
