//! Download the resource to a local path.
//!
//! The body is streamed into a temp file in the destination directory and
//! renamed over the destination only once the whole body arrived (and, for
//! [`download_validated`], the parser accepted the content). The status code
//! is not interpreted; whatever body the server sent is stored.
//! A failed download never leaves a truncated destination behind.

use std::fs;
use std::io::{self, BufRead, Seek, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{DownloadError, TransportError};
use crate::loader::read_with;
use crate::transport::Transport;

/// Body received into a temp file, not yet committed.
struct Staged {
    file: NamedTempFile,
    bytes: u64,
}

/// Downloads `url` into `path`, creating parent directories. Returns the number of bytes written.
pub fn download(transport: &Transport, url: &str, path: &Path) -> Result<u64, DownloadError> {
    let staged = fetch_to_temp(transport, url, path)?;
    commit(staged, url, path)
}

/// Like [`download`], but runs `parse` over the downloaded bytes first and
/// only replaces `path` if it succeeds. Returns the parsed value.
pub fn download_validated<T, E, F>(
    transport: &Transport,
    url: &str,
    path: &Path,
    parse: F,
) -> Result<T, DownloadError>
where
    F: FnOnce(&mut dyn BufRead) -> Result<T, E>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let mut staged = fetch_to_temp(transport, url, path)?;
    let copy_err = |source| DownloadError::Copy {
        path: path.to_path_buf(),
        source,
    };
    staged.file.as_file_mut().rewind().map_err(copy_err)?;

    let value = read_with(staged.file.as_file_mut(), parse).map_err(|e| {
        tracing::warn!("content from {} rejected; keeping {}", url, path.display());
        DownloadError::Rejected {
            url: url.to_string(),
            source: e.into(),
        }
    })?;

    commit(staged, url, path)?;
    Ok(value)
}

fn fetch_to_temp(transport: &Transport, url: &str, path: &Path) -> Result<Staged, DownloadError> {
    let curl_err = |source| TransportError::Curl {
        method: "GET",
        url: url.to_string(),
        source,
    };
    let mut easy = transport.easy("GET", url)?;

    let dir = parent_dir(path);
    fs::create_dir_all(&dir).map_err(|source| DownloadError::CreateDir {
        path: dir.clone(),
        source,
    })?;
    let mut temp = temp_builder()
        .tempfile_in(&dir)
        .map_err(|source| DownloadError::CreateFile {
            dir: dir.clone(),
            source,
        })?;

    tracing::debug!("GET {} -> {}", url, temp.path().display());
    let mut written: u64 = 0;
    let mut write_error: Option<io::Error> = None;
    let result = {
        let file = temp.as_file_mut();
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    tracing::warn!("download write failed: {}", e);
                    write_error = Some(e);
                    Ok(0) // abort transfer
                }
            })
            .map_err(curl_err)?;
        transfer.perform()
    };

    if let Some(source) = write_error {
        return Err(DownloadError::Copy {
            path: path.to_path_buf(),
            source,
        });
    }
    if let Err(source) = result {
        if written == 0 {
            return Err(curl_err(source).into());
        }
        tracing::warn!("GET {} interrupted after {} bytes", url, written);
        return Err(DownloadError::Copy {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::Other, source),
        });
    }

    let code = easy.response_code().map_err(curl_err)?;
    tracing::debug!("GET {} returned HTTP {} ({} bytes)", url, code, written);

    Ok(Staged {
        file: temp,
        bytes: written,
    })
}

fn commit(staged: Staged, url: &str, path: &Path) -> Result<u64, DownloadError> {
    staged
        .file
        .persist(path)
        .map_err(|e| DownloadError::Persist {
            path: path.to_path_buf(),
            source: e.error,
        })?;
    tracing::info!(
        "downloaded {} bytes from {} to {}",
        staged.bytes,
        url,
        path.display()
    );
    Ok(staged.bytes)
}

/// Directory the destination lives in; `.` for a bare file name.
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Temp files get regular-file permissions (0666 before umask) so the
/// committed copy is not owner-only.
fn temp_builder() -> tempfile::Builder<'static, 'static> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".localcopy-").suffix(".part");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder
}
