//! Content loading: run a caller-supplied parsing function over a byte stream.
//!
//! The parser sees a buffered reader and nothing else; size, encoding and
//! format are entirely its business.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::LoadError;
use crate::transport::Transport;

/// Runs `parse` over `reader` and returns whatever it returns.
pub fn read_with<R, T, E, F>(reader: R, parse: F) -> Result<T, E>
where
    R: Read,
    F: FnOnce(&mut dyn BufRead) -> Result<T, E>,
{
    let mut buffered = BufReader::new(reader);
    parse(&mut buffered)
}

/// Opens `path` and parses its content. The file is closed before returning.
pub fn load_local<T, E, F>(path: &Path, parse: F) -> Result<T, LoadError<E>>
where
    F: FnOnce(&mut dyn BufRead) -> Result<T, E>,
{
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("loading local copy {}", path.display());
    read_with(file, parse).map_err(LoadError::Parse)
}

/// GETs `url` and parses the response body without storing it.
/// The transfer is finished or aborted before returning.
pub fn load_remote<T, E, F>(
    transport: &Transport,
    url: &str,
    parse: F,
) -> Result<T, LoadError<E>>
where
    F: FnOnce(&mut dyn BufRead) -> Result<T, E>,
{
    let body = transport.get(url)?;
    read_with(body, parse).map_err(LoadError::Parse)
}
