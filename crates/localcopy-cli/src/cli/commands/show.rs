//! Cat and fetch commands: print the local copy or the remote resource.

use anyhow::{Context, Result};
use localcopy_core::LocalCopy;
use std::io::{self, BufRead, Read, Write};
use std::path::Path;

fn read_all(r: &mut dyn BufRead) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    r.read_to_end(&mut buf)?;
    Ok(buf)
}

fn print_lossy(bytes: &[u8]) -> Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(String::from_utf8_lossy(bytes).as_bytes())?;
    out.flush()?;
    Ok(())
}

pub fn run_cat(lc: &LocalCopy, path: &Path) -> Result<()> {
    let bytes = lc
        .load_local(path, read_all)
        .with_context(|| format!("cannot read {}", path.display()))?;
    print_lossy(&bytes)
}

pub fn run_fetch(lc: &LocalCopy, url: &str) -> Result<()> {
    let bytes = lc
        .load_remote(url, read_all)
        .with_context(|| format!("cannot fetch {}", url))?;
    print_lossy(&bytes)
}
