//! Download command: fetch the resource unconditionally.

use anyhow::{Context, Result};
use localcopy_core::LocalCopy;
use std::path::Path;

pub fn run_download(lc: &LocalCopy, url: &str, path: &Path) -> Result<()> {
    let bytes = lc
        .download(url, path)
        .with_context(|| format!("download of {} failed", url))?;
    println!("{} bytes -> {}", bytes, path.display());
    Ok(())
}
