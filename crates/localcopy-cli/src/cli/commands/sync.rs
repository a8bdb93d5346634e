//! Sync command: download only if the remote copy is newer.

use anyhow::{Context, Result};
use localcopy_core::LocalCopy;
use std::io::{self, BufRead};
use std::path::Path;

pub fn run_sync(lc: &LocalCopy, url: &str, path: &Path) -> Result<()> {
    let updated = lc
        .synchronize(url, path, |_: &mut dyn BufRead| Ok::<_, io::Error>(()))
        .with_context(|| format!("cannot sync {} from {}", path.display(), url))?;
    println!("{}", if updated { "updated" } else { "up to date" });
    Ok(())
}
