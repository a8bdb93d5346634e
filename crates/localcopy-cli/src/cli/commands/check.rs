//! Check command: report whether the local copy is stale.

use anyhow::{Context, Result};
use localcopy_core::LocalCopy;
use std::path::Path;

pub fn run_check(lc: &LocalCopy, url: &str, path: &Path) -> Result<()> {
    let stale = lc
        .needs_update(url, path)
        .with_context(|| format!("cannot check {} against {}", path.display(), url))?;
    println!("{}", if stale { "stale" } else { "fresh" });
    Ok(())
}
