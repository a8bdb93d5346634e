//! CLI command handlers.

mod check;
mod download;
mod show;
mod sync;

pub use check::run_check;
pub use download::run_download;
pub use show::{run_cat, run_fetch};
pub use sync::run_sync;
