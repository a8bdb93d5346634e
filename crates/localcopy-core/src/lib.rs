//! Keep a local copy of a single HTTP(s) resource up to date.
//!
//! [`LocalCopy`] bundles the operations: load the resource from disk or from
//! the network through a caller-supplied parser, check whether the local copy
//! is older than the remote `Last-Modified`, download it, or synchronize
//! (download only when the remote is newer).

pub mod config;
pub mod logging;

pub mod download;
pub mod error;
pub mod freshness;
pub mod http_date;
pub mod loader;
pub mod sync;
pub mod transport;

pub use config::{LocalCopyConfig, TransportConfig};
pub use error::{DownloadError, FreshnessError, LoadError, SyncError, TransportError};
pub use sync::LocalCopy;
