//! Runtime layer for celltrace.
//!
//! Holds the per-bench monitoring context, the TOML workspace configuration,
//! and the file store that persists session records between runs.

pub mod config;
pub mod error;
pub mod monitor;
pub mod store;

pub use config::{Config, ExportConfig, resolve_workspace_path};
pub use error::{Error, Result};
pub use monitor::BenchMonitor;
pub use store::{SessionStore, read_record};
