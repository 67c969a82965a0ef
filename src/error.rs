//! Error types for repository scanning
//!
//! Only a caller-level fault is fatal; every per-file, per-rule, and
//! per-manifest fault degrades in place and is logged instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// The root path handed to the aggregator does not exist or is
    /// not a directory. The only fatal condition in a scan.
    #[error("repository path does not exist: {0}")]
    RootNotFound(PathBuf),
}
