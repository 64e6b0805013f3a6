//! Bazel output discovery for classpath inference.
//!
//! Bazel does not publish a classpath; its compiled classes and generated
//! jars live under convenience symlinks (`bazel-bin`, `bazel-genfiles`) that
//! point into the output base. This crate resolves those symlinks and scans
//! the trees behind them, filtering the `bazel-bin` traversal to mirror the
//! workspace's real package structure so unrelated Bazel-internal directories
//! are never descended into.

mod scan;

pub use scan::{collect_genfiles_jars, collect_javac_class_dirs};

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BazelScanError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

pub type Result<T> = std::result::Result<T, BazelScanError>;

/// Whether `root` is the top of a Bazel workspace.
pub fn is_bazel_workspace(root: &Path) -> bool {
    ["WORKSPACE", "WORKSPACE.bazel", "MODULE.bazel"]
        .iter()
        .any(|marker| root.join(marker).is_file())
}
