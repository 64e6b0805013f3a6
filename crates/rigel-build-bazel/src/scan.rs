use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{BazelScanError, Result};

/// Per-module compiled-class directories under `bazel-bin`.
///
/// Matches the layout `bazel-bin/path/to/pkg/_javac/<rule>/lib*_classes`.
/// The traversal runs in lock-step over the resolved output tree and the real
/// workspace tree: a directory is only descended into when a sibling of the
/// same name exists in the workspace, which keeps the walk inside the
/// mirrored package structure and bounds it by the workspace's actual depth.
pub fn collect_javac_class_dirs(
    bazel_bin: &Path,
    workspace_root: &Path,
) -> Result<BTreeSet<PathBuf>> {
    let bazel_bin_target = resolve_symlink(bazel_bin)?;
    tracing::debug!(target = %bazel_bin_target.display(), "scanning bazel output directories");

    let mut class_dirs = BTreeSet::new();
    // Explicit worklist rather than recursion: deep workspaces must not be
    // able to exhaust the stack.
    let mut worklist = vec![(bazel_bin_target, workspace_root.to_path_buf())];

    while let Some((bazel_dir, real_dir)) = worklist.pop() {
        let javac = bazel_dir.join("_javac");
        if javac.is_dir() {
            for entry in WalkDir::new(&javac) {
                let entry = entry.map_err(|source| BazelScanError::Walk {
                    path: javac.clone(),
                    source,
                })?;
                if entry.file_type().is_dir() && is_javac_class_dir_name(&entry.file_name().to_string_lossy()) {
                    class_dirs.insert(entry.into_path());
                }
            }
        }

        let children = fs::read_dir(&bazel_dir).map_err(|source| BazelScanError::Io {
            path: bazel_dir.clone(),
            source,
        })?;
        for child in children {
            let child = child.map_err(|source| BazelScanError::Io {
                path: bazel_dir.clone(),
                source,
            })?;
            if !child.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            let real_child = real_dir.join(child.file_name());
            if real_child.exists() {
                worklist.push((child.path(), real_child));
            }
        }
    }

    tracing::debug!(count = class_dirs.len(), "found bazel class directories");
    Ok(class_dirs)
}

/// Generated jars under `bazel-genfiles`.
pub fn collect_genfiles_jars(bazel_genfiles: &Path) -> Result<BTreeSet<PathBuf>> {
    let target = resolve_symlink(bazel_genfiles)?;
    tracing::debug!(target = %target.display(), "scanning bazel generated files");

    let mut jars = BTreeSet::new();
    for entry in WalkDir::new(&target) {
        let entry = entry.map_err(|source| BazelScanError::Walk {
            path: target.clone(),
            source,
        })?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "jar")
        {
            jars.insert(entry.into_path());
        }
    }
    Ok(jars)
}

/// Resolves the convenience symlink once. Relative link targets are resolved
/// against the link's parent directory.
fn resolve_symlink(link: &Path) -> Result<PathBuf> {
    let target = fs::read_link(link).map_err(|source| BazelScanError::Io {
        path: link.to_path_buf(),
        source,
    })?;
    if target.is_absolute() {
        Ok(target)
    } else {
        Ok(link.parent().unwrap_or(Path::new(".")).join(target))
    }
}

fn is_javac_class_dir_name(name: &str) -> bool {
    name.starts_with("lib") && name.ends_with("_classes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_dir_name_pattern() {
        assert!(is_javac_class_dir_name("libfoo_classes"));
        assert!(is_javac_class_dir_name("lib_classes"));
        assert!(!is_javac_class_dir_name("foo_classes"));
        assert!(!is_javac_class_dir_name("libfoo"));
    }
}
