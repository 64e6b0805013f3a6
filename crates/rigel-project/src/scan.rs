use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{ResolutionError, Result};

/// Compiled-output directories of a (possibly multi-module) Maven workspace.
///
/// Every `pom.xml` in the tree with a sibling `target` directory contributes
/// `target/classes` and `target/test-classes`. The sub-paths are emitted even
/// when they do not exist yet; classpath consumers tolerate absent entries.
pub fn maven_output_dirs(workspace_root: &Path) -> Result<BTreeSet<PathBuf>> {
    let mut dirs = BTreeSet::new();
    for entry in WalkDir::new(workspace_root) {
        let entry = entry.map_err(|source| ResolutionError::Walk {
            path: workspace_root.to_path_buf(),
            source,
        })?;
        if entry.file_name().to_string_lossy() != "pom.xml" {
            continue;
        }
        let Some(module_root) = entry.path().parent() else {
            continue;
        };
        let target = module_root.join("target");
        if target.is_dir() {
            dirs.insert(target.join("classes"));
            dirs.insert(target.join("test-classes"));
        }
    }
    Ok(dirs)
}
