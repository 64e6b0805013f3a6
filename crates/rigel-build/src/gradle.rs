use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{layout, Artifact, BuildError, Result};

const GRADLE_MARKERS: [&str; 4] = [
    "build.gradle",
    "build.gradle.kts",
    "settings.gradle",
    "settings.gradle.kts",
];

/// Collaborator interface for Gradle-specific resolution.
///
/// The classpath engine treats Gradle as a black box behind this trait: a
/// richer integration (tooling API, init-script injection) can be plugged in
/// without touching the orchestrator.
pub trait GradleResolver: Send + Sync + std::fmt::Debug {
    /// Whether `workspace_root` looks like a Gradle project.
    fn has_gradle_project(&self, workspace_root: &Path) -> bool;

    /// Compiled-output directories inside the workspace.
    fn workspace_class_path(&self, workspace_root: &Path) -> Result<BTreeSet<PathBuf>>;

    /// Dependency jars for the workspace, resolved against `gradle_home`.
    fn build_class_path(
        &self,
        workspace_root: &Path,
        gradle_home: &Path,
    ) -> Result<BTreeSet<PathBuf>>;

    /// Dependency coordinates declared by the workspace.
    fn dependencies(&self, workspace_root: &Path) -> Result<BTreeSet<Artifact>>;

    /// Probes the Gradle module cache for a single artifact's jar.
    fn find_jar(
        &self,
        gradle_home: &Path,
        artifact: &Artifact,
        source: bool,
        workspace_root: &Path,
    ) -> Option<PathBuf>;
}

/// Resolver backed only by what is already on disk.
///
/// It recognizes Gradle projects, finds cached jars, and scans compiled
/// output, but reports no dependency coordinates of its own: listing them
/// reliably requires invoking Gradle, which this resolver deliberately does
/// not do.
#[derive(Debug, Clone, Default)]
pub struct LocalGradleResolver;

impl GradleResolver for LocalGradleResolver {
    fn has_gradle_project(&self, workspace_root: &Path) -> bool {
        GRADLE_MARKERS
            .iter()
            .any(|marker| workspace_root.join(marker).is_file())
    }

    fn workspace_class_path(&self, workspace_root: &Path) -> Result<BTreeSet<PathBuf>> {
        let mut dirs = BTreeSet::new();
        for entry in WalkDir::new(workspace_root) {
            let entry = entry.map_err(|source| BuildError::Walk {
                path: workspace_root.to_path_buf(),
                source,
            })?;
            let name = entry.file_name().to_string_lossy();
            if name != "build.gradle" && name != "build.gradle.kts" {
                continue;
            }
            let Some(module_root) = entry.path().parent() else {
                continue;
            };
            // A `build` directory marks a module that has been built at least
            // once; the java class dirs are reported even before compilation
            // has produced them, like the Maven output scan.
            let build = module_root.join("build");
            if build.is_dir() {
                let classes = build.join("classes").join("java");
                dirs.insert(classes.join("main"));
                dirs.insert(classes.join("test"));
            }
        }
        Ok(dirs)
    }

    fn build_class_path(
        &self,
        workspace_root: &Path,
        gradle_home: &Path,
    ) -> Result<BTreeSet<PathBuf>> {
        let mut jars = BTreeSet::new();
        for artifact in self.dependencies(workspace_root)? {
            match self.find_jar(gradle_home, &artifact, false, workspace_root) {
                Some(jar) => {
                    jars.insert(jar);
                }
                None => {
                    tracing::warn!(%artifact, gradle_home = %gradle_home.display(), "jar not found in gradle cache");
                }
            }
        }
        Ok(jars)
    }

    fn dependencies(&self, workspace_root: &Path) -> Result<BTreeSet<Artifact>> {
        tracing::debug!(
            workspace_root = %workspace_root.display(),
            "local gradle resolver does not list dependency coordinates"
        );
        Ok(BTreeSet::new())
    }

    fn find_jar(
        &self,
        gradle_home: &Path,
        artifact: &Artifact,
        source: bool,
        _workspace_root: &Path,
    ) -> Option<PathBuf> {
        let base = layout::gradle_cache_dir(gradle_home, artifact);
        if !base.is_dir() {
            return None;
        }

        // Files sit one level down in content-hash directories; search for the
        // exact expected file name.
        let wanted = layout::jar_file_name(artifact, source);
        WalkDir::new(&base)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .find(|entry| {
                entry.file_type().is_file() && entry.file_name().to_string_lossy() == wanted
            })
            .map(walkdir::DirEntry::into_path)
    }
}
