use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use rigel_build::{
    Artifact, ArtifactLocator, GradleResolver, LocalGradleResolver, MavenDependencyLister,
};
use thiserror::Error;

use crate::{detect_strategy, scan, Result, StrategyKind};

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error(transparent)]
    Build(#[from] rigel_build::BuildError),

    #[error(transparent)]
    Bazel(#[from] rigel_build_bazel::BazelScanError),

    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

/// Infers the effective compile classpath of a Java workspace.
///
/// The dependency-jar portion of the classpath is expensive to compute (it
/// may launch a Maven subprocess or walk large cache trees), so it is
/// resolved at most once per instance. Workspace-local compiled-output
/// directories are cheap and may change while a session is open, so they are
/// recomputed on every call.
#[derive(Debug)]
pub struct InferConfig {
    workspace_root: PathBuf,
    /// User-supplied `group:artifact:version` strings. When non-empty they
    /// override build-file detection entirely.
    external_dependencies: Vec<String>,
    locator: ArtifactLocator,
    gradle: Arc<dyn GradleResolver>,
    lister: MavenDependencyLister,
    dependency_cache: OnceLock<BTreeSet<PathBuf>>,
    compute_lock: Mutex<()>,
}

impl InferConfig {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        let gradle: Arc<dyn GradleResolver> = Arc::new(LocalGradleResolver);
        Self {
            workspace_root: workspace_root.into(),
            external_dependencies: Vec::new(),
            locator: ArtifactLocator::new(
                default_maven_home(),
                default_gradle_home(),
                gradle.clone(),
            ),
            gradle,
            lister: MavenDependencyLister::default(),
            dependency_cache: OnceLock::new(),
            compute_lock: Mutex::new(()),
        }
    }

    /// Overrides build-file detection with explicit coordinates.
    pub fn with_external_dependencies(
        mut self,
        external_dependencies: impl IntoIterator<Item = String>,
    ) -> Self {
        self.external_dependencies = external_dependencies.into_iter().collect();
        self
    }

    pub fn with_maven_home(mut self, maven_home: impl Into<PathBuf>) -> Self {
        self.locator = ArtifactLocator::new(
            maven_home,
            self.locator.gradle_home().to_path_buf(),
            self.gradle.clone(),
        );
        self
    }

    pub fn with_gradle_home(mut self, gradle_home: impl Into<PathBuf>) -> Self {
        self.locator = ArtifactLocator::new(
            self.locator.maven_home().to_path_buf(),
            gradle_home,
            self.gradle.clone(),
        );
        self
    }

    /// Replaces the Gradle collaborator (e.g. with a tooling-API-backed one).
    pub fn with_gradle_resolver(mut self, gradle: Arc<dyn GradleResolver>) -> Self {
        self.locator = ArtifactLocator::new(
            self.locator.maven_home().to_path_buf(),
            self.locator.gradle_home().to_path_buf(),
            gradle.clone(),
        );
        self.gradle = gradle;
        self
    }

    pub fn with_maven_lister(mut self, lister: MavenDependencyLister) -> Self {
        self.lister = lister;
        self
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// The full compile classpath: dependency jars (cached) unioned with
    /// workspace-local compiled-output directories (recomputed per call).
    pub fn class_path(&self) -> Result<BTreeSet<PathBuf>> {
        let mut result = self.build_class_path()?;
        result.extend(self.workspace_class_path()?);
        Ok(result)
    }

    /// Dependency jars only, for callers that need third-party types without
    /// the workspace's own output directories.
    pub fn library_class_path(&self) -> Result<BTreeSet<PathBuf>> {
        self.build_class_path()
    }

    /// Directories inside the workspace that contain compiled `.class` files,
    /// e.g. Maven's `target/classes` per module.
    pub fn workspace_class_path(&self) -> Result<BTreeSet<PathBuf>> {
        match self.strategy() {
            StrategyKind::Maven => scan::maven_output_dirs(&self.workspace_root),
            StrategyKind::Bazel => {
                let bazel_bin = self.workspace_root.join("bazel-bin");
                if bazel_bin.exists() && bazel_bin.is_symlink() {
                    Ok(rigel_build_bazel::collect_javac_class_dirs(
                        &bazel_bin,
                        &self.workspace_root,
                    )?)
                } else {
                    Ok(BTreeSet::new())
                }
            }
            StrategyKind::Gradle => Ok(self.gradle.workspace_class_path(&self.workspace_root)?),
            StrategyKind::ExternalDeps | StrategyKind::None => Ok(BTreeSet::new()),
        }
    }

    /// Source jars for the workspace's dependencies, for documentation and
    /// navigation. Mirrors the dependency dispatch with the `-sources`
    /// variant; Bazel has no source-jar support here (known gap). Not cached.
    pub fn doc_path(&self) -> Result<BTreeSet<PathBuf>> {
        match self.strategy() {
            StrategyKind::ExternalDeps => self.resolve_external_jars(true),
            StrategyKind::Maven => {
                let mut result = BTreeSet::new();
                for artifact in self.lister.list_dependencies(&self.workspace_root)? {
                    if let Some(jar) = self.locator.locate_maven(&artifact, true) {
                        result.insert(jar);
                    }
                }
                Ok(result)
            }
            StrategyKind::Gradle => {
                let mut result = BTreeSet::new();
                for artifact in self.gradle.dependencies(&self.workspace_root)? {
                    if let Some(jar) = self.gradle.find_jar(
                        self.locator.gradle_home(),
                        &artifact,
                        true,
                        &self.workspace_root,
                    ) {
                        result.insert(jar);
                    }
                }
                Ok(result)
            }
            StrategyKind::Bazel | StrategyKind::None => Ok(BTreeSet::new()),
        }
    }

    fn strategy(&self) -> StrategyKind {
        detect_strategy(
            &self.workspace_root,
            &self.external_dependencies,
            self.gradle.as_ref(),
        )
    }

    /// Cached dependency-jar resolution. The first caller computes while
    /// holding the lock; concurrent callers block on it rather than launching
    /// duplicate subprocesses. Once the slot is set, reads are lock-free. A
    /// failed computation leaves the slot empty so a later call can retry.
    fn build_class_path(&self) -> Result<BTreeSet<PathBuf>> {
        if let Some(cached) = self.dependency_cache.get() {
            return Ok(cached.clone());
        }

        let _guard = self
            .compute_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = self.dependency_cache.get() {
            return Ok(cached.clone());
        }

        let resolved = self.resolve_dependency_class_path()?;
        let _ = self.dependency_cache.set(resolved.clone());
        Ok(resolved)
    }

    fn resolve_dependency_class_path(&self) -> Result<BTreeSet<PathBuf>> {
        match self.strategy() {
            StrategyKind::ExternalDeps => self.resolve_external_jars(false),
            StrategyKind::Maven => {
                let mut result = BTreeSet::new();
                for artifact in self.lister.list_dependencies(&self.workspace_root)? {
                    match self.locator.locate_maven(&artifact, false) {
                        Some(jar) => {
                            result.insert(jar);
                        }
                        None => tracing::warn!(
                            %artifact,
                            maven_home = %self.locator.maven_home().display(),
                            "jar not found in maven repository; omitting from classpath"
                        ),
                    }
                }
                Ok(result)
            }
            StrategyKind::Bazel => {
                let bazel_genfiles = self.workspace_root.join("bazel-genfiles");
                if bazel_genfiles.exists() && bazel_genfiles.is_symlink() {
                    let jars = rigel_build_bazel::collect_genfiles_jars(&bazel_genfiles)?;
                    tracing::debug!(count = jars.len(), "found bazel generated jars");
                    Ok(jars)
                } else {
                    Ok(BTreeSet::new())
                }
            }
            StrategyKind::Gradle => Ok(self
                .gradle
                .build_class_path(&self.workspace_root, self.locator.gradle_home())?),
            StrategyKind::None => Ok(BTreeSet::new()),
        }
    }

    fn resolve_external_jars(&self, source: bool) -> Result<BTreeSet<PathBuf>> {
        let mut result = BTreeSet::new();
        for id in &self.external_dependencies {
            let artifact = Artifact::parse(id)?;
            match self.locator.locate(&artifact, source, &self.workspace_root) {
                Some(jar) => {
                    result.insert(jar);
                }
                None => tracing::warn!(
                    %artifact,
                    maven_home = %self.locator.maven_home().display(),
                    gradle_home = %self.locator.gradle_home().display(),
                    "jar not found in maven or gradle repositories; omitting from classpath"
                ),
            }
        }
        Ok(result)
    }
}

fn default_maven_home() -> PathBuf {
    home_dir().join(".m2")
}

fn default_gradle_home() -> PathBuf {
    if let Some(gradle_user_home) = std::env::var_os("GRADLE_USER_HOME") {
        if !gradle_user_home.is_empty() {
            let path = PathBuf::from(gradle_user_home);
            if path.exists() {
                return path;
            }
        }
    }
    home_dir().join(".gradle")
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}
