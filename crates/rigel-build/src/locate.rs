use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{layout, Artifact, GradleResolver};

/// Probes the local dependency caches for an artifact's jar.
///
/// The Maven repository is checked first, then the Gradle cache via the
/// [`GradleResolver`] collaborator. A jar missing from both is not an error;
/// callers log a warning and omit the artifact from the classpath.
#[derive(Debug)]
pub struct ArtifactLocator {
    maven_home: PathBuf,
    gradle_home: PathBuf,
    gradle: Arc<dyn GradleResolver>,
}

impl ArtifactLocator {
    pub fn new(
        maven_home: impl Into<PathBuf>,
        gradle_home: impl Into<PathBuf>,
        gradle: Arc<dyn GradleResolver>,
    ) -> Self {
        Self {
            maven_home: maven_home.into(),
            gradle_home: gradle_home.into(),
            gradle,
        }
    }

    pub fn maven_home(&self) -> &Path {
        &self.maven_home
    }

    pub fn gradle_home(&self) -> &Path {
        &self.gradle_home
    }

    /// Returns the first existing jar for `artifact` in either repository.
    pub fn locate(
        &self,
        artifact: &Artifact,
        source: bool,
        workspace_root: &Path,
    ) -> Option<PathBuf> {
        self.locate_maven(artifact, source).or_else(|| {
            self.gradle
                .find_jar(&self.gradle_home, artifact, source, workspace_root)
        })
    }

    /// Maven-repository-only probe, used where the Gradle cache must not be
    /// consulted (the Maven strategy resolves its own listing).
    pub fn locate_maven(&self, artifact: &Artifact, source: bool) -> Option<PathBuf> {
        let jar = layout::maven_jar_path(&self.maven_home, artifact, source);
        jar.is_file().then_some(jar)
    }
}
