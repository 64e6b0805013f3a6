use std::path::{Path, PathBuf};

use crate::Artifact;

/// Expected jar file name for an artifact, optionally the `-sources` variant.
pub fn jar_file_name(artifact: &Artifact, source: bool) -> String {
    let suffix = if source { "-sources" } else { "" };
    format!(
        "{}-{}{suffix}.jar",
        artifact.artifact_id, artifact.version
    )
}

/// Expected location of an artifact's jar under the Maven local repository.
///
/// `maven_home` is the `.m2` directory; the repository lives under
/// `<maven_home>/repository`, with each group-id segment becoming a path
/// component.
pub fn maven_jar_path(maven_home: &Path, artifact: &Artifact, source: bool) -> PathBuf {
    let mut path = maven_home.join("repository");
    for segment in artifact.group_id.split('.') {
        path.push(segment);
    }
    path.push(&artifact.artifact_id);
    path.push(&artifact.version);
    path.push(jar_file_name(artifact, source));
    path
}

/// Directory the Gradle module cache stores an artifact's files under.
///
/// Unlike Maven, Gradle keeps the group id as a single path component and
/// nests each file in a content-hash subdirectory, so callers search this
/// directory rather than computing a full file path.
pub fn gradle_cache_dir(gradle_home: &Path, artifact: &Artifact) -> PathBuf {
    gradle_home
        .join("caches/modules-2/files-2.1")
        .join(&artifact.group_id)
        .join(&artifact.artifact_id)
        .join(&artifact.version)
}
