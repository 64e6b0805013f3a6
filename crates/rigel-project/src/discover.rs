use std::path::Path;

use rigel_build::GradleResolver;

/// Which classpath resolution strategy applies to a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// User-supplied coordinate strings override all build-file detection.
    ExternalDeps,
    Maven,
    Bazel,
    Gradle,
    /// No recognized build system; resolves to an empty classpath.
    None,
}

/// Picks a strategy by inspecting marker files in the workspace root.
///
/// First match wins, in a fixed order: external dependencies, then `pom.xml`,
/// then a Bazel workspace marker, then Gradle build files. Build systems are
/// mutually exclusive per workspace in practice; the fixed order means a
/// stray `pom.xml` shadows a real Gradle or Bazel configuration, which is a
/// known limitation rather than a merge we attempt to resolve.
pub fn detect_strategy(
    workspace_root: &Path,
    external_dependencies: &[String],
    gradle: &dyn GradleResolver,
) -> StrategyKind {
    if !external_dependencies.is_empty() {
        return StrategyKind::ExternalDeps;
    }
    if workspace_root.join("pom.xml").is_file() {
        return StrategyKind::Maven;
    }
    if rigel_build_bazel::is_bazel_workspace(workspace_root) {
        return StrategyKind::Bazel;
    }
    if gradle.has_gradle_project(workspace_root) {
        return StrategyKind::Gradle;
    }
    StrategyKind::None
}
