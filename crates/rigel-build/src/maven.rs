use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use regex::Regex;

use crate::command::format_command;
use crate::{Artifact, BuildError, CommandRunner, DefaultCommandRunner, Result};

const DEFAULT_LIST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone)]
pub struct MavenListerConfig {
    /// Path to the Maven executable (defaults to `mvn` in `PATH`).
    pub mvn_path: PathBuf,
    /// Prefer the Maven wrapper (`./mvnw`) when the workspace carries one.
    pub prefer_wrapper: bool,
    /// Arguments used to list dependencies.
    pub list_args: Vec<String>,
}

impl Default for MavenListerConfig {
    fn default() -> Self {
        Self {
            mvn_path: PathBuf::from("mvn"),
            prefer_wrapper: true,
            list_args: vec!["dependency:list".into()],
        }
    }
}

/// Lists a Maven workspace's dependency coordinates by invoking
/// `mvn dependency:list` and parsing its stdout.
#[derive(Debug)]
pub struct MavenDependencyLister {
    config: MavenListerConfig,
    runner: Arc<dyn CommandRunner>,
}

impl Default for MavenDependencyLister {
    fn default() -> Self {
        Self::new(MavenListerConfig::default())
    }
}

impl MavenDependencyLister {
    pub fn new(config: MavenListerConfig) -> Self {
        Self::with_runner(
            config,
            Arc::new(DefaultCommandRunner {
                timeout: Some(DEFAULT_LIST_TIMEOUT),
            }),
        )
    }

    pub fn with_runner(config: MavenListerConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    /// Dependency coordinates for the workspace rooted at `workspace_root`.
    ///
    /// Returns an empty set when there is no `pom.xml`, or when the listing
    /// command times out (a stuck build tool must not wedge the caller). A
    /// process that fails to start or exits non-zero is an error: a broken
    /// listing cannot be safely approximated.
    pub fn list_dependencies(&self, workspace_root: &Path) -> Result<BTreeSet<Artifact>> {
        if !workspace_root.join("pom.xml").is_file() {
            return Ok(BTreeSet::new());
        }

        let program = self.mvn_executable(workspace_root);
        let output = match self
            .runner
            .run(workspace_root, &program, &self.config.list_args)
        {
            Ok(output) => output,
            Err(err) if err.kind() == io::ErrorKind::TimedOut => {
                tracing::warn!(
                    workspace_root = %workspace_root.display(),
                    error = %err,
                    "maven dependency listing timed out; treating as empty"
                );
                return Ok(BTreeSet::new());
            }
            Err(err) => return Err(err.into()),
        };

        if !output.status.success() {
            return Err(BuildError::CommandFailed {
                tool: "maven",
                command: format_command(&program, &self.config.list_args),
                code: output.status.code(),
                stdout: output.stdout,
                stderr: output.stderr,
            });
        }

        let dependencies = parse_dependency_list_output(&output.stdout);
        tracing::debug!(
            workspace_root = %workspace_root.display(),
            count = dependencies.len(),
            "parsed maven dependency listing"
        );
        Ok(dependencies)
    }

    fn mvn_executable(&self, workspace_root: &Path) -> PathBuf {
        if self.config.prefer_wrapper {
            let wrapper_name = if cfg!(windows) { "mvnw.cmd" } else { "mvnw" };
            let wrapper = workspace_root.join(wrapper_name);
            if wrapper.is_file() {
                return wrapper;
            }
        }

        #[cfg(windows)]
        {
            // `mvn` is a batch script on Windows; `Command` wants the real file.
            for name in ["mvn.cmd", "mvn.bat"] {
                if let Some(found) = find_executable_on_path(name) {
                    return found;
                }
            }
        }

        self.config.mvn_path.clone()
    }
}

/// Searches the `PATH` directories for an executable file named `name`.
pub fn find_executable_on_path(name: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Parses the stdout of `mvn dependency:list` into artifact coordinates.
///
/// Lines that do not look like dependency entries (build log noise, download
/// progress) are ignored.
pub fn parse_dependency_list_output(output: &str) -> BTreeSet<Artifact> {
    output.lines().filter_map(parse_dependency_list_line).collect()
}

/// Parses a single dependency line of the form
/// `<indent>group:artifact:type[:classifier]:version:scope`, keeping group,
/// artifact, and version. Version and scope are anchored to the end of the
/// entry so a classifier field (e.g. `sources`) cannot shift them. The entry
/// must be preceded by at least two spaces, which is how Maven indents
/// dependency entries relative to its own log prefixes.
pub fn parse_dependency_list_line(line: &str) -> Option<Artifact> {
    static DEPENDENCY_LINE: OnceLock<Regex> = OnceLock::new();
    let re = DEPENDENCY_LINE.get_or_init(|| {
        Regex::new(r"\s{2}([^\s:]+):([^\s:]+):[^\s:]+(?::[^\s:]+)?:([^\s:]+):([^\s:]+)(?:\s.*)?$")
            .expect("valid regex")
    });

    let captures = re.captures(line)?;
    Artifact::new(&captures[1], &captures[2], &captures[3]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dependency_line() {
        let artifact = parse_dependency_list_line("   com.foo:bar:jar:1.2.3:compile").unwrap();
        assert_eq!(artifact, Artifact::parse("com.foo:bar:1.2.3").unwrap());
    }

    #[test]
    fn parses_line_with_log_prefix() {
        let artifact =
            parse_dependency_list_line("[INFO]    org.slf4j:slf4j-api:jar:2.0.9:compile").unwrap();
        assert_eq!(artifact, Artifact::parse("org.slf4j:slf4j-api:2.0.9").unwrap());
    }

    #[test]
    fn parses_line_with_classifier() {
        let artifact =
            parse_dependency_list_line("   com.foo:bar:jar:sources:1.2:compile").unwrap();
        assert_eq!(artifact, Artifact::parse("com.foo:bar:1.2").unwrap());
    }

    #[test]
    fn parses_line_with_trailing_annotation() {
        let artifact = parse_dependency_list_line(
            "[INFO]    org.slf4j:slf4j-api:jar:2.0.9:compile -- module org.slf4j",
        )
        .unwrap();
        assert_eq!(artifact, Artifact::parse("org.slf4j:slf4j-api:2.0.9").unwrap());
    }

    #[test]
    fn ignores_short_and_unindented_lines() {
        assert!(parse_dependency_list_line("   com.foo:bar:1.2.3").is_none());
        assert!(parse_dependency_list_line("com.foo:bar:jar:1.2.3:compile").is_none());
        assert!(parse_dependency_list_line("[INFO] BUILD SUCCESS").is_none());
        assert!(parse_dependency_list_line("").is_none());
    }

    #[test]
    fn parses_full_listing_and_dedupes() {
        let output = "\
[INFO] Scanning for projects...
[INFO] --- maven-dependency-plugin:3.1.2:list (default-cli) @ demo ---
[INFO]
[INFO] The following files have been resolved:
[INFO]    junit:junit:jar:4.12:test
[INFO]    org.hamcrest:hamcrest-core:jar:1.3:test
[INFO]    junit:junit:jar:4.12:test
[INFO] BUILD SUCCESS
";
        let deps = parse_dependency_list_output(output);
        assert_eq!(deps.len(), 2);
        assert!(deps.contains(&Artifact::parse("junit:junit:4.12").unwrap()));
        assert!(deps.contains(&Artifact::parse("org.hamcrest:hamcrest-core:1.3").unwrap()));
    }
}
