//! Build-tool integration for classpath inference.
//!
//! A downstream analyzer needs an accurate compile classpath without
//! understanding Maven, Gradle, or Bazel itself. This crate covers the
//! build-tool side of that problem: Maven-coordinate artifacts, the on-disk
//! repository layouts jars are resolved against, `mvn dependency:list`
//! invocation and parsing, and the Gradle collaborator seam.

mod artifact;
mod command;
mod gradle;
mod layout;
mod locate;
mod maven;

pub use artifact::Artifact;
pub use command::{CommandOutput, CommandRunner, DefaultCommandRunner};
pub use gradle::{GradleResolver, LocalGradleResolver};
pub use layout::{gradle_cache_dir, jar_file_name, maven_jar_path};
pub use locate::ArtifactLocator;
pub use maven::{
    find_executable_on_path, parse_dependency_list_line, parse_dependency_list_output,
    MavenDependencyLister, MavenListerConfig,
};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid artifact coordinates `{coordinates}`: expected group:artifact:version with non-empty fields")]
    InvalidArtifact { coordinates: String },

    #[error("{tool} command `{command}` failed with exit code {code:?}\nstdout:\n{stdout}\nstderr:\n{stderr}")]
    CommandFailed {
        tool: &'static str,
        command: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

pub type Result<T> = std::result::Result<T, BuildError>;
