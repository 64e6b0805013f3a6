//! Classpath inference for Java workspaces with an unknown build system.
//!
//! Given a workspace root, this crate detects the build system (Maven, Bazel,
//! Gradle, or a manually supplied dependency list), resolves the dependency
//! jars it implies, unions them with in-workspace compiled-output
//! directories, and hands the result to a downstream analyzer as a plain set
//! of paths. Dependency resolution is computed once per [`InferConfig`] and
//! cached for the lifetime of the instance.

mod discover;
mod infer;
mod scan;

pub use discover::{detect_strategy, StrategyKind};
pub use infer::{InferConfig, ResolutionError};
pub use scan::maven_output_dirs;

pub type Result<T> = std::result::Result<T, ResolutionError>;
