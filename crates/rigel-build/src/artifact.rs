use std::fmt;

use crate::{BuildError, Result};

/// A Maven coordinate: the (groupId, artifactId, version) triple identifying a
/// published Java library.
///
/// Ordering and hashing are structural so artifacts can act as set keys;
/// `BTreeSet<Artifact>` gives deterministic iteration, which keeps resolved
/// classpaths stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Artifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl Artifact {
    /// All three fields must be non-empty.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self> {
        let artifact = Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        };
        if artifact.group_id.is_empty()
            || artifact.artifact_id.is_empty()
            || artifact.version.is_empty()
        {
            return Err(BuildError::InvalidArtifact {
                coordinates: artifact.to_string(),
            });
        }
        Ok(artifact)
    }

    /// Parses a user-supplied `group:artifact:version` coordinate string.
    pub fn parse(coordinates: &str) -> Result<Self> {
        let mut parts = coordinates.split(':');
        let (Some(group_id), Some(artifact_id), Some(version), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(BuildError::InvalidArtifact {
                coordinates: coordinates.to_string(),
            });
        };

        Self::new(group_id, artifact_id, version).map_err(|_| BuildError::InvalidArtifact {
            coordinates: coordinates.to_string(),
        })
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}
