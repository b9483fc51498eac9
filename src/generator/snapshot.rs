//! Read-back state for previously generated artifacts.
//!
//! The previous run's output is not parsed from its source text. Instead a
//! small JSON state file is written next to the artifact on every successful
//! run and read back on the next one, carrying exactly the fields the
//! policies need to decide whether to regenerate.

use serde::{Deserialize, Serialize};

use super::types::VersionInfo;

/// The sidecar state persisted alongside a generated artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidecarState {
    /// Label the last run resolved as current.
    pub version: String,
    pub bundle_identifier: String,
    /// Empty for simple-mode artifacts.
    #[serde(default)]
    pub history: Vec<VersionInfo>,
}

/// What the reader could recover about the previous run.
///
/// `current_label` of `None` means no artifact existed before (a normal
/// first-run condition, not an error). Fields that exist but cannot be read
/// degrade to `None` independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtifactSnapshot {
    pub current_label: Option<String>,
    pub history: Option<Vec<VersionInfo>>,
    pub bundle_identifier: Option<String>,
}

impl ArtifactSnapshot {
    /// Snapshot for a first run with no prior artifact.
    pub fn missing() -> Self {
        Self::default()
    }
}

impl From<SidecarState> for ArtifactSnapshot {
    fn from(state: SidecarState) -> Self {
        Self {
            current_label: Some(state.version),
            history: Some(state.history),
            bundle_identifier: Some(state.bundle_identifier),
        }
    }
}
