//! Tolerant read-back of the previous run's sidecar state.

use std::path::PathBuf;

use serde_json::Value;

use super::snapshot::ArtifactSnapshot;
use super::types::VersionInfo;
use crate::core::strings::module_name_for_class;

/// Reads back whatever the previous run recorded about a generated artifact.
///
/// Reading never fails: a missing artifact is the normal first-run outcome,
/// and a field that exists but cannot be extracted is logged as a warning and
/// treated as absent so the run can degrade gracefully.
pub trait ArtifactReader {
    fn read(&self, class_name: &str) -> ArtifactSnapshot;
}

/// Reads the JSON sidecar written by `FilePublisher`.
pub struct SidecarReader {
    state_dir: PathBuf,
}

impl SidecarReader {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
        }
    }

    /// Path of the state file for an artifact class name.
    pub fn sidecar_path(&self, class_name: &str) -> PathBuf {
        self.state_dir
            .join(format!("{}.state.json", module_name_for_class(class_name)))
    }
}

impl ArtifactReader for SidecarReader {
    fn read(&self, class_name: &str) -> ArtifactSnapshot {
        let path = self.sidecar_path(class_name);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => {
                log::info!(
                    "Very first run, no recorded state for \"{}\" yet",
                    class_name
                );
                return ArtifactSnapshot::missing();
            }
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                log::warn!(
                    "State file {} is not valid JSON ({}), treating as absent",
                    path.display(),
                    e
                );
                return ArtifactSnapshot::missing();
            }
        };

        ArtifactSnapshot {
            current_label: string_field(&value, "version"),
            history: history_field(&value),
            bundle_identifier: string_field(&value, "bundleIdentifier"),
        }
    }
}

fn string_field(value: &Value, field: &str) -> Option<String> {
    match value.get(field) {
        Some(v) => match v.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                log::warn!("Field \"{}\" in state file is not a string", field);
                None
            }
        },
        None => {
            log::warn!("Field \"{}\" missing from state file", field);
            None
        }
    }
}

fn history_field(value: &Value) -> Option<Vec<VersionInfo>> {
    let raw = match value.get("history") {
        Some(raw) => raw,
        None => {
            log::warn!("Field \"history\" missing from state file");
            return None;
        }
    };
    match serde_json::from_value::<Vec<VersionInfo>>(raw.clone()) {
        Ok(history) => Some(history),
        Err(e) => {
            log::warn!(
                "Field \"history\" in state file is not a version list ({})",
                e
            );
            None
        }
    }
}
