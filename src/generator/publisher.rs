//! Durable output of rendered artifacts.

use std::path::PathBuf;

use super::error::{GeneratorError, GeneratorResult};
use super::types::RenderedArtifact;
use crate::core::strings::module_name_for_class;

/// Accepts final artifact text plus its target identity and writes it
/// durably. Write errors are never swallowed; they propagate to the driver's
/// caller as a reported failure.
///
/// Hosts that can trigger overlapping runs must serialize publishes to the
/// same class name themselves; the publisher assumes exclusive ownership of
/// the artifact for the duration of one run.
pub trait ArtifactPublisher {
    fn publish(&self, class_name: &str, rendered: &RenderedArtifact) -> GeneratorResult<()>;
}

/// Writes the artifact and its sidecar state file into the target directory.
pub struct FilePublisher {
    target_dir: PathBuf,
}

impl FilePublisher {
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
        }
    }

    pub fn artifact_path(&self, class_name: &str) -> PathBuf {
        self.target_dir
            .join(format!("{}.rs", module_name_for_class(class_name)))
    }

    pub fn sidecar_path(&self, class_name: &str) -> PathBuf {
        self.target_dir
            .join(format!("{}.state.json", module_name_for_class(class_name)))
    }

    fn check_or_create_target_dir(&self) -> GeneratorResult<()> {
        if self.target_dir.is_file() {
            return Err(GeneratorError::TargetNotADirectory {
                path: self.target_dir.clone(),
            });
        }
        if !self.target_dir.exists() {
            std::fs::create_dir_all(&self.target_dir).map_err(|source| {
                GeneratorError::CreateDirFailed {
                    path: self.target_dir.clone(),
                    source,
                }
            })?;
        }
        Ok(())
    }
}

impl ArtifactPublisher for FilePublisher {
    fn publish(&self, class_name: &str, rendered: &RenderedArtifact) -> GeneratorResult<()> {
        self.check_or_create_target_dir()?;

        let artifact_path = self.artifact_path(class_name);
        std::fs::write(&artifact_path, &rendered.code).map_err(|source| {
            GeneratorError::WriteFailed {
                path: artifact_path.clone(),
                source,
            }
        })?;

        let state_json = serde_json::to_string_pretty(&rendered.state).map_err(|source| {
            GeneratorError::StateEncodeFailed {
                class_name: class_name.to_string(),
                source,
            }
        })?;
        let sidecar_path = self.sidecar_path(class_name);
        std::fs::write(&sidecar_path, state_json).map_err(|source| GeneratorError::WriteFailed {
            path: sidecar_path.clone(),
            source,
        })?;

        log::debug!("Wrote {}", artifact_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::snapshot::SidecarState;
    use crate::generator::types::VersionInfo;

    fn rendered() -> RenderedArtifact {
        RenderedArtifact {
            code: "// GENERATED CODE.\npub struct BuildInfo;\n".to_string(),
            state: SidecarState {
                version: "2.0".to_string(),
                bundle_identifier: "com.acme.app".to_string(),
                history: vec![VersionInfo::new("2.0", 0)],
            },
        }
    }

    #[test]
    fn test_publish_writes_artifact_and_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = FilePublisher::new(dir.path().join("generated"));

        publisher.publish("BuildInfo", &rendered()).unwrap();

        let code = std::fs::read_to_string(publisher.artifact_path("BuildInfo")).unwrap();
        assert!(code.contains("pub struct BuildInfo;"));

        let state: SidecarState =
            serde_json::from_str(&std::fs::read_to_string(publisher.sidecar_path("BuildInfo")).unwrap())
                .unwrap();
        assert_eq!(state, rendered().state);
    }

    #[test]
    fn test_publish_fails_when_target_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("generated");
        std::fs::write(&blocker, "in the way").unwrap();

        let publisher = FilePublisher::new(&blocker);
        let err = publisher.publish("BuildInfo", &rendered()).unwrap_err();
        assert!(matches!(err, GeneratorError::TargetNotADirectory { .. }));
    }

    #[test]
    fn test_publish_creates_nested_target_dir() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = FilePublisher::new(dir.path().join("a/b/generated"));

        publisher.publish("BuildInfo", &rendered()).unwrap();
        assert!(publisher.artifact_path("BuildInfo").is_file());
    }
}
