//! History-tracking generation policy.
//!
//! Every label ever generated is carried forward into the next artifact with
//! its original index. Re-issuing an older label (a rollback) makes the
//! existing entry current again instead of appending a duplicate.

use super::policy::{line, GenerationPolicy};
use super::snapshot::{ArtifactSnapshot, SidecarState};
use super::template::TemplateProvisioner;
use super::types::{GenerationRequest, RenderedArtifact, VersionInfo};
use crate::core::strings::constant_name_for_label;

pub struct TrackedPolicy {
    request: GenerationRequest,
    provisioner: Box<dyn TemplateProvisioner>,
}

impl TrackedPolicy {
    pub fn new(request: GenerationRequest, provisioner: Box<dyn TemplateProvisioner>) -> Self {
        Self {
            request,
            provisioner,
        }
    }

    /// Merge the carried-forward history with the requested label.
    ///
    /// Returns the merged history and the index of the current entry within
    /// it. The label is searched before anything is appended, so a rollback
    /// reuses the existing entry and the history length stays unchanged.
    fn merge_history(&self, previous: Option<&[VersionInfo]>) -> (Vec<VersionInfo>, usize) {
        let mut history: Vec<VersionInfo> = previous.map(<[_]>::to_vec).unwrap_or_default();
        if let Some(pos) = history
            .iter()
            .position(|info| info.label == self.request.new_version_label)
        {
            return (history, pos);
        }
        let index = history.len();
        history.push(VersionInfo::new(
            self.request.new_version_label.clone(),
            index,
        ));
        (history, index)
    }
}

impl GenerationPolicy for TrackedPolicy {
    fn detect_change(&self, snapshot: &ArtifactSnapshot) -> bool {
        match snapshot.history.as_deref() {
            Some(history) if !history.is_empty() => match &snapshot.current_label {
                Some(current) if *current == self.request.new_version_label => false,
                Some(current) => {
                    log::info!(
                        "Found new version {} replacing previous version {} in \"{}\"",
                        self.request.new_version_label,
                        current,
                        self.request.class_name
                    );
                    true
                }
                None => true,
            },
            _ => {
                if snapshot.current_label.is_some() {
                    log::warn!(
                        "Recorded state for \"{}\" has no usable history",
                        self.request.class_name
                    );
                }
                true
            }
        }
    }

    fn render(&self, snapshot: &ArtifactSnapshot) -> Option<RenderedArtifact> {
        // Generating for the very first time also needs the auxiliary
        // version-info type in place; without it there is nothing to emit.
        if !self.provisioner.ensure() {
            return None;
        }

        let (history, current_index) = self.merge_history(snapshot.history.as_deref());
        let current_name = constant_name_for_label(&history[current_index].label);
        let class_name = &self.request.class_name;

        let mut code = String::new();
        let mut ctor_body = String::new();
        code.push_str(&line(0, "#![allow(non_upper_case_globals)]", 2));
        code.push_str(&line(
            0,
            "use super::tracked_version_info::TrackedVersionInfo;",
            2,
        ));
        code.push_str(&line(0, "// GENERATED CODE.", 1));
        code.push_str(&line(
            0,
            &format!(
                "pub const BUNDLE_IDENTIFIER: &'static str = \"{}\";",
                self.request.bundle_identifier
            ),
            2,
        ));
        for info in &history {
            let name = constant_name_for_label(&info.label);
            code.push_str(&line(
                0,
                &format!(
                    "pub const {}: TrackedVersionInfo = TrackedVersionInfo::new(\"{}\", {});",
                    name, info.label, info.index
                ),
                1,
            ));
            ctor_body.push_str(&line(2, &format!("history.push({});", name), 1));
        }
        code.push('\n');
        code.push_str(&line(0, &format!("pub struct {} {{", class_name), 1));
        code.push_str(&line(1, "pub history: Vec<TrackedVersionInfo>,", 1));
        code.push_str(&line(1, "pub current: TrackedVersionInfo,", 1));
        code.push_str(&line(0, "}", 2));
        code.push_str(&line(0, &format!("impl {} {{", class_name), 1));
        code.push_str(&line(1, "pub fn new() -> Self {", 1));
        code.push_str(&line(2, "let mut history = Vec::new();", 1));
        code.push_str(&ctor_body);
        code.push_str(&line(2, "Self {", 1));
        code.push_str(&line(3, "history,", 1));
        code.push_str(&line(3, &format!("current: {},", current_name), 1));
        code.push_str(&line(2, "}", 1));
        code.push_str(&line(1, "}", 1));
        code.push_str(&line(0, "}", 1));

        let state = SidecarState {
            version: history[current_index].label.clone(),
            bundle_identifier: self.request.bundle_identifier.clone(),
            history,
        };

        Some(RenderedArtifact { code, state })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::types::GenerationMode;

    struct AlwaysReady;

    impl TemplateProvisioner for AlwaysReady {
        fn ensure(&self) -> bool {
            true
        }
    }

    struct NeverReady;

    impl TemplateProvisioner for NeverReady {
        fn ensure(&self) -> bool {
            false
        }
    }

    fn policy(label: &str) -> TrackedPolicy {
        TrackedPolicy::new(
            GenerationRequest {
                class_name: "TrackedBuildVersion".to_string(),
                new_version_label: label.to_string(),
                bundle_identifier: "com.acme.app".to_string(),
                mode: GenerationMode::Tracked,
            },
            Box::new(AlwaysReady),
        )
    }

    fn snapshot_for(state: &SidecarState) -> ArtifactSnapshot {
        ArtifactSnapshot::from(state.clone())
    }

    #[test]
    fn test_detect_change_on_first_run() {
        assert!(policy("1.0").detect_change(&ArtifactSnapshot::missing()));
    }

    #[test]
    fn test_detect_change_with_unusable_history() {
        // Label present but history empty still means "needs generation".
        let snapshot = ArtifactSnapshot {
            current_label: Some("1.0".to_string()),
            history: Some(Vec::new()),
            bundle_identifier: None,
        };
        assert!(policy("1.0").detect_change(&snapshot));
    }

    #[test]
    fn test_no_change_when_current_matches() {
        let rendered = policy("1.0").render(&ArtifactSnapshot::missing()).unwrap();
        assert!(!policy("1.0").detect_change(&snapshot_for(&rendered.state)));
    }

    #[test]
    fn test_history_accumulates_in_order() {
        let first = policy("1.0").render(&ArtifactSnapshot::missing()).unwrap();
        let second = policy("1.1").render(&snapshot_for(&first.state)).unwrap();
        let third = policy("1.2").render(&snapshot_for(&second.state)).unwrap();

        assert_eq!(
            third.state.history,
            vec![
                VersionInfo::new("1.0", 0),
                VersionInfo::new("1.1", 1),
                VersionInfo::new("1.2", 2),
            ]
        );
        assert_eq!(third.state.version, "1.2");
    }

    #[test]
    fn test_rollback_reuses_existing_entry() {
        let first = policy("1.0").render(&ArtifactSnapshot::missing()).unwrap();
        let second = policy("1.1").render(&snapshot_for(&first.state)).unwrap();
        let rolled_back = policy("1.0").render(&snapshot_for(&second.state)).unwrap();

        assert_eq!(rolled_back.state.history.len(), 2);
        assert_eq!(rolled_back.state.version, "1.0");
        // The constructor must push each entry exactly once.
        assert_eq!(rolled_back.code.matches("history.push(").count(), 2);
        assert!(rolled_back.code.contains("current: Version_1_0,"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let first = policy("1.1").render(&ArtifactSnapshot::missing()).unwrap();
        let second = policy("1.1").render(&snapshot_for(&first.state)).unwrap();
        assert_eq!(first.code, second.code);
        assert_eq!(first.state, second.state);
    }

    #[test]
    fn test_render_emits_constants_and_constructor() {
        let first = policy("1.0").render(&ArtifactSnapshot::missing()).unwrap();
        let second = policy("1.1").render(&snapshot_for(&first.state)).unwrap();

        assert!(second
            .code
            .contains("pub const Version_1_0: TrackedVersionInfo = TrackedVersionInfo::new(\"1.0\", 0);"));
        assert!(second
            .code
            .contains("pub const Version_1_1: TrackedVersionInfo = TrackedVersionInfo::new(\"1.1\", 1);"));
        assert!(second.code.contains("pub struct TrackedBuildVersion {"));
        assert!(second.code.contains("history.push(Version_1_0);"));
        assert!(second.code.contains("history.push(Version_1_1);"));
        assert!(second.code.contains("current: Version_1_1,"));
        assert!(second
            .code
            .contains("pub const BUNDLE_IDENTIFIER: &'static str = \"com.acme.app\";"));
    }

    #[test]
    fn test_render_aborts_without_auxiliary_type() {
        let policy = TrackedPolicy::new(
            GenerationRequest {
                class_name: "TrackedBuildVersion".to_string(),
                new_version_label: "1.0".to_string(),
                bundle_identifier: "com.acme.app".to_string(),
                mode: GenerationMode::Tracked,
            },
            Box::new(NeverReady),
        );
        assert_eq!(policy.render(&ArtifactSnapshot::missing()), None);
    }
}
