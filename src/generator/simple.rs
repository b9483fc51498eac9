//! History-free generation policy.

use super::policy::{line, GenerationPolicy};
use super::snapshot::{ArtifactSnapshot, SidecarState};
use super::types::{GenerationRequest, RenderedArtifact};

/// Regenerates on any label mismatch and keeps no history. Both operations
/// are O(1) and the emitted text depends only on the request.
pub struct SimplePolicy {
    request: GenerationRequest,
}

impl SimplePolicy {
    pub fn new(request: GenerationRequest) -> Self {
        Self { request }
    }
}

impl GenerationPolicy for SimplePolicy {
    fn detect_change(&self, snapshot: &ArtifactSnapshot) -> bool {
        match &snapshot.current_label {
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
        }
    }

    fn render(&self, _snapshot: &ArtifactSnapshot) -> Option<RenderedArtifact> {
        let mut code = String::new();
        code.push_str(&line(0, "// GENERATED CODE.", 1));
        code.push_str(&line(
            0,
            &format!("pub struct {};", self.request.class_name),
            2,
        ));
        code.push_str(&line(0, &format!("impl {} {{", self.request.class_name), 1));
        code.push_str(&line(
            1,
            &format!(
                "pub const BUNDLE_IDENTIFIER: &'static str = \"{}\";",
                self.request.bundle_identifier
            ),
            1,
        ));
        code.push_str(&line(
            1,
            &format!(
                "pub const VERSION: &'static str = \"{}\";",
                self.request.new_version_label
            ),
            1,
        ));
        code.push_str(&line(0, "}", 1));

        Some(RenderedArtifact {
            code,
            state: SidecarState {
                version: self.request.new_version_label.clone(),
                bundle_identifier: self.request.bundle_identifier.clone(),
                history: Vec::new(),
            },
        })
    }
}
