//! Value types shared across the generation engine.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::snapshot::SidecarState;

/// One recorded version: the externally supplied label plus the zero-based
/// position at which that label was first seen. History is append-only, so
/// an index never changes once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub label: String,
    pub index: usize,
}

impl VersionInfo {
    pub fn new(label: impl Into<String>, index: usize) -> Self {
        Self {
            label: label.into(),
            index,
        }
    }
}

/// Which generation policy drives a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenerationMode {
    /// Keep only the current version label.
    Simple,
    /// Keep the full append-only version history.
    Tracked,
}

impl GenerationMode {
    /// Default artifact class name when none is configured.
    pub fn default_class_name(self) -> &'static str {
        match self {
            GenerationMode::Simple => "CurrentBuildVersion",
            GenerationMode::Tracked => "TrackedBuildVersion",
        }
    }
}

/// Immutable description of one generation run.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub class_name: String,
    pub new_version_label: String,
    pub bundle_identifier: String,
    pub mode: GenerationMode,
}

/// Output of a successful render: the artifact source text plus the sidecar
/// state the publisher persists for the next run to read back.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedArtifact {
    pub code: String,
    pub state: SidecarState,
}

/// Outcome of one driver run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub written: bool,
    pub text: Option<String>,
}

impl RunResult {
    pub fn unchanged() -> Self {
        Self {
            written: false,
            text: None,
        }
    }
}
