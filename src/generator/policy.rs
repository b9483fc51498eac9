//! Generation policy contract.
//!
//! A policy decides whether the artifact must be regenerated and, if so,
//! produces the new artifact text. Exactly two implementations exist:
//! `SimplePolicy` (current label only) and `TrackedPolicy` (append-only
//! history). A policy is constructed with the request for one run and
//! discarded afterwards.

use super::simple::SimplePolicy;
use super::snapshot::ArtifactSnapshot;
use super::template::TemplateProvisioner;
use super::tracked::TrackedPolicy;
use super::types::{GenerationMode, GenerationRequest, RenderedArtifact};

pub trait GenerationPolicy {
    /// True when the previously generated artifact no longer matches the
    /// requested version, including the first run where nothing exists yet.
    fn detect_change(&self, snapshot: &ArtifactSnapshot) -> bool;

    /// Produce the new artifact text and its sidecar state.
    ///
    /// `None` is the sentinel for "nothing to write": a render precondition
    /// failed and was already logged, and the caller must abort the run
    /// without publishing.
    fn render(&self, snapshot: &ArtifactSnapshot) -> Option<RenderedArtifact>;
}

/// Construct the policy for the requested mode.
pub fn policy_for_mode(
    request: GenerationRequest,
    provisioner: Box<dyn TemplateProvisioner>,
) -> Box<dyn GenerationPolicy> {
    match request.mode {
        GenerationMode::Simple => Box::new(SimplePolicy::new(request)),
        GenerationMode::Tracked => Box::new(TrackedPolicy::new(request, provisioner)),
    }
}

/// Append `code` at `indent` levels of four spaces, followed by `newlines`
/// line breaks.
pub(super) fn line(indent: usize, code: &str, newlines: usize) -> String {
    let mut out = String::with_capacity(indent * 4 + code.len() + newlines);
    for _ in 0..indent {
        out.push_str("    ");
    }
    out.push_str(code);
    for _ in 0..newlines {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_indents_and_terminates() {
        assert_eq!(line(0, "pub struct X;", 1), "pub struct X;\n");
        assert_eq!(line(1, "x", 2), "    x\n\n");
        assert_eq!(line(2, "y", 0), "        y");
    }
}
