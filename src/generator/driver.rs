//! One-pass generation orchestration.
//!
//! The driver never touches the filesystem itself; reading, rendering and
//! publishing all happen behind trait objects, which keeps the whole pass
//! testable in memory.

use super::error::GeneratorResult;
use super::policy::GenerationPolicy;
use super::publisher::ArtifactPublisher;
use super::reader::ArtifactReader;
use super::types::RunResult;

pub struct GenerationDriver {
    class_name: String,
    reader: Box<dyn ArtifactReader>,
    policy: Box<dyn GenerationPolicy>,
    publisher: Box<dyn ArtifactPublisher>,
}

impl GenerationDriver {
    pub fn new(
        class_name: impl Into<String>,
        reader: Box<dyn ArtifactReader>,
        policy: Box<dyn GenerationPolicy>,
        publisher: Box<dyn ArtifactPublisher>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            reader,
            policy,
            publisher,
        }
    }

    /// One run: read the previous state, ask the policy whether regeneration
    /// is needed, render and publish. An empty render aborts the run without
    /// writing; publish failures propagate.
    pub fn run(&self) -> GeneratorResult<RunResult> {
        let snapshot = self.reader.read(&self.class_name);

        if !self.policy.detect_change(&snapshot) {
            log::debug!("\"{}\" is up to date", self.class_name);
            return Ok(RunResult::unchanged());
        }

        let rendered = match self.policy.render(&snapshot) {
            Some(rendered) => rendered,
            None => {
                log::info!("Code generation stopped, no code to write");
                return Ok(RunResult::unchanged());
            }
        };

        self.publisher.publish(&self.class_name, &rendered)?;
        Ok(RunResult {
            written: true,
            text: Some(rendered.code),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::error::GeneratorError;
    use crate::generator::snapshot::{ArtifactSnapshot, SidecarState};
    use crate::generator::types::RenderedArtifact;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct StubReader {
        snapshot: ArtifactSnapshot,
    }

    impl ArtifactReader for StubReader {
        fn read(&self, _class_name: &str) -> ArtifactSnapshot {
            self.snapshot.clone()
        }
    }

    struct StubPolicy {
        change: bool,
        rendered: Option<RenderedArtifact>,
    }

    impl GenerationPolicy for StubPolicy {
        fn detect_change(&self, _snapshot: &ArtifactSnapshot) -> bool {
            self.change
        }

        fn render(&self, _snapshot: &ArtifactSnapshot) -> Option<RenderedArtifact> {
            self.rendered.clone()
        }
    }

    struct CountingPublisher {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl ArtifactPublisher for CountingPublisher {
        fn publish(&self, _class_name: &str, _rendered: &RenderedArtifact) -> GeneratorResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(GeneratorError::TargetNotADirectory {
                    path: "/tmp/blocked".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn rendered() -> RenderedArtifact {
        RenderedArtifact {
            code: "// GENERATED CODE.\n".to_string(),
            state: SidecarState {
                version: "1.0".to_string(),
                bundle_identifier: "com.acme.app".to_string(),
                history: Vec::new(),
            },
        }
    }

    fn driver(
        change: bool,
        render_result: Option<RenderedArtifact>,
        fail_publish: bool,
    ) -> (GenerationDriver, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let driver = GenerationDriver::new(
            "BuildInfo",
            Box::new(StubReader {
                snapshot: ArtifactSnapshot::missing(),
            }),
            Box::new(StubPolicy {
                change,
                rendered: render_result,
            }),
            Box::new(CountingPublisher {
                calls: calls.clone(),
                fail: fail_publish,
            }),
        );
        (driver, calls)
    }

    #[test]
    fn test_no_change_skips_render_and_publish() {
        let (driver, calls) = driver(false, Some(rendered()), false);
        let result = driver.run().unwrap();
        assert!(!result.written);
        assert_eq!(result.text, None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_render_aborts_without_writing() {
        let (driver, calls) = driver(true, None, false);
        let result = driver.run().unwrap();
        assert!(!result.written);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_change_publishes_and_reports_text() {
        let (driver, calls) = driver(true, Some(rendered()), false);
        let result = driver.run().unwrap();
        assert!(result.written);
        assert_eq!(result.text, Some("// GENERATED CODE.\n".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_publish_failure_propagates() {
        let (driver, _calls) = driver(true, Some(rendered()), true);
        let err = driver.run().unwrap_err();
        assert!(matches!(err, GeneratorError::TargetNotADirectory { .. }));
    }
}
