//! Progress handler trait and events

use crate::migration::MigrationStage;
use std::path::PathBuf;
use std::time::Duration;

/// Events emitted while a migration runs
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Pipeline started for a validated request
    Started {
        source_bytes: usize,
        artifact_path: PathBuf,
    },

    /// The pipeline entered a new stage
    StageEntered { stage: MigrationStage },

    /// Completion text received from the service
    CompletionReceived {
        chars: usize,
        response_time: Duration,
    },

    /// A fenced code block was extracted from the completion
    CodeExtracted { lines: usize },

    /// The validation run finished
    ValidationComplete {
        succeeded: bool,
        execution_time: Duration,
    },

    /// The artifact was written to disk
    ArtifactWritten { path: PathBuf, bytes: usize },

    /// The pipeline reached `Done`
    Completed {
        artifact_written: bool,
        total_time: Duration,
    },

    /// The pipeline reached `Failed`
    Failed {
        stage: MigrationStage,
        error: String,
    },
}

/// Trait for handling progress events during a migration
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingHandler {
        count: Arc<AtomicUsize>,
    }

    impl ProgressHandler for CountingHandler {
        fn on_progress(&self, _event: &ProgressEvent) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_noop_handler() {
        let handler = NoOpHandler;
        handler.on_progress(&ProgressEvent::StageEntered {
            stage: MigrationStage::Composing,
        });
    }

    #[test]
    fn test_progress_events() {
        let count = Arc::new(AtomicUsize::new(0));
        let handler = CountingHandler {
            count: count.clone(),
        };

        handler.on_progress(&ProgressEvent::Started {
            source_bytes: 42,
            artifact_path: PathBuf::from("new_code.js"),
        });
        handler.on_progress(&ProgressEvent::CodeExtracted { lines: 3 });
        handler.on_progress(&ProgressEvent::Completed {
            artifact_written: true,
            total_time: Duration::from_secs(5),
        });

        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_event_debug() {
        let event = ProgressEvent::StageEntered {
            stage: MigrationStage::Requesting,
        };
        let debug_str = format!("{:?}", event);
        assert!(debug_str.contains("StageEntered"));
        assert!(debug_str.contains("Requesting"));
    }
}
