//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, error, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started {
                source_bytes,
                artifact_path,
            } => {
                info!(
                    source_bytes,
                    artifact = %artifact_path.display(),
                    "Starting migration"
                );
            }
            ProgressEvent::StageEntered { stage } => {
                debug!(stage = %stage, "Entering stage");
            }
            ProgressEvent::CompletionReceived {
                chars,
                response_time,
            } => {
                info!(
                    chars,
                    response_time_ms = response_time.as_millis() as u64,
                    "Received completion"
                );
            }
            ProgressEvent::CodeExtracted { lines } => {
                debug!(lines, "Extracted code block");
            }
            ProgressEvent::ValidationComplete {
                succeeded,
                execution_time,
            } => {
                if *succeeded {
                    info!(
                        execution_time_ms = execution_time.as_millis() as u64,
                        "Validation run succeeded"
                    );
                } else {
                    warn!(
                        execution_time_ms = execution_time.as_millis() as u64,
                        "Validation run failed"
                    );
                }
            }
            ProgressEvent::ArtifactWritten { path, bytes } => {
                info!(path = %path.display(), bytes, "Artifact written");
            }
            ProgressEvent::Completed {
                artifact_written,
                total_time,
            } => {
                info!(
                    artifact_written,
                    total_time_ms = total_time.as_millis() as u64,
                    "Migration pipeline finished"
                );
            }
            ProgressEvent::Failed { stage, error } => {
                error!(stage = %stage, error = %error, "Migration pipeline failed");
            }
        }
    }
}
