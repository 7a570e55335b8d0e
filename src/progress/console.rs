//! Terminal status lines for interactive runs

use super::{LoggingHandler, ProgressEvent, ProgressHandler};
use crate::migration::MigrationStage;
use std::io::{self, Write};
use std::sync::Mutex;

/// Prints one status line when the request is sent and one when validation
/// starts, and forwards every event to [`LoggingHandler`].
pub struct ConsoleHandler {
    service: String,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleHandler {
    /// Writes status lines to stdout
    pub fn stdout(service: impl Into<String>) -> Self {
        Self::with_writer(service, io::stdout())
    }

    pub fn with_writer(service: impl Into<String>, writer: impl Write + Send + 'static) -> Self {
        Self {
            service: service.into(),
            out: Mutex::new(Box::new(writer)),
        }
    }

    fn status_line(&self, stage: MigrationStage) -> Option<String> {
        match stage {
            MigrationStage::Requesting => Some(format!(
                "\u{1F504} Processing code migration with {}...",
                self.service
            )),
            MigrationStage::Validating => {
                Some("\u{1F9EA} Testing migrated code execution...".to_string())
            }
            _ => None,
        }
    }
}

impl ProgressHandler for ConsoleHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        LoggingHandler.on_progress(event);

        let ProgressEvent::StageEntered { stage } = event else {
            return;
        };
        if let Some(line) = self.status_line(*stage) {
            let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
            let _ = writeln!(out, "{}", line).and_then(|_| out.flush());
        }
    }
}
