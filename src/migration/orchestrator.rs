use super::error::MigrationError;
use super::extract::extract_code_block;
use super::prompt::compose_prompt;
use super::request::{DocumentPaths, MigrationRequest, DEFAULT_LANGUAGE};
use super::stage::MigrationStage;
use crate::llm::{CompletionRequest, LLMClient};
use crate::progress::{NoOpHandler, ProgressEvent, ProgressHandler};
use crate::validation::{CodeExecutor, ExecutionOutcome};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

const PREVIEW_CHARS: usize = 200;

/// How a run that reached `Done` ended
#[derive(Debug, Clone)]
pub enum MigrationOutcome {
    /// Validation passed and the artifact was written
    Migrated {
        artifact: PathBuf,
        code: String,
        execution: ExecutionOutcome,
    },
    /// Validation failed; nothing was written
    ValidationFailed {
        code: String,
        execution: ExecutionOutcome,
    },
}

impl MigrationOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, MigrationOutcome::Migrated { .. })
    }

    pub fn code(&self) -> &str {
        match self {
            MigrationOutcome::Migrated { code, .. }
            | MigrationOutcome::ValidationFailed { code, .. } => code,
        }
    }

    pub fn execution(&self) -> &ExecutionOutcome {
        match self {
            MigrationOutcome::Migrated { execution, .. }
            | MigrationOutcome::ValidationFailed { execution, .. } => execution,
        }
    }

    pub fn artifact(&self) -> Option<&Path> {
        match self {
            MigrationOutcome::Migrated { artifact, .. } => Some(artifact),
            MigrationOutcome::ValidationFailed { .. } => None,
        }
    }
}

/// Drives one migration through every stage, in order, exactly once
///
/// Nothing is retried: a failed completion or extraction ends the run.
pub struct MigrationOrchestrator {
    client: Arc<dyn LLMClient>,
    executor: Arc<dyn CodeExecutor>,
    progress: Arc<dyn ProgressHandler>,
    language: String,
}

impl MigrationOrchestrator {
    pub fn new(client: Arc<dyn LLMClient>, executor: Arc<dyn CodeExecutor>) -> Self {
        Self {
            client,
            executor,
            progress: Arc::new(NoOpHandler),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Sets the language tag the user's code is fenced with in the prompt
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressHandler>) -> Self {
        self.progress = progress;
        self
    }

    /// Runs the full pipeline starting from raw input.
    pub async fn migrate(
        &self,
        source_code: &str,
        documents: &DocumentPaths,
        artifact_path: impl Into<PathBuf>,
    ) -> Result<MigrationOutcome, MigrationError> {
        self.enter(MigrationStage::ReadingInput);
        let request = match MigrationRequest::load(source_code, documents, artifact_path) {
            Ok(request) => request.with_language(self.language.as_str()),
            Err(e) => return Err(self.fail(MigrationStage::ReadingInput, e)),
        };

        self.run(&request).await
    }

    /// Runs the pipeline for an already validated request.
    pub async fn run(
        &self,
        request: &MigrationRequest,
    ) -> Result<MigrationOutcome, MigrationError> {
        let start = Instant::now();
        info!(
            "Migrating {} bytes of code with {}",
            request.source_code().len(),
            self.client.name()
        );
        self.progress.on_progress(&ProgressEvent::Started {
            source_bytes: request.source_code().len(),
            artifact_path: request.artifact_path().to_path_buf(),
        });

        let mut stage = MigrationStage::Composing;
        match self.run_stages(request, &mut stage).await {
            Ok(outcome) => {
                self.enter(MigrationStage::Done);
                self.progress.on_progress(&ProgressEvent::Completed {
                    artifact_written: outcome.is_persisted(),
                    total_time: start.elapsed(),
                });
                Ok(outcome)
            }
            Err(e) => Err(self.fail(stage, e)),
        }
    }

    async fn run_stages(
        &self,
        request: &MigrationRequest,
        stage: &mut MigrationStage,
    ) -> Result<MigrationOutcome, MigrationError> {
        *stage = MigrationStage::Composing;
        self.enter(*stage);
        let prompt = compose_prompt(request);
        debug!("Composed prompt ({} chars)", prompt.len());

        *stage = MigrationStage::Requesting;
        self.enter(*stage);
        let response = self.client.complete(CompletionRequest::new(prompt)).await?;
        self.progress.on_progress(&ProgressEvent::CompletionReceived {
            chars: response.content.len(),
            response_time: response.response_time,
        });

        *stage = MigrationStage::Extracting;
        self.enter(*stage);
        let block =
            extract_code_block(&response.content).ok_or_else(|| MigrationError::Extraction {
                preview: preview(&response.content),
            })?;
        self.progress.on_progress(&ProgressEvent::CodeExtracted {
            lines: block.line_count(),
        });
        if let Some(language) = &block.language {
            debug!("Extracted block tagged `{}`", language);
        }

        *stage = MigrationStage::Validating;
        self.enter(*stage);
        let execution = self.executor.execute(&block.code).await;
        self.progress.on_progress(&ProgressEvent::ValidationComplete {
            succeeded: execution.succeeded,
            execution_time: execution.duration,
        });

        *stage = MigrationStage::Persisting;
        self.enter(*stage);
        if !execution.succeeded {
            info!("Validation failed, no artifact written");
            return Ok(MigrationOutcome::ValidationFailed {
                code: block.code,
                execution,
            });
        }

        let artifact = request.artifact_path().to_path_buf();
        tokio::fs::write(&artifact, block.code.as_bytes())
            .await
            .map_err(|source| MigrationError::Persist {
                path: artifact.clone(),
                source,
            })?;
        self.progress.on_progress(&ProgressEvent::ArtifactWritten {
            path: artifact.clone(),
            bytes: block.code.len(),
        });

        Ok(MigrationOutcome::Migrated {
            artifact,
            code: block.code,
            execution,
        })
    }

    fn enter(&self, stage: MigrationStage) {
        self.progress
            .on_progress(&ProgressEvent::StageEntered { stage });
    }

    fn fail(&self, stage: MigrationStage, error: MigrationError) -> MigrationError {
        self.progress.on_progress(&ProgressEvent::Failed {
            stage,
            error: error.to_string(),
        });
        error
    }
}

fn preview(text: &str) -> String {
    let trimmed = text.trim();
    let mut preview: String = trimmed.chars().take(PREVIEW_CHARS).collect();
    if trimmed.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}
