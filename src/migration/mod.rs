//! The migration pipeline
//!
//! A run composes a prompt from the user's code and the two reference
//! documents, asks the completion service for a rewrite, extracts the first
//! fenced code block, executes it, and writes it to disk only if it ran
//! cleanly.

mod error;
mod extract;
mod orchestrator;
mod prompt;
mod request;
mod stage;

pub use error::{DocumentRole, ErrorKind, MigrationError};
pub use extract::{extract_code_block, CodeBlock};
pub use orchestrator::{MigrationOrchestrator, MigrationOutcome};
pub use prompt::compose_prompt;
pub use request::{
    artifact_path_for, DocumentPaths, MigrationRequest, ARTIFACT_PREFIX, DEFAULT_ARTIFACT_NAME,
    DEFAULT_LANGUAGE,
};
pub use stage::MigrationStage;
