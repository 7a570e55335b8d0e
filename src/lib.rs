//! apishift - LLM-driven code migration with execution-based validation
//!
//! This library rewrites a code snippet from one API surface to another by
//! asking a completion service, guided by a migration document and an SDK
//! reference. The rewrite is executed before it is kept: only code that exits
//! cleanly is written to disk.
//!
//! # Core Concepts
//!
//! - **Completion client**: a pluggable [`LLMClient`] that turns one prompt
//!   into one completion, with a `genai`-backed implementation for real
//!   providers and a scripted mock for tests
//! - **Extraction**: the first fenced code block of the completion is the
//!   candidate rewrite; anything else in the reply is ignored
//! - **Validation**: a [`CodeExecutor`] runs the candidate in a disposable
//!   file and reports success strictly by exit status
//! - **Orchestration**: [`MigrationOrchestrator`] sequences the stages and
//!   separates fatal pipeline errors from a reported validation failure
//!
//! # Example Usage
//!
//! ```ignore
//! use apishift::{MigrationOrchestrator, ShiftConfig};
//! use std::sync::Arc;
//!
//! async fn migrate(code: &str) -> anyhow::Result<()> {
//!     let config = ShiftConfig::default();
//!     config.validate()?;
//!
//!     let orchestrator = MigrationOrchestrator::new(
//!         Arc::new(config.create_client()?),
//!         Arc::new(config.create_executor()),
//!     );
//!     let outcome = orchestrator
//!         .migrate(code, &config.documents(), "new_code.js")
//!         .await?;
//!
//!     if !outcome.is_persisted() {
//!         eprintln!("{}", outcome.execution().diagnostic);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`llm`]: completion clients
//! - [`migration`]: request loading, prompt composition, extraction, orchestration
//! - [`validation`]: isolated execution of candidate code
//! - [`progress`]: stage events for logging or other observers
//! - [`cli`]: the `apishift` command line

pub mod cli;
pub mod config;
pub mod llm;
pub mod migration;
pub mod progress;
pub mod util;
pub mod validation;

pub use config::{ConfigError, ShiftConfig};
pub use llm::{BackendError, GenAIClient, LLMClient, MockLLMClient};
pub use migration::{
    ErrorKind, MigrationError, MigrationOrchestrator, MigrationOutcome, MigrationRequest,
    MigrationStage,
};
pub use progress::{ConsoleHandler, LoggingHandler, ProgressEvent, ProgressHandler};
pub use util::{init_logging, LoggingConfig};
pub use validation::{CodeExecutor, ExecutionOutcome, ProcessExecutor, ScriptRuntime};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_apishift() {
        assert_eq!(NAME, "apishift");
    }
}
