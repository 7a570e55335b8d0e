//! The `apishift` command: wires configuration, client, executor and report
//! together and maps the result to a process exit code.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::commands::{CliArgs, OutputFormatArg};
use super::output::{MigrationReport, OutputFormatter};
use crate::config::ShiftConfig;
use crate::llm::LLMClient;
use crate::migration::{MigrationError, MigrationOrchestrator};
use crate::progress::{ConsoleHandler, LoggingHandler, ProgressHandler};

/// Runs one migration of `source_code` with `config`, which already carries
/// the command-line overrides from `args`.
///
/// Returns 0 when the pipeline reached `Done`, including when the migrated
/// code failed validation, and 1 on any fatal error.
pub async fn handle_migrate(args: &CliArgs, config: &ShiftConfig, source_code: &str) -> i32 {
    debug!("Configuration: {:?}", config);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        eprintln!("Error: {}", e);
        eprintln!("\nPlease check your environment variables and command-line arguments.");
        return 1;
    }

    let client = match config.create_client() {
        Ok(client) => Arc::new(client) as Arc<dyn LLMClient>,
        Err(e) => return report_error(MigrationError::from(e)),
    };
    info!(
        "Using {} ({})",
        client.name(),
        client.model_info().unwrap_or_default()
    );

    run_with_client(args, config, client, source_code).await
}

/// Same as [`handle_migrate`] with an already validated config and client.
pub async fn run_with_client(
    args: &CliArgs,
    config: &ShiftConfig,
    client: Arc<dyn LLMClient>,
    source_code: &str,
) -> i32 {
    let show_status = args.format == OutputFormatArg::Human && !args.quiet;
    let progress: Arc<dyn ProgressHandler> = if show_status {
        Arc::new(ConsoleHandler::stdout(client.name()))
    } else {
        Arc::new(LoggingHandler)
    };
    let executor = Arc::new(config.create_executor());
    let orchestrator = MigrationOrchestrator::new(client, executor)
        .with_progress(progress)
        .with_language(config.prompt_language());

    let artifact = args.artifact_path();
    let outcome = match orchestrator
        .migrate(source_code, &config.documents(), artifact.clone())
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => return report_error(e),
    };

    if !outcome.is_persisted() {
        warn!(
            "Migrated code failed validation: {}",
            outcome.execution().diagnostic.lines().next().unwrap_or("")
        );
    }

    let report = MigrationReport::from_outcome(&outcome, &artifact);
    match OutputFormatter::new(args.format.into()).format(&report) {
        Ok(text) => {
            print!("{}", text);
            0
        }
        Err(e) => {
            error!("Failed to format report: {}", e);
            1
        }
    }
}

fn report_error(err: MigrationError) -> i32 {
    error!(kind = %err.kind(), "{}", err);
    eprintln!("\n{}", err.help_message());
    err.exit_code()
}
