use clap::{Parser, ValueEnum};
use genai::adapter::AdapterKind;
use std::path::PathBuf;

use crate::config::{parse_provider, ShiftConfig};
use crate::migration::artifact_path_for;

/// LLM-driven code migration: reads code on stdin, writes the migrated file
#[derive(Parser, Debug)]
#[command(
    name = "apishift",
    about = "Migrate code to a new SDK using an LLM and keep the result only if it runs",
    version,
    author,
    long_about = "apishift reads source code from stdin, asks a completion service to rewrite it \
                  according to a migration guide and an SDK reference, runs the rewritten code, \
                  and writes it to disk only if it exits cleanly.\n\n\
                  Examples:\n  \
                  cat old.js | apishift\n  \
                  cat app.js | apishift app.js\n  \
                  cat old.py | apishift --runtime python3 --extension py -o migrated.py\n  \
                  cat old.js | apishift --provider openai --model gpt-4o --format json"
)]
pub struct CliArgs {
    #[arg(
        value_name = "NAME",
        help = "Original file name; the artifact is written as new_<NAME> (default: new_code.js)"
    )]
    pub name: Option<String>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write the migrated code to this exact path (overrides NAME)"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Migration guide document")]
    pub guide: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "SDK reference document")]
    pub reference: Option<PathBuf>,

    #[arg(
        short = 'p',
        long,
        value_parser = parse_provider,
        help = "Completion provider (gemini, openai, anthropic, ollama, groq, xai, ...)"
    )]
    pub provider: Option<AdapterKind>,

    #[arg(
        short = 'm',
        long,
        value_name = "MODEL",
        help = "Model name (provider-specific)"
    )]
    pub model: Option<String>,

    #[arg(long, value_name = "SECONDS", help = "Completion request timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(long, value_name = "PROGRAM", help = "Interpreter used to validate the result")]
    pub runtime: Option<String>,

    #[arg(
        long = "runtime-arg",
        value_name = "ARG",
        allow_hyphen_values = true,
        help = "Extra argument passed to the interpreter before the script (repeatable)"
    )]
    pub runtime_args: Vec<String>,

    #[arg(long, value_name = "EXT", help = "File extension of the temporary script")]
    pub extension: Option<String>,

    #[arg(
        long,
        value_name = "LANG",
        help = "Language tag for the code in the prompt (default: derived from --extension)"
    )]
    pub language: Option<String>,

    #[arg(long, value_name = "SECONDS", help = "Validation run timeout in seconds")]
    pub exec_timeout: Option<u64>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Report format"
    )]
    pub format: OutputFormatArg,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Verbose logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

impl CliArgs {
    /// Path the migrated code is written to
    pub fn artifact_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => artifact_path_for(self.name.as_deref()),
        }
    }

    /// Applies command-line overrides on top of an environment-derived config
    pub fn apply_to(&self, base: ShiftConfig) -> ShiftConfig {
        let mut config = match self.provider {
            Some(provider) => base.with_provider(provider),
            None => base,
        };

        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_secs = timeout;
        }
        if let Some(guide) = &self.guide {
            config.guide_path = guide.clone();
        }
        if let Some(reference) = &self.reference {
            config.reference_path = reference.clone();
        }
        if let Some(runtime) = &self.runtime {
            config.runtime_program = runtime.clone();
        }
        if !self.runtime_args.is_empty() {
            config.runtime_args = self.runtime_args.clone();
        }
        if let Some(extension) = &self.extension {
            config.script_extension = extension.clone();
        }
        if let Some(language) = &self.language {
            config.language = Some(language.clone());
        }
        if let Some(exec_timeout) = self.exec_timeout {
            config.exec_timeout_secs = exec_timeout;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.to_lowercase();
        } else if self.verbose {
            config.log_level = "debug".to_string();
        } else if self.quiet {
            config.log_level = "error".to_string();
        }

        config
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
