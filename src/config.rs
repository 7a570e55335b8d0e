//! Configuration management for apishift
//!
//! Settings are loaded from environment variables with sensible defaults and
//! can be overridden from the command line. The provider credential is read
//! here, once, and handed to the completion client explicitly.
//!
//! # Environment Variables
//!
//! - `APISHIFT_PROVIDER`: Provider (gemini|openai|anthropic|ollama|xai|groq|...)
//!   - default: "gemini"
//! - `APISHIFT_MODEL`: Model name - default: "gemini-2.0-pro-exp-02-05"
//! - `APISHIFT_API_BASE_URL`: Custom API endpoint - default: provider endpoint
//! - `APISHIFT_REQUEST_TIMEOUT`: Completion timeout in seconds - default: "120"
//! - `APISHIFT_GUIDE_PATH`: Migration guide - default: "migrate.md"
//! - `APISHIFT_REFERENCE_PATH`: SDK reference document - default: "sdk.md"
//! - `APISHIFT_RUNTIME`: Program used to run migrated code - default: "node"
//! - `APISHIFT_SCRIPT_EXTENSION`: Extension of the disposable script - default: "js"
//! - `APISHIFT_LANGUAGE`: Code fence language in the prompt - default: derived from the extension
//! - `APISHIFT_EXEC_TIMEOUT`: Validation timeout in seconds - default: "60"
//! - `APISHIFT_LOG_LEVEL`: Logging level - default: "info"
//! - `APISHIFT_LOG_JSON`: JSON log output (true|false) - default: "false"
//!
//! The credential comes from the provider's standard variable, e.g.
//! `GEMINI_API_KEY`, `OPENAI_API_KEY`, `ANTHROPIC_API_KEY`.
//!
//! # Example
//!
//! ```no_run
//! use apishift::ShiftConfig;
//!
//! let config = ShiftConfig::default();
//! config.validate().expect("Invalid configuration");
//!
//! let client = config.create_client().expect("missing credential");
//! let executor = config.create_executor();
//! ```

use crate::llm::{BackendError, GenAIClient, GenAISettings};
use crate::migration::{DocumentPaths, DEFAULT_LANGUAGE};
use crate::util::logging::{parse_level, LoggingConfig};
use crate::validation::{ProcessExecutor, ScriptRuntime};
use genai::adapter::AdapterKind;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PROVIDER: AdapterKind = AdapterKind::Gemini;
const DEFAULT_MODEL: &str = "gemini-2.0-pro-exp-02-05";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
const DEFAULT_EXEC_TIMEOUT_SECS: u64 = 60;
const DEFAULT_GUIDE_PATH: &str = "migrate.md";
const DEFAULT_REFERENCE_PATH: &str = "sdk.md";
const DEFAULT_RUNTIME: &str = "node";
const DEFAULT_SCRIPT_EXTENSION: &str = "js";
const DEFAULT_LOG_LEVEL: &str = "info";
const MAX_TIMEOUT_SECS: u64 = 600;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid provider name
    #[error("Invalid provider: {0}. Valid options: gemini, openai, anthropic, ollama, xai, groq")]
    InvalidProvider(String),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Main configuration structure for apishift
#[derive(Clone)]
pub struct ShiftConfig {
    /// Completion provider
    pub provider: AdapterKind,

    /// Model name (provider-specific)
    pub model: String,

    /// Credential for the provider, read from its standard variable
    pub api_key: Option<String>,

    /// Custom API endpoint
    pub api_base_url: Option<String>,

    /// Completion timeout in seconds
    pub request_timeout_secs: u64,

    /// Migration guide location
    pub guide_path: PathBuf,

    /// SDK reference document location
    pub reference_path: PathBuf,

    /// Program used for validation runs
    pub runtime_program: String,

    /// Arguments passed to the runtime before the script path
    pub runtime_args: Vec<String>,

    /// Extension of the disposable script file
    pub script_extension: String,

    /// Language tag for the code fence in the prompt; derived from the
    /// script extension when unset
    pub language: Option<String>,

    /// Validation timeout in seconds
    pub exec_timeout_secs: u64,

    /// Directory the disposable script is written to and run from
    pub work_dir: PathBuf,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Emit logs as JSON
    pub log_json: bool,
}

impl Default for ShiftConfig {
    /// Loads configuration from `APISHIFT_*` environment variables, falling
    /// back to defaults for anything missing or unparsable.
    fn default() -> Self {
        let provider = env::var("APISHIFT_PROVIDER")
            .ok()
            .and_then(|s| parse_provider(&s).ok())
            .unwrap_or(DEFAULT_PROVIDER);

        let model = env::var("APISHIFT_MODEL")
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let api_base_url = env::var("APISHIFT_API_BASE_URL")
            .ok()
            .filter(|u| !u.trim().is_empty());

        let request_timeout_secs =
            env_u64("APISHIFT_REQUEST_TIMEOUT", DEFAULT_REQUEST_TIMEOUT_SECS);
        let exec_timeout_secs = env_u64("APISHIFT_EXEC_TIMEOUT", DEFAULT_EXEC_TIMEOUT_SECS);

        let guide_path = env::var("APISHIFT_GUIDE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_GUIDE_PATH));
        let reference_path = env::var("APISHIFT_REFERENCE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_REFERENCE_PATH));

        let runtime_program =
            env::var("APISHIFT_RUNTIME").unwrap_or_else(|_| DEFAULT_RUNTIME.to_string());
        let script_extension = env::var("APISHIFT_SCRIPT_EXTENSION")
            .unwrap_or_else(|_| DEFAULT_SCRIPT_EXTENSION.to_string());

        let log_level = env::var("APISHIFT_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();
        let language = env::var("APISHIFT_LANGUAGE")
            .ok()
            .filter(|l| !l.trim().is_empty());

        let log_json = env::var("APISHIFT_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            provider,
            model,
            api_key: credential_for(provider),
            api_base_url,
            request_timeout_secs,
            guide_path,
            reference_path,
            runtime_program,
            runtime_args: Vec::new(),
            script_extension,
            language,
            exec_timeout_secs,
            work_dir: PathBuf::from("."),
            log_level,
            log_json,
        }
    }
}

impl ShiftConfig {
    /// Switches provider and re-reads the matching credential
    pub fn with_provider(mut self, provider: AdapterKind) -> Self {
        self.provider = provider;
        self.api_key = credential_for(provider);
        self
    }

    /// Validates the configuration
    ///
    /// Credential presence is not checked here; it is reported by
    /// [`create_client`](Self::create_client) so that it surfaces as a
    /// configuration error of the pipeline itself.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, secs) in [
            ("Request timeout", self.request_timeout_secs),
            ("Execution timeout", self.exec_timeout_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::ValidationFailed(format!(
                    "{} must be at least 1 second",
                    name
                )));
            }
            if secs > MAX_TIMEOUT_SECS {
                return Err(ConfigError::ValidationFailed(format!(
                    "{} cannot exceed 10 minutes",
                    name
                )));
            }
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Model name cannot be empty".to_string(),
            ));
        }

        if self.runtime_program.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Runtime program cannot be empty".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn genai_settings(&self) -> GenAISettings {
        GenAISettings {
            provider: self.provider,
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            base_url: self.api_base_url.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    /// Creates the completion client.
    ///
    /// # Errors
    ///
    /// [`BackendError::ConfigurationError`] when the provider needs a
    /// credential and none is configured.
    pub fn create_client(&self) -> Result<GenAIClient, BackendError> {
        GenAIClient::new(self.genai_settings())
    }

    pub fn script_runtime(&self) -> ScriptRuntime {
        ScriptRuntime::new(&self.runtime_program, &self.script_extension)
            .with_args(self.runtime_args.clone())
    }

    pub fn create_executor(&self) -> ProcessExecutor {
        ProcessExecutor::new(
            self.script_runtime(),
            self.work_dir.clone(),
            Duration::from_secs(self.exec_timeout_secs),
        )
    }

    /// Language the user's code is labeled with in the prompt
    pub fn prompt_language(&self) -> String {
        match &self.language {
            Some(language) => language.trim().to_string(),
            None => language_for_extension(&self.script_extension).to_string(),
        }
    }

    /// Logging setup for the configured level and format
    pub fn logging_config(&self) -> LoggingConfig {
        let level = parse_level(&self.log_level);
        if self.log_json {
            LoggingConfig {
                level,
                ..LoggingConfig::production()
            }
        } else {
            LoggingConfig::with_level(level)
        }
    }

    pub fn documents(&self) -> DocumentPaths {
        DocumentPaths::new(&self.guide_path, &self.reference_path)
    }
}

impl fmt::Debug for ShiftConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShiftConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("guide_path", &self.guide_path)
            .field("reference_path", &self.reference_path)
            .field("runtime_program", &self.runtime_program)
            .field("runtime_args", &self.runtime_args)
            .field("script_extension", &self.script_extension)
            .field("language", &self.language)
            .field("exec_timeout_secs", &self.exec_timeout_secs)
            .field("work_dir", &self.work_dir)
            .field("log_level", &self.log_level)
            .field("log_json", &self.log_json)
            .finish()
    }
}

/// Parses a provider name as accepted by `genai` (case-insensitive)
pub fn parse_provider(s: &str) -> Result<AdapterKind, ConfigError> {
    AdapterKind::from_lower_str(&s.trim().to_lowercase())
        .ok_or_else(|| ConfigError::InvalidProvider(s.to_string()))
}

fn credential_for(provider: AdapterKind) -> Option<String> {
    provider
        .default_key_env_name()
        .and_then(|name| env::var(name).ok())
        .filter(|key| !key.trim().is_empty())
}

fn language_for_extension(extension: &str) -> &str {
    match extension.trim().trim_start_matches('.') {
        "" | "js" | "mjs" | "cjs" => DEFAULT_LANGUAGE,
        "ts" | "mts" => "typescript",
        "py" => "python",
        "rb" => "ruby",
        "rs" => "rust",
        "kt" | "kts" => "kotlin",
        "sh" => "bash",
        other => other,
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}
