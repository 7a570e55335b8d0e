//! Migration pipeline errors
//!
//! Every variant here is fatal for the run and maps to a non-zero exit code.
//! A migrated snippet that runs but fails is not an error; see
//! [`MigrationOutcome::ValidationFailed`](super::MigrationOutcome).

use crate::llm::BackendError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Which reference document a failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    Guide,
    Reference,
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentRole::Guide => write!(f, "migration guide"),
            DocumentRole::Reference => write!(f, "reference"),
        }
    }
}

/// Class of a fatal failure, i.e. the `Failed(kind)` terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Configuration,
    Service,
    Extraction,
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Input => "InputError",
            ErrorKind::Configuration => "ConfigurationError",
            ErrorKind::Service => "ServiceError",
            ErrorKind::Extraction => "ExtractionError",
            ErrorKind::Io => "IoError",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Error)]
pub enum MigrationError {
    /// Nothing (or only whitespace) arrived on standard input
    #[error("No code provided on standard input")]
    EmptyInput,

    /// A reference document could not be read
    #[error("Cannot read {role} document {}: {source}", .path.display())]
    DocumentUnavailable {
        role: DocumentRole,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Missing credential or invalid settings
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The completion request failed or returned unusable content
    #[error("Completion request failed: {0}")]
    Service(#[source] BackendError),

    /// The completion contained no fenced code block
    #[error("No fenced code block found in the completion")]
    Extraction { preview: String },

    /// The validated artifact could not be written
    #[error("Failed to write migrated code to {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<BackendError> for MigrationError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::ConfigurationError { message } => MigrationError::Configuration(message),
            other => MigrationError::Service(other),
        }
    }
}

impl MigrationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MigrationError::EmptyInput => ErrorKind::Input,
            MigrationError::DocumentUnavailable { .. } | MigrationError::Configuration(_) => {
                ErrorKind::Configuration
            }
            MigrationError::Service(_) => ErrorKind::Service,
            MigrationError::Extraction { .. } => ErrorKind::Extraction,
            MigrationError::Persist { .. } => ErrorKind::Io,
        }
    }

    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Returns a user-friendly error message with troubleshooting hints
    pub fn help_message(&self) -> String {
        match self {
            MigrationError::EmptyInput => "Error: No code provided\n\n\
                 Help: Pipe the code to migrate into this command:\n  \
                 cat yourfile.js | apishift [outputname]"
                .to_string(),
            MigrationError::DocumentUnavailable { role, path, source } => {
                format!(
                    "Error: Cannot read the {} document\nPath: {}\n\n\
                     Help: Make sure the file exists, or point to it with \
                     --guide / --reference.\n\n\
                     Details: {}",
                    role,
                    path.display(),
                    source
                )
            }
            MigrationError::Configuration(message) => {
                format!(
                    "Error: Configuration error\n\n\
                     Help: Set the API key for the selected provider before running, e.g.\n  \
                     export GEMINI_API_KEY=your_api_key\n\n\
                     Details: {}",
                    message
                )
            }
            MigrationError::Service(backend_err) => match backend_err {
                BackendError::TimeoutError { seconds } => {
                    format!(
                        "Error: Request timeout after {} seconds\n\n\
                         Help: The completion took too long. Try:\n\
                         - Increase timeout: --timeout {}\n\
                         - Check network connectivity",
                        seconds,
                        seconds * 2
                    )
                }
                BackendError::InvalidResponse { message } => {
                    format!(
                        "Error: Invalid response from the completion service\n\n\
                         Help: Rerun the migration or try a different model.\n\n\
                         Details: {}",
                        message
                    )
                }
                _ => {
                    format!(
                        "Error: Completion request failed\n\n\
                         Help: Check the provider status and your network, then rerun.\n\n\
                         Details: {}",
                        backend_err
                    )
                }
            },
            MigrationError::Extraction { preview } => {
                format!(
                    "Error: Failed to extract migrated code from the response\n\n\
                     Help: The model did not return a fenced code block. Nothing was \
                     written; rerun the migration.\n\n\
                     Response began with: {}",
                    preview
                )
            }
            MigrationError::Persist { path, source } => {
                format!(
                    "Error: Could not save the migrated code\nPath: {}\n\n\
                     Details: {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(MigrationError::EmptyInput.kind(), ErrorKind::Input);
        assert_eq!(
            MigrationError::Configuration("x".into()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            MigrationError::DocumentUnavailable {
                role: DocumentRole::Guide,
                path: PathBuf::from("migrate.md"),
                source: io::Error::from(io::ErrorKind::NotFound),
            }
            .kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            MigrationError::Extraction {
                preview: String::new()
            }
            .kind(),
            ErrorKind::Extraction
        );
    }

    #[test]
    fn test_backend_configuration_maps_to_configuration() {
        let err: MigrationError = BackendError::ConfigurationError {
            message: "GEMINI_API_KEY environment variable is not set".into(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.help_message().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_backend_failures_map_to_service() {
        let err: MigrationError = BackendError::TimeoutError { seconds: 30 }.into();
        assert_eq!(err.kind(), ErrorKind::Service);
        assert!(err.help_message().contains("--timeout 60"));
    }

    #[test]
    fn test_help_messages_are_distinct() {
        let errors = vec![
            MigrationError::EmptyInput,
            MigrationError::Configuration("missing".into()),
            MigrationError::Service(BackendError::ApiError {
                message: "down".into(),
            }),
            MigrationError::Extraction {
                preview: "no code".into(),
            },
        ];
        let messages: Vec<String> = errors.iter().map(|e| e.help_message()).collect();
        for (i, a) in messages.iter().enumerate() {
            for b in messages.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_exit_code_is_non_zero() {
        assert_ne!(MigrationError::EmptyInput.exit_code(), 0);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::Extraction.to_string(), "ExtractionError");
        assert_eq!(DocumentRole::Reference.to_string(), "reference");
    }
}
