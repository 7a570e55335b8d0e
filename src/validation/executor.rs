use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Result of one validation run
///
/// Only the exit status decides `succeeded`; output on stderr alone does not
/// make a run fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionOutcome {
    pub succeeded: bool,
    /// Exit code, when the process ran to completion and reported one
    pub exit_code: Option<i32>,
    /// Captured stdout followed by captured stderr
    pub output: String,
    /// Why the run failed, with the captured streams; empty on success
    pub diagnostic: String,
    #[serde(skip)]
    pub duration: Duration,
}

impl ExecutionOutcome {
    pub fn success(output: impl Into<String>, duration: Duration) -> Self {
        Self {
            succeeded: true,
            exit_code: Some(0),
            output: output.into(),
            diagnostic: String::new(),
            duration,
        }
    }

    pub fn failure(
        diagnostic: impl Into<String>,
        exit_code: Option<i32>,
        output: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            succeeded: false,
            exit_code,
            output: output.into(),
            diagnostic: diagnostic.into(),
            duration,
        }
    }
}

/// Capability to run a code string in isolation and report how it ended
///
/// Launch errors, timeouts and non-zero exits are all folded into a failed
/// [`ExecutionOutcome`]; implementations never abort the caller.
#[async_trait]
pub trait CodeExecutor: Send + Sync {
    async fn execute(&self, code: &str) -> ExecutionOutcome;

    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_outcome() {
        let outcome = ExecutionOutcome::success("hello\n", Duration::from_millis(5));
        assert!(outcome.succeeded);
        assert_eq!(outcome.exit_code, Some(0));
        assert!(outcome.diagnostic.is_empty());
    }

    #[test]
    fn test_failure_outcome() {
        let outcome = ExecutionOutcome::failure(
            "exited with status 1",
            Some(1),
            "",
            Duration::from_millis(5),
        );
        assert!(!outcome.succeeded);
        assert_eq!(outcome.exit_code, Some(1));
        assert_eq!(outcome.diagnostic, "exited with status 1");
    }

    #[test]
    fn test_outcome_serializes_without_duration() {
        let outcome = ExecutionOutcome::success("ok", Duration::from_secs(1));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["succeeded"], true);
        assert!(json.get("duration").is_none());
    }
}
