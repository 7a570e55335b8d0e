//! Execution validation of migrated code
//!
//! A migrated snippet is only trusted once it has run to a zero exit status.
//! [`CodeExecutor`] is the seam: [`ProcessExecutor`] launches a real runtime,
//! tests substitute scripted executors.

mod executor;
mod process;

pub use executor::{CodeExecutor, ExecutionOutcome};
pub use process::{ProcessExecutor, ScriptRuntime};
