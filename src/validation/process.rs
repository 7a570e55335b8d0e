//! Subprocess-backed execution validator
//!
//! The candidate code is written to `temp_<uuid>.<ext>` in the working
//! directory and run with the configured runtime (`node` by default). The
//! file is removed when the run ends, whatever the result.

use super::executor::{CodeExecutor, ExecutionOutcome};
use async_trait::async_trait;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

const TEMP_PREFIX: &str = "temp_";
const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// Program used to run a migrated snippet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRuntime {
    /// Executable name or path
    pub program: String,
    /// Arguments placed before the script path
    pub args: Vec<String>,
    /// Extension of the disposable script file, without the dot
    pub extension: String,
}

impl ScriptRuntime {
    pub fn new(program: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            extension: extension.into(),
        }
    }

    /// Node.js running a `.js` file
    pub fn node() -> Self {
        Self::new("node", "js")
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }
}

impl Default for ScriptRuntime {
    fn default() -> Self {
        Self::node()
    }
}

/// Disposable script file, removed on drop
struct ScriptFile {
    path: PathBuf,
}

impl ScriptFile {
    /// Creates the file, refusing to overwrite an existing one
    fn create(path: PathBuf, code: &str) -> io::Result<Self> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;
        let script = Self { path };
        file.write_all(code.as_bytes())?;
        file.flush()?;
        Ok(script)
    }

    fn file_name(&self) -> &Path {
        self.path
            .file_name()
            .map(Path::new)
            .unwrap_or(self.path.as_path())
    }
}

impl Drop for ScriptFile {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove {}: {}", self.path.display(), e),
        }
    }
}

/// Runs snippets as standalone programs in a child process
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    runtime: ScriptRuntime,
    work_dir: PathBuf,
    timeout: Duration,
}

impl ProcessExecutor {
    pub fn new(runtime: ScriptRuntime, work_dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            runtime,
            work_dir: work_dir.into(),
            timeout,
        }
    }

    pub fn runtime(&self) -> &ScriptRuntime {
        &self.runtime
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    fn script_path(&self) -> PathBuf {
        let extension = self.runtime.extension.trim_start_matches('.');
        let name = if extension.is_empty() {
            format!("{}{}", TEMP_PREFIX, Uuid::new_v4())
        } else {
            format!("{}{}.{}", TEMP_PREFIX, Uuid::new_v4(), extension)
        };
        self.work_dir.join(name)
    }
}

#[async_trait]
impl CodeExecutor for ProcessExecutor {
    async fn execute(&self, code: &str) -> ExecutionOutcome {
        let start = Instant::now();

        let script = match ScriptFile::create(self.script_path(), code) {
            Ok(script) => script,
            Err(e) => {
                return ExecutionOutcome::failure(
                    format!("could not write temporary script: {}", e),
                    None,
                    "",
                    start.elapsed(),
                );
            }
        };
        debug!(
            "Running {} {:?} {}",
            self.runtime.program,
            self.runtime.args,
            script.path.display()
        );

        let child = Command::new(&self.runtime.program)
            .args(&self.runtime.args)
            .arg(script.file_name())
            .current_dir(&self.work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let mut child = match child {
            Ok(child) => child,
            Err(e) => {
                return ExecutionOutcome::failure(
                    format!("failed to launch `{}`: {}", self.runtime.program, e),
                    None,
                    "",
                    start.elapsed(),
                );
            }
        };

        let stdout_reader = StreamCollector::spawn(child.stdout.take());
        let stderr_reader = StreamCollector::spawn(child.stderr.take());

        let waited = tokio::time::timeout(self.timeout, child.wait()).await;
        let status = match waited {
            Ok(Ok(status)) => Some(status),
            Ok(Err(e)) => {
                let _ = child.kill().await;
                let stdout = stdout_reader.finish().await;
                let stderr = stderr_reader.finish().await;
                return ExecutionOutcome::failure(
                    format_diagnostic(
                        &format!("failed waiting for `{}`: {}", self.runtime.program, e),
                        &stdout,
                        &stderr,
                    ),
                    None,
                    format!("{}{}", stdout, stderr),
                    start.elapsed(),
                );
            }
            Err(_) => {
                warn!("`{}` exceeded {:?}, killing it", self.runtime.program, self.timeout);
                if let Err(e) = child.kill().await {
                    warn!("Failed to kill `{}`: {}", self.runtime.program, e);
                }
                None
            }
        };

        let stdout = stdout_reader.finish().await;
        let stderr = stderr_reader.finish().await;
        let combined = format!("{}{}", stdout, stderr);

        let Some(status) = status else {
            let cause = format!("timed out after {} seconds", self.timeout.as_secs_f64());
            return ExecutionOutcome::failure(
                format_diagnostic(&cause, &stdout, &stderr),
                None,
                combined,
                start.elapsed(),
            );
        };

        if status.success() {
            return ExecutionOutcome::success(combined, start.elapsed());
        }

        let cause = match status.code() {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        };

        ExecutionOutcome::failure(
            format_diagnostic(&cause, &stdout, &stderr),
            status.code(),
            combined,
            start.elapsed(),
        )
    }

    fn name(&self) -> &str {
        &self.runtime.program
    }
}

/// Drains one child stream into a buffer that stays readable if the drain is
/// cut short
struct StreamCollector {
    buffer: Arc<Mutex<Vec<u8>>>,
    task: JoinHandle<()>,
}

impl StreamCollector {
    fn spawn<R>(stream: Option<R>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&buffer);
        let task = tokio::spawn(async move {
            let Some(mut stream) = stream else {
                return;
            };
            let mut chunk = [0u8; 4096];
            loop {
                match stream.read(&mut chunk).await {
                    Ok(0) => break,
                    Ok(n) => sink
                        .lock()
                        .unwrap_or_else(|e| e.into_inner())
                        .extend_from_slice(&chunk[..n]),
                    Err(e) => {
                        debug!("Stopped reading child stream: {}", e);
                        break;
                    }
                }
            }
        });
        Self { buffer, task }
    }

    /// Waits briefly for end of stream, then returns whatever was read.
    /// A grandchild that inherited the pipe can keep it open after the
    /// child is killed.
    async fn finish(self) -> String {
        let Self { buffer, mut task } = self;
        if tokio::time::timeout(DRAIN_GRACE, &mut task).await.is_err() {
            task.abort();
        }
        let bytes = buffer.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

fn format_diagnostic(cause: &str, stdout: &str, stderr: &str) -> String {
    let mut diagnostic = cause.to_string();
    if !stderr.trim().is_empty() {
        diagnostic.push_str("\n--- stderr ---\n");
        diagnostic.push_str(stderr.trim_end());
    }
    if !stdout.trim().is_empty() {
        diagnostic.push_str("\n--- stdout ---\n");
        diagnostic.push_str(stdout.trim_end());
    }
    diagnostic
}
