use async_trait::async_trait;
use colored::Colorize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use thiserror::Error;
use tokio::process::Command as TokioCommand;

/// Command runner errors. A non-zero exit status is not one of them.
#[derive(Debug, Error)]
pub enum CommandRunnerError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Failed to spawn '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to wait for '{command}': {source}")]
    WaitFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// How the child's standard streams are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Inherit the terminal's stdin, stdout and stderr so editors, pagers
    /// and credential prompts work
    #[default]
    Interactive,
    /// Pipe stdout and stderr into the result; stdin is closed
    Captured,
}

/// Configuration for a single command execution
#[derive(Debug, Clone, Default)]
pub struct ExecutionConfig {
    /// Working directory; the runner's own directory when `None`
    pub working_directory: Option<PathBuf>,

    /// Extra environment variables on top of the inherited environment
    pub environment_variables: HashMap<String, String>,

    pub mode: ExecutionMode,
}

impl ExecutionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interactive() -> Self {
        Self::default()
    }

    pub fn captured() -> Self {
        Self {
            mode: ExecutionMode::Captured,
            ..Self::default()
        }
    }

    pub fn with_working_directory<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.working_directory = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn with_environment_variable(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.environment_variables.insert(key.into(), value.into());
        self
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Result of command execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Exit code of the process; -1 when it was terminated by a signal
    pub exit_code: i32,

    /// Captured stdout (empty in interactive mode)
    pub stdout: String,

    /// Captured stderr (empty in interactive mode)
    pub stderr: String,

    pub execution_time_ms: u64,
}

impl ExecutionResult {
    pub fn new(exit_code: i32, stdout: String, stderr: String, execution_time_ms: u64) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            execution_time_ms,
        }
    }

    /// Result of an interactive run, which has no captured output
    pub fn exited(exit_code: i32) -> Self {
        Self::new(exit_code, String::new(), String::new(), 0)
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes command text as an external process, one at a time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(
        &self,
        command: &str,
        config: &ExecutionConfig,
    ) -> Result<ExecutionResult, CommandRunnerError>;
}

/// Runs command text through the platform shell.
#[derive(Debug, Clone)]
pub struct ShellCommandRunner {
    echo: bool,
}

impl ShellCommandRunner {
    pub fn new() -> Self {
        Self { echo: true }
    }

    /// Print `Running Command: ...` before each execution
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Shell program and arguments used to run `command`
    fn shell_invocation(command: &str) -> Result<(String, Vec<String>), CommandRunnerError> {
        if command.trim().is_empty() {
            return Err(CommandRunnerError::InvalidCommand(
                "Command is empty".to_string(),
            ));
        }

        let (shell, flag) = if cfg!(target_os = "windows") {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        };

        Ok((shell.to_string(), vec![flag.to_string(), command.to_string()]))
    }
}

impl Default for ShellCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for ShellCommandRunner {
    async fn run(
        &self,
        command: &str,
        config: &ExecutionConfig,
    ) -> Result<ExecutionResult, CommandRunnerError> {
        let start_time = Instant::now();
        let (program, args) = Self::shell_invocation(command)?;

        if self.echo {
            println!("Running Command: {}", command.green());
        }
        tracing::debug!("spawning {:?} in {:?} ({:?})", command, config.working_directory, config.mode);

        let mut cmd = TokioCommand::new(&program);
        cmd.args(&args);

        if let Some(working_dir) = &config.working_directory {
            cmd.current_dir(working_dir);
        }
        for (key, value) in &config.environment_variables {
            cmd.env(key, value);
        }

        let (exit_code, stdout, stderr) = match config.mode {
            ExecutionMode::Interactive => {
                cmd.stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit());
                let status = cmd
                    .status()
                    .await
                    .map_err(|source| CommandRunnerError::SpawnFailed {
                        command: command.to_string(),
                        source,
                    })?;
                (status.code().unwrap_or(-1), String::new(), String::new())
            }
            ExecutionMode::Captured => {
                cmd.stdin(Stdio::null())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped());
                let child = cmd.spawn().map_err(|source| CommandRunnerError::SpawnFailed {
                    command: command.to_string(),
                    source,
                })?;
                let output = child.wait_with_output().await.map_err(|source| {
                    CommandRunnerError::WaitFailed {
                        command: command.to_string(),
                        source,
                    }
                })?;
                (
                    output.status.code().unwrap_or(-1),
                    String::from_utf8_lossy(&output.stdout).into_owned(),
                    String::from_utf8_lossy(&output.stderr).into_owned(),
                )
            }
        };

        let execution_time = start_time.elapsed().as_millis() as u64;
        tracing::debug!("{:?} exited with {} after {}ms", command, exit_code, execution_time);

        Ok(ExecutionResult::new(exit_code, stdout, stderr, execution_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn quiet_runner() -> ShellCommandRunner {
        ShellCommandRunner::new().with_echo(false)
    }

    #[tokio::test]
    async fn test_captured_command_output() {
        let result = quiet_runner()
            .run("echo 'Hello, World!'", &ExecutionConfig::captured())
            .await
            .unwrap();

        assert!(result.success());
        assert_eq!(result.exit_code, 0);
        assert!(result.stdout.contains("Hello, World!"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_a_result() {
        let result = quiet_runner()
            .run("exit 3", &ExecutionConfig::captured())
            .await
            .unwrap();

        assert!(!result.success());
        assert_eq!(result.exit_code, 3);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_interactive_command_returns_status() {
        let result = quiet_runner()
            .run("exit 2", &ExecutionConfig::interactive())
            .await
            .unwrap();

        assert_eq!(result.exit_code, 2);
        assert!(result.stdout.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_with_working_directory() {
        let temp_dir = TempDir::new().unwrap();
        let config = ExecutionConfig::captured().with_working_directory(temp_dir.path());

        let result = quiet_runner().run("pwd", &config).await.unwrap();

        let reported = std::path::PathBuf::from(result.stdout.trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            temp_dir.path().canonicalize().unwrap()
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_with_environment_variables() {
        let config = ExecutionConfig::captured().with_environment_variable("WTSRC_HOOK", "pre");

        let result = quiet_runner()
            .run("echo $WTSRC_HOOK", &config)
            .await
            .unwrap();

        assert_eq!(result.stdout.trim(), "pre");
    }

    #[tokio::test]
    async fn test_empty_command_is_rejected() {
        let result = quiet_runner().run("   ", &ExecutionConfig::captured()).await;
        assert!(matches!(result, Err(CommandRunnerError::InvalidCommand(_))));
    }

    #[test]
    fn test_shell_invocation() {
        let (program, args) = ShellCommandRunner::shell_invocation("make all").unwrap();
        if cfg!(target_os = "windows") {
            assert_eq!(program, "cmd");
            assert_eq!(args, vec!["/C", "make all"]);
        } else {
            assert_eq!(program, "sh");
            assert_eq!(args, vec!["-c", "make all"]);
        }
    }

    #[test]
    fn test_execution_config_builders() {
        let config = ExecutionConfig::interactive()
            .with_working_directory("/tmp")
            .with_environment_variable("KEY", "value")
            .with_mode(ExecutionMode::Captured);

        assert_eq!(config.working_directory, Some(PathBuf::from("/tmp")));
        assert_eq!(config.environment_variables.get("KEY"), Some(&"value".to_string()));
        assert_eq!(config.mode, ExecutionMode::Captured);
        assert_eq!(ExecutionConfig::new().mode, ExecutionMode::Interactive);
    }
}
