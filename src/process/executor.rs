use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use super::ProcessError;

/// Collected result of a finished child process.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

impl CapturedOutput {
    /// Standard output, or standard error when standard output is empty.
    pub fn visible_text(&self) -> &str {
        if self.stdout.is_empty() {
            &self.stderr
        } else {
            &self.stdout
        }
    }

    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Spawns child processes with captured output. Every child runs in the
/// directory it is given, never in the process-wide current directory.
#[derive(Clone, Debug)]
pub struct ProcessExecutor {
    shell: String,
    env: BTreeMap<String, String>,
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new(default_shell())
    }
}

pub fn default_shell() -> String {
    if cfg!(windows) {
        "cmd".to_string()
    } else {
        "sh".to_string()
    }
}

impl ProcessExecutor {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            env: BTreeMap::new(),
        }
    }

    /// Extra variables added on top of the inherited environment.
    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// Runs `line` through the configured shell with `cwd` as its directory.
    pub fn run_shell(&self, line: &str, cwd: &Path) -> Result<CapturedOutput, ProcessError> {
        let flag = if self.shell.ends_with("cmd") || self.shell.ends_with("cmd.exe") {
            "/C"
        } else {
            "-c"
        };
        self.run(&self.shell, &[flag, line], cwd)
    }

    pub fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Path,
    ) -> Result<CapturedOutput, ProcessError> {
        tracing::debug!(program, ?args, cwd = %cwd.display(), "spawning process");

        let result = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .envs(&self.env)
            .stdin(Stdio::null())
            .output();

        match result {
            Ok(output) => {
                let captured = CapturedOutput {
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    status: output.status,
                };
                if !captured.success() {
                    tracing::debug!(program, status = %captured.status, "process exited unsuccessfully");
                }
                Ok(captured)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound && !cwd.is_dir() => Err(
                ProcessError::Other(format!("No such directory: '{}'", cwd.display())),
            ),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ProcessError::CommandNotFound(program.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_runs_in_given_directory() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().canonicalize().unwrap();
        let output = ProcessExecutor::default().run_shell("pwd", &cwd).unwrap();
        assert!(output.success());
        assert_eq!(output.visible_text().trim_end(), cwd.to_str().unwrap());
    }

    #[test]
    fn test_stderr_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let output = ProcessExecutor::default()
            .run_shell("echo oops >&2; exit 3", dir.path())
            .unwrap();
        assert!(!output.success());
        assert_eq!(output.status.code(), Some(3));
        assert_eq!(output.visible_text(), "oops\n");
    }

    #[test]
    fn test_stdout_preferred_over_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let output = ProcessExecutor::default()
            .run_shell("echo out; echo err >&2", dir.path())
            .unwrap();
        assert_eq!(output.visible_text(), "out\n");
    }

    #[test]
    fn test_extra_env_is_visible() {
        let dir = tempfile::tempdir().unwrap();
        let mut env = BTreeMap::new();
        env.insert("VISH_TEST_VALUE".to_string(), "hello".to_string());
        let output = ProcessExecutor::default()
            .with_env(env)
            .run_shell("printf %s \"$VISH_TEST_VALUE\"", dir.path())
            .unwrap();
        assert_eq!(output.stdout, "hello");
    }

    #[test]
    fn test_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let result = ProcessExecutor::default().run("vish-no-such-program", &[], dir.path());
        assert!(matches!(result, Err(ProcessError::CommandNotFound(_))));
    }
}
