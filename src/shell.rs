//! Local command execution shim.
//!
//! Runs allowlisted developer commands and captures their output.

use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use tokio::process::Command;

use crate::config::ShellConfig;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

pub struct CommandRunner {
    allowed_programs: Vec<String>,
    timeout: Duration,
}

impl CommandRunner {
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            allowed_programs: config.allowed_programs.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Run an allowlisted program, capturing its output. Programs outside
    /// the allowlist are rejected before anything is spawned.
    pub async fn run(
        &self,
        program: &str,
        args: &[String],
        cwd: Option<&Path>,
    ) -> Result<CommandOutput> {
        if !self.allowed_programs.iter().any(|p| p == program) {
            return Err(AppError::CommandNotAllowed(program.to_string()));
        }

        let mut command = Command::new(program);
        command.args(args).kill_on_drop(true);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| {
                AppError::Shell(format!(
                    "'{program}' timed out after {}s",
                    self.timeout.as_secs()
                ))
            })??;

        Ok(CommandOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner(programs: &[&str]) -> CommandRunner {
        CommandRunner::new(&ShellConfig {
            allowed_programs: programs.iter().map(|p| p.to_string()).collect(),
            timeout_secs: 5,
        })
    }

    #[tokio::test]
    async fn test_rejects_program_outside_allowlist() {
        let result = runner(&["echo"]).run("rm", &[], None).await;
        assert!(matches!(result, Err(AppError::CommandNotAllowed(_))));
    }

    #[tokio::test]
    async fn test_captures_stdout_and_status() {
        let output = runner(&["echo"])
            .run("echo", &["hello".to_string()], None)
            .await
            .unwrap();
        assert_eq!(output.status, 0);
        assert_eq!(output.stdout.trim(), "hello");
        assert!(output.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_runs_in_requested_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "x").unwrap();

        let output = runner(&["ls"])
            .run("ls", &[], Some(dir.path()))
            .await
            .unwrap();
        assert!(output.stdout.contains("marker.txt"));
    }
}
