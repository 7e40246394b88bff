//! Shell command execution with gated diagnostics and dry-run support.
//!
//! `execute*` always runs the command; `run*` respects the `dry_run` flag and
//! only announces what would have been executed. The command line is echoed
//! on the `Verbose` channel before execution, and re-echoed on the
//! `QuietOnly` channel when a command fails, so failures stay diagnosable
//! even in quiet mode.

use std::process::Command;

use serde::Serialize;

use crate::error::{CommandFailedDetails, Error, Result};
use crate::talk::{TalkConfig, Talker};

/// Default failure message template. `%d` is replaced with the exit code.
pub const DEFAULT_FAILURE: &str = "Command failed with code %d";

/// Captured output from an executed command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub exit_code: i32,
}

/// Runs shell commands through `sh -c` with consistent logging.
#[derive(Debug, Clone, Copy, Default)]
pub struct Runner {
    pub talker: Talker,
}

impl Runner {
    pub fn new(config: TalkConfig) -> Self {
        Self {
            talker: Talker::new(config),
        }
    }

    /// Execute `command` unconditionally, ignoring the dry-run flag.
    pub fn execute(&self, command: &str) -> Result<CommandOutput> {
        self.execute_with(command, None, None)
    }

    /// Execute `command` unconditionally, with optional messages.
    ///
    /// On success, `ok_msg` is emitted on the `Status` channel. On a
    /// non-zero exit, `err_msg` (default [`DEFAULT_FAILURE`], `%d` replaced
    /// with the exit code) is emitted on `Status` and returned as a
    /// `command.failed` error carrying the command line, exit code, and
    /// captured output.
    pub fn execute_with(
        &self,
        command: &str,
        err_msg: Option<&str>,
        ok_msg: Option<&str>,
    ) -> Result<CommandOutput> {
        self.talker.verbose_with(|| format!(">> {}", command));

        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .output()
            .map_err(|e| {
                Error::internal_io(
                    format!("Failed to spawn '{}': {}", command, e),
                    Some("sh -c".to_string()),
                )
            })?;

        let exit_code = output.status.code().unwrap_or(-1);
        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            exit_code,
        };

        if result.success {
            if let Some(msg) = ok_msg {
                self.talker.status(msg);
            }
            return Ok(result);
        }

        self.talker.quiet_only_with(|| format!(">> {}", command));
        let message = fill_code(err_msg.unwrap_or(DEFAULT_FAILURE), exit_code);
        self.talker.status(&message);

        Err(Error::command_failed(
            message,
            CommandFailedDetails {
                command: command.to_string(),
                exit_code,
                stdout: result.stdout,
                stderr: result.stderr,
            },
        ))
    }

    /// Dry-run-aware execution.
    ///
    /// Under `dry_run`, announces the command on the `DryRun` channel and
    /// returns `Ok(None)` without spawning anything; otherwise executes and
    /// returns the captured output.
    pub fn run(&self, command: &str) -> Result<Option<CommandOutput>> {
        self.run_with(command, None, None)
    }

    /// Dry-run-aware variant of [`Runner::execute_with`].
    pub fn run_with(
        &self,
        command: &str,
        err_msg: Option<&str>,
        ok_msg: Option<&str>,
    ) -> Result<Option<CommandOutput>> {
        if self.talker.config.dry_run {
            self.talker.dry_run(command);
            return Ok(None);
        }
        self.execute_with(command, err_msg, ok_msg).map(Some)
    }

    /// Dry-run-aware execution of a lazily produced command line.
    ///
    /// The producer is invoked even under dry-run; its result is exactly
    /// what the dry-run announcement must show.
    pub fn run_deferred<F: FnOnce() -> String>(&self, produce: F) -> Result<Option<CommandOutput>> {
        self.run_with(&produce(), None, None)
    }
}

fn fill_code(template: &str, exit_code: i32) -> String {
    template.replacen("%d", &exit_code.to_string(), 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn quiet_runner(dry_run: bool) -> Runner {
        Runner::new(TalkConfig {
            quiet: true,
            dry_run,
            ..TalkConfig::default()
        })
    }

    #[test]
    fn execute_captures_stdout() {
        let result = quiet_runner(false).execute("echo hello").unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout, "hello\n");
    }

    #[test]
    fn execute_fails_with_command_details() {
        let err = quiet_runner(false).execute("exit 3").unwrap_err();
        assert_eq!(err.code, ErrorCode::CommandFailed);
        assert_eq!(err.message, "Command failed with code 3");
        assert_eq!(err.details["command"], "exit 3");
        assert_eq!(err.details["exitCode"], 3);
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn execute_honors_custom_failure_template() {
        let err = quiet_runner(false)
            .execute_with("false", Some("build step died (%d)"), None)
            .unwrap_err();
        assert_eq!(err.message, "build step died (1)");
    }

    #[test]
    fn execute_captures_stderr_on_failure() {
        let err = quiet_runner(false)
            .execute("echo oops >&2; exit 1")
            .unwrap_err();
        assert_eq!(err.details["stderr"], "oops\n");
    }

    #[test]
    fn run_executes_when_dry_run_is_off() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("ran");
        let command = format!("touch {}", marker.display());

        let result = quiet_runner(false).run(&command).unwrap();
        assert!(result.is_some());
        assert!(marker.exists());
    }

    #[test]
    fn dry_run_skips_execution() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("ran");
        let command = format!("touch {}", marker.display());

        let result = quiet_runner(true).run(&command).unwrap();
        assert!(result.is_none());
        assert!(!marker.exists());
    }

    #[test]
    fn run_deferred_invokes_producer_under_dry_run() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("ran");

        let mut produced = false;
        let result = quiet_runner(true)
            .run_deferred(|| {
                produced = true;
                format!("touch {}", marker.display())
            })
            .unwrap();

        assert!(produced);
        assert!(result.is_none());
        assert!(!marker.exists());
    }

    #[test]
    fn missing_program_fails_with_shell_exit_127() {
        let err = quiet_runner(false)
            .execute("definitely_not_a_real_program_xyz")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CommandFailed);
        assert_eq!(err.exit_code(), 127);
    }
}
