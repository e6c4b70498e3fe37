//! External process execution.
//!
//! Every collaborator the menu drives (`iwctl`, the picker, the secret
//! prompt, `wg`/`wg-quick`, `notify-send`) is spawned through
//! [`CommandRunner`], so tests can substitute scripted output.

use async_trait::async_trait;
use log::debug;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::Result;
use crate::api::models::{CommandOutput, ConnectionError};

/// Runs an external program to completion and captures its output.
///
/// A non-zero exit is not an error at this level; callers decide via
/// [`CommandOutput::check`]. Only a failure to start the process is.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[String], stdin: Option<&str>)
    -> Result<CommandOutput>;
}

/// Spawns real processes with `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        stdin: Option<&str>,
    ) -> Result<CommandOutput> {
        debug!("Spawning {program} with {} argument(s)", args.len());

        let mut child = Command::new(program)
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ConnectionError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
            pipe.write_all(input.as_bytes()).await?;
            // Closing stdin signals end of options to dmenu-style pickers.
            drop(pipe);
        }

        let output = child.wait_with_output().await?;
        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Builds an owned argument vector from string slices.
pub(crate) fn args<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout_and_status() {
        let out = SystemCommandRunner
            .run("sh", &args(["-c", "printf hello; exit 3"]), None)
            .await
            .unwrap();
        assert_eq!(out.stdout, "hello");
        assert_eq!(out.status, Some(3));
        assert!(!out.success());
    }

    #[tokio::test]
    async fn feeds_stdin() {
        let out = SystemCommandRunner
            .run("cat", &[], Some("a\nb"))
            .await
            .unwrap();
        assert_eq!(out.stdout, "a\nb");
        assert!(out.success());
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let err = SystemCommandRunner
            .run("iwmenu-definitely-not-installed", &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectionError::Spawn { .. }));
        assert!(err.is_fatal());
    }
}
