use async_trait::async_trait;
use log::debug;
use secrecy::SecretString;
use std::sync::Arc;

use crate::Result;
use crate::types::constants::tools;
use crate::util::command::{CommandRunner, args};

/// Asks the user for a secret.
#[async_trait]
pub trait SecretPrompt: Send + Sync {
    /// Returns `None` when the prompt was cancelled or left empty.
    async fn ask(&self, title: &str) -> Result<Option<SecretString>>;
}

/// [`SecretPrompt`] backed by an external dialog process.
///
/// The title is appended as the last argument, so the default command line
/// is `zenity --password --title <title>`.
#[derive(Clone)]
pub struct CommandPrompt {
    runner: Arc<dyn CommandRunner>,
    command: Vec<String>,
}

impl CommandPrompt {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            command: args(tools::SECRET_PROMPT.iter().copied()),
        }
    }

    /// Replaces the prompt command (program followed by its arguments).
    /// An empty vector keeps the default.
    pub fn command(mut self, command: Vec<String>) -> Self {
        if !command.is_empty() {
            self.command = command;
        }
        self
    }
}

#[async_trait]
impl SecretPrompt for CommandPrompt {
    async fn ask(&self, title: &str) -> Result<Option<SecretString>> {
        let Some((program, fixed)) = self.command.split_first() else {
            return Ok(None);
        };
        let mut argv = fixed.to_vec();
        argv.push(title.to_string());

        let output = self.runner.run(program, &argv, None).await?;
        if !output.success() {
            debug!("{program} cancelled ({:?})", output.status);
            return Ok(None);
        }

        let secret = output.stdout.trim();
        if secret.is_empty() {
            return Ok(None);
        }
        Ok(Some(SecretString::from(secret.to_string())))
    }
}
