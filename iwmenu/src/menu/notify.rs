use log::warn;
use std::sync::Arc;

use crate::types::constants::tools;
use crate::util::command::CommandRunner;

/// Best-effort desktop notifications via `notify-send`.
#[derive(Clone)]
pub struct Notifier {
    runner: Arc<dyn CommandRunner>,
    program: String,
}

impl Notifier {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            program: tools::NOTIFIER.to_string(),
        }
    }

    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Shows `message`. Failures are logged and otherwise ignored.
    pub async fn notify(&self, message: &str) {
        match self
            .runner
            .run(&self.program, &[message.to_string()], None)
            .await
        {
            Ok(output) if output.success() => {}
            Ok(output) => warn!("{} exited with {:?}", self.program, output.status),
            Err(e) => warn!("Notification failed: {e}"),
        }
    }
}
