use async_trait::async_trait;
use log::debug;
use std::path::PathBuf;
use std::sync::Arc;

use crate::Result;
use crate::types::constants::tools;
use crate::util::command::CommandRunner;

/// A dmenu-style chooser: shows a list of lines, returns the one picked.
#[async_trait]
pub trait Picker: Send + Sync {
    /// Presents `options` sized `width` columns by `lines` rows.
    ///
    /// Returns the chosen line trimmed, or an empty string when the picker
    /// was dismissed.
    async fn pick(&self, options: &[String], width: usize, lines: usize) -> Result<String>;
}

/// [`Picker`] backed by an external dmenu-compatible process (`fuzzel`).
///
/// Invoked as `<program> --dmenu --width=<w> --lines=<n> [--config=<path>]
/// [extra args]` with the options on stdin.
#[derive(Clone)]
pub struct CommandPicker {
    runner: Arc<dyn CommandRunner>,
    program: String,
    config: Option<PathBuf>,
    extra_args: Vec<String>,
}

impl CommandPicker {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            program: tools::PICKER.to_string(),
            config: None,
            extra_args: Vec::new(),
        }
    }

    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Picker configuration file passed as `--config=<path>`.
    pub fn config(mut self, path: Option<PathBuf>) -> Self {
        self.config = path;
        self
    }

    pub fn extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    fn argv(&self, width: usize, lines: usize) -> Vec<String> {
        let mut argv = vec![
            "--dmenu".to_string(),
            format!("--width={width}"),
            format!("--lines={lines}"),
        ];
        if let Some(config) = &self.config {
            argv.push(format!("--config={}", config.display()));
        }
        argv.extend(self.extra_args.iter().cloned());
        argv
    }
}

#[async_trait]
impl Picker for CommandPicker {
    async fn pick(&self, options: &[String], width: usize, lines: usize) -> Result<String> {
        let input = options.join("\n");
        let output = self
            .runner
            .run(&self.program, &self.argv(width, lines), Some(&input))
            .await?;

        // fuzzel exits non-zero when dismissed with Escape
        if !output.success() {
            debug!("{} dismissed ({:?})", self.program, output.status);
            return Ok(String::new());
        }
        Ok(output.stdout.trim().to_string())
    }
}
