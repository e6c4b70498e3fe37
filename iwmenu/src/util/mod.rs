//! Process execution and terminal-output helpers.

pub(crate) mod ansi;
pub mod command;
