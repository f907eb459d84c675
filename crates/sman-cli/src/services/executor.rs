// crates/sman-cli/src/services/executor.rs - Command execution service
//
// Runs a fully substituted snippet command through the user's shell and
// optionally records it in the shell history file.

use anyhow::{Context as AnyhowContext, Result};
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tracing::{debug, warn};

/// Runs finished commands
///
/// SHELL SELECTION:
/// 1. SMAN_SHELL environment variable
/// 2. SHELL environment variable
/// 3. "sh"
pub struct ExecutorService;

impl ExecutorService {
    pub fn shell() -> String {
        env::var("SMAN_SHELL")
            .or_else(|_| env::var("SHELL"))
            .unwrap_or_else(|_| "sh".to_string())
    }

    /// Execute a command with inherited stdio and wait for it
    pub fn execute(command: &str) -> Result<ExitStatus> {
        let shell = Self::shell();
        debug!(%shell, %command, "executing snippet");

        Command::new(&shell)
            .arg("-c")
            .arg(command)
            .status()
            .with_context(|| format!("Failed to launch shell '{}'", shell))
    }

    /// History file to append to, from $HISTFILE
    pub fn history_file() -> Option<PathBuf> {
        env::var_os("HISTFILE")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    /// Append a command to a history file, one line per command
    ///
    /// Failures are logged and otherwise ignored: history is a convenience
    /// and must not turn a successful run into an error.
    pub fn append_history(path: &Path, command: &str) {
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| writeln!(file, "{}", command));

        if let Err(e) = result {
            warn!(path = %path.display(), error = %e, "could not append to history file");
        }
    }
}
