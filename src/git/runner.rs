//! Subprocess execution behind a narrow capability trait

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use super::error::{ExternalToolError, GitError};

/// Runs external commands and returns their trimmed standard output
pub trait CommandRunner {
    /// Run `program` with `args` in `dir`.
    ///
    /// # Errors
    /// * `GitError::Spawn` if the process cannot be started.
    /// * `GitError::Tool` if it exits with a nonzero status.
    fn run(&self, program: &str, args: &[&str], dir: &Path) -> Result<String, GitError>;
}

/// Render a command line for messages
#[must_use]
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Spawns real processes with `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], dir: &Path) -> Result<String, GitError> {
        let command = command_line(program, args);
        debug!(%command, dir = %dir.display(), "running");

        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if output.status.success() {
            return Ok(stdout.trim().to_string());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let combined = format!("{}\n{}", stdout.trim(), stderr.trim());
        Err(ExternalToolError {
            command,
            status: output.status.code(),
            output: combined.trim().to_string(),
        }
        .into())
    }
}

/// A command the [`ScriptedRunner`] was asked to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: String,
    pub dir: PathBuf,
}

#[derive(Debug, Clone)]
enum Response {
    Success(String),
    Failure { status: i32, output: String },
}

/// Runner with canned responses keyed by command line
///
/// Commands without a scripted response fail with status 127.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, Response>,
    calls: RefCell<Vec<Invocation>>,
}

impl ScriptedRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command` with `stdout`
    #[must_use]
    pub fn respond(mut self, command: &str, stdout: &str) -> Self {
        self.responses
            .insert(command.to_string(), Response::Success(stdout.to_string()));
        self
    }

    /// Make `command` exit with `status` and `output`
    #[must_use]
    pub fn fail(mut self, command: &str, status: i32, output: &str) -> Self {
        self.responses.insert(
            command.to_string(),
            Response::Failure {
                status,
                output: output.to_string(),
            },
        );
        self
    }

    /// Commands run so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[&str], dir: &Path) -> Result<String, GitError> {
        let command = command_line(program, args);
        self.calls.borrow_mut().push(Invocation {
            command: command.clone(),
            dir: dir.to_path_buf(),
        });

        match self.responses.get(&command) {
            Some(Response::Success(stdout)) => Ok(stdout.trim().to_string()),
            Some(Response::Failure { status, output }) => Err(ExternalToolError {
                command,
                status: Some(*status),
                output: output.clone(),
            }
            .into()),
            None => Err(ExternalToolError {
                command,
                status: Some(127),
                output: "no scripted response".to_string(),
            }
            .into()),
        }
    }
}
