//! In-memory runner that records commands instead of executing them.

use super::{CommandRunner, CommandSpec};
use crate::error::{HostkitError, Result};
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    Never,
    Always,
    /// 1-based index of the call that fails.
    OnCall(usize),
}

#[derive(Debug)]
pub struct RecordingRunner {
    calls: Mutex<Vec<CommandSpec>>,
    failure: Failure,
}

impl Default for RecordingRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingRunner {
    /// Every command succeeds.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Failure::Never,
        }
    }

    /// Every command exits with status 1.
    pub fn failing() -> Self {
        Self {
            failure: Failure::Always,
            ..Self::new()
        }
    }

    /// Only the `n`-th command (1-based) exits with status 1.
    pub fn failing_on_call(n: usize) -> Self {
        Self {
            failure: Failure::OnCall(n),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.lock().clone()
    }

    /// Recorded commands rendered as `name arg1 arg2 ...`.
    pub fn command_lines(&self) -> Vec<String> {
        self.lock().iter().map(ToString::to_string).collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CommandSpec>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &CommandSpec) -> Result<()> {
        let mut calls = self.lock();
        calls.push(command.clone());

        let fails = match self.failure {
            Failure::Never => false,
            Failure::Always => true,
            Failure::OnCall(n) => calls.len() == n,
        };

        if fails {
            return Err(HostkitError::CommandFailed {
                command: command.to_string(),
                status: ExitStatus::from_raw(1 << 8),
            });
        }
        Ok(())
    }
}
