//! # Process execution
//!
//! Everything that spawns an external program goes through the
//! [`CommandRunner`] trait so package-manager backends can be exercised
//! against a [`RecordingRunner`] in tests and a [`SystemRunner`] in
//! production.
//!
//! ## Runtime behaviour of [`SystemRunner`]
//!
//! - the child becomes leader of its own process group
//! - stdin, stdout and stderr are inherited unmodified
//! - a [`CancelToken`] fed by SIGINT/SIGTERM is raced against child exit;
//!   cancellation interrupts the child, then force-kills it after
//!   [`GRACE_PERIOD`]
//! - the token is re-armed when each command starts, so a signal only
//!   cancels the command running when it arrived
//! - a cancelled run reports [`HostkitError::Cancelled`] even when the
//!   child also exited non-zero

pub mod cancel;
pub mod recording;
pub mod runner;
mod supervisor;

pub use cancel::{CancelToken, signal_token};
pub use recording::RecordingRunner;
pub use runner::{GRACE_PERIOD, SystemRunner};

use crate::error::{HostkitError, Result};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fmt;

/// One external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: String,
    pub args: Vec<String>,
    /// Explicit `KEY=VALUE` pairs.
    pub env_vars: Vec<String>,
    /// When true the current process environment is appended to `env_vars`.
    pub inherit_env: bool,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            env_vars: Vec::new(),
            inherit_env: true,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env_var(mut self, pair: impl Into<String>) -> Self {
        self.env_vars.push(pair.into());
        self
    }

    pub fn env_vars<I, S>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.env_vars.extend(pairs.into_iter().map(Into::into));
        self
    }

    pub fn inherit_env(mut self, inherit: bool) -> Self {
        self.inherit_env = inherit;
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs a single command to completion.
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &CommandSpec) -> Result<()>;
}

/// Build the child environment: `env_vars` first, then (when `inherit` is
/// set) every variable of `current` whose key was not given explicitly.
pub fn compose_environment<I>(
    env_vars: &[String],
    inherit: bool,
    current: I,
) -> Result<Vec<(OsString, OsString)>>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut composed = Vec::with_capacity(env_vars.len());
    let mut explicit_keys = HashSet::new();

    for pair in env_vars {
        let (key, value) = pair
            .split_once('=')
            .filter(|(key, _)| !key.is_empty())
            .ok_or_else(|| HostkitError::InvalidEnvVar(pair.clone()))?;
        explicit_keys.insert(OsString::from(key));
        composed.push((OsString::from(key), OsString::from(value)));
    }

    if inherit {
        composed.extend(
            current
                .into_iter()
                .filter(|(key, _)| !explicit_keys.contains(key)),
        );
    }

    Ok(composed)
}

#[cfg(test)]
mod tests;
