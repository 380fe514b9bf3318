use super::cancel::CancelToken;
use super::supervisor::{Report, Supervisor};
use super::{CommandRunner, CommandSpec, compose_environment};
use crate::error::{HostkitError, Result};
use crate::ui;
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};
use std::time::Duration;

/// Time a cancelled child gets between SIGINT and SIGKILL.
pub const GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Spawns real processes, cancellable through a [`CancelToken`].
#[derive(Debug, Clone)]
pub struct SystemRunner {
    cancel: CancelToken,
}

impl SystemRunner {
    pub fn new(cancel: CancelToken) -> Self {
        Self { cancel }
    }

    /// Runner wired to SIGINT/SIGTERM.
    pub fn from_signals() -> Result<Self> {
        Ok(Self::new(super::signal_token()?))
    }

    fn cancelled(&self) -> Option<HostkitError> {
        self.cancel
            .reason()
            .map(|reason| HostkitError::Cancelled { reason })
    }
}

fn cancelled_after(reason: String, report: &Report) -> HostkitError {
    if report.killed {
        return HostkitError::Cancelled {
            reason: format!(
                "{}; force-killed after {}s",
                reason,
                GRACE_PERIOD.as_secs()
            ),
        };
    }
    HostkitError::Cancelled { reason }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<()> {
        let line = spec.to_string();

        // Only signals that arrive while this command is in flight cancel it.
        self.cancel.rearm();
        if let Some(err) = self.cancelled() {
            return Err(err);
        }

        let env = compose_environment(&spec.env_vars, spec.inherit_env, std::env::vars_os())?;

        let mut cmd = Command::new(&spec.name);
        cmd.args(&spec.args)
            .env_clear()
            .envs(env)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .process_group(0);

        ui::detail(&format!("running: {}", line));

        let child = cmd.spawn().map_err(|source| HostkitError::Spawn {
            command: line.clone(),
            source,
        })?;

        let report = Supervisor::new(child, &self.cancel, GRACE_PERIOD)
            .wait()
            .map_err(|source| HostkitError::Wait {
                command: line.clone(),
                source,
            })?;

        if report.interrupted {
            ui::detail(&format!("'{}' exited after interrupt: {}", line, report.status));
        }

        // A cancelled run reports the cancellation, not the exit status it caused.
        if let Some(reason) = self.cancel.reason() {
            return Err(cancelled_after(reason, &report));
        }

        if !report.status.success() {
            return Err(HostkitError::CommandFailed {
                command: line,
                status: report.status,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    fn runner() -> (SystemRunner, CancelToken) {
        let token = CancelToken::new();
        (SystemRunner::new(token.clone()), token)
    }

    #[test]
    fn zero_exit_is_success() {
        let (runner, _) = runner();
        runner.run(&CommandSpec::new("true")).unwrap();
    }

    #[test]
    fn non_zero_exit_is_command_failure() {
        let (runner, _) = runner();
        let err = runner
            .run(&CommandSpec::new("sh").args(["-c", "exit 7"]))
            .unwrap_err();

        match err {
            HostkitError::CommandFailed { command, status } => {
                assert_eq!(command, "sh -c exit 7");
                assert_eq!(status.code(), Some(7));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_binary_is_spawn_failure() {
        let (runner, _) = runner();
        let err = runner
            .run(&CommandSpec::new("hostkit-definitely-not-a-binary"))
            .unwrap_err();
        assert!(matches!(err, HostkitError::Spawn { .. }));
    }

    #[test]
    fn explicit_env_reaches_the_child() {
        let (runner, _) = runner();
        runner
            .run(
                &CommandSpec::new("sh")
                    .args(["-c", "test \"$HOSTKIT_MARKER\" = yes"])
                    .env_var("HOSTKIT_MARKER=yes"),
            )
            .unwrap();
    }

    #[test]
    fn inherited_environment_reaches_the_child() {
        let (runner, _) = runner();
        runner
            .run(&CommandSpec::new("sh").args(["-c", "test -n \"$CARGO_MANIFEST_DIR\""]))
            .unwrap();
    }

    #[test]
    fn bare_environment_drops_inherited_vars() {
        let (runner, _) = runner();
        // cargo exports CARGO_MANIFEST_DIR to the test process
        runner
            .run(
                &CommandSpec::new("/bin/sh")
                    .args(["-c", "test -z \"$CARGO_MANIFEST_DIR\""])
                    .inherit_env(false),
            )
            .unwrap();
    }

    #[test]
    fn cancellation_from_an_earlier_run_does_not_carry_over() {
        let (runner, token) = runner();
        token.cancel("stop");

        runner.run(&CommandSpec::new("true")).unwrap();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn commands_still_spawn_after_an_interrupted_one() {
        let (runner, token) = runner();
        let canceller = token.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(200));
            canceller.cancel("interrupted");
        });

        let err = runner
            .run(&CommandSpec::new("sleep").arg("30"))
            .unwrap_err();
        assert!(err.is_cancelled(), "got {err:?}");

        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("cleaned");
        runner
            .run(&CommandSpec::new("touch").arg(marker.to_string_lossy()))
            .unwrap();
        assert!(marker.exists());
    }

    #[test]
    fn cancellation_wins_over_exit_status() {
        let (runner, token) = runner();
        let canceller = token.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(200));
            canceller.cancel("interrupted");
        });

        let started = Instant::now();
        let err = runner
            .run(&CommandSpec::new("sleep").arg("30"))
            .unwrap_err();

        assert!(err.is_cancelled(), "got {err:?}");
        assert!(started.elapsed() < GRACE_PERIOD);
    }
}
