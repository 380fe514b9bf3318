//! Child process supervision.
//!
//! The supervisor polls the child and moves through
//! `Running -> Interrupting -> Killing -> Done`. Signals go to the child's
//! process group so grandchildren spawned by the package manager are
//! reached too.

use super::cancel::CancelToken;
use crate::ui;
use nix::sys::signal::{Signal, killpg};
use nix::unistd::Pid;
use std::io;
use std::process::{Child, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Running,
    /// SIGINT sent; force-kill once `deadline` passes.
    Interrupting { deadline: Instant },
    /// SIGKILL sent; waiting for the kernel to reap the child.
    Killing,
    Done(ExitStatus),
}

/// How the child ended up exiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Report {
    pub status: ExitStatus,
    pub interrupted: bool,
    pub killed: bool,
}

pub(crate) struct Supervisor<'a> {
    child: Child,
    cancel: &'a CancelToken,
    grace: Duration,
    phase: Phase,
    interrupted: bool,
    killed: bool,
}

impl<'a> Supervisor<'a> {
    pub(crate) fn new(child: Child, cancel: &'a CancelToken, grace: Duration) -> Self {
        Self {
            child,
            cancel,
            grace,
            phase: Phase::Running,
            interrupted: false,
            killed: false,
        }
    }

    /// Block until the child exits.
    ///
    /// If the child can no longer be polled, its process group is killed
    /// before the error is returned.
    pub(crate) fn wait(mut self) -> io::Result<Report> {
        loop {
            if let Err(err) = self.step() {
                self.abandon();
                return Err(err);
            }
            if let Phase::Done(status) = self.phase {
                return Ok(Report {
                    status,
                    interrupted: self.interrupted,
                    killed: self.killed,
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn step(&mut self) -> io::Result<()> {
        match self.phase {
            Phase::Running => {
                if let Some(status) = self.child.try_wait()? {
                    self.phase = Phase::Done(status);
                } else if self.cancel.is_cancelled() {
                    self.interrupt();
                    self.phase = Phase::Interrupting {
                        deadline: Instant::now() + self.grace,
                    };
                }
            }
            Phase::Interrupting { deadline } => {
                if let Some(status) = self.child.try_wait()? {
                    self.phase = Phase::Done(status);
                } else if Instant::now() >= deadline {
                    self.kill();
                    self.phase = Phase::Killing;
                }
            }
            Phase::Killing => {
                let status = self.child.wait()?;
                self.phase = Phase::Done(status);
            }
            Phase::Done(_) => {}
        }
        Ok(())
    }

    fn process_group(&self) -> Pid {
        Pid::from_raw(self.child.id() as i32)
    }

    fn interrupt(&mut self) {
        self.interrupted = true;
        ui::detail(&format!(
            "interrupting process group {}",
            self.process_group()
        ));
        if let Err(e) = killpg(self.process_group(), Signal::SIGINT) {
            ui::detail(&format!("SIGINT delivery failed: {}", e));
        }
    }

    fn kill(&mut self) {
        self.killed = true;
        ui::warning(&format!(
            "Process {} did not exit within {}s, killing it",
            self.child.id(),
            self.grace.as_secs()
        ));
        if killpg(self.process_group(), Signal::SIGKILL).is_err() {
            let _ = self.child.kill();
        }
    }

    fn abandon(&mut self) {
        ui::detail(&format!(
            "lost track of process {}, killing its process group",
            self.child.id()
        ));
        if killpg(self.process_group(), Signal::SIGKILL).is_err() {
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::process::CommandExt;
    use nix::sys::signal::kill;
    use nix::sys::wait::waitpid;
    use std::fs;
    use std::process::Command;

    fn spawn_shell(script: &str) -> Child {
        Command::new("sh")
            .arg("-c")
            .arg(script)
            .process_group(0)
            .spawn()
            .unwrap()
    }

    #[test]
    fn uncancelled_child_runs_to_completion() {
        let token = CancelToken::new();
        let report = Supervisor::new(spawn_shell("exit 3"), &token, Duration::from_secs(5))
            .wait()
            .unwrap();

        assert_eq!(report.status.code(), Some(3));
        assert!(!report.interrupted);
        assert!(!report.killed);
    }

    #[test]
    fn cancellation_interrupts_a_cooperative_child() {
        let token = CancelToken::new();
        token.cancel("test");
        let started = Instant::now();

        let report = Supervisor::new(spawn_shell("sleep 30"), &token, Duration::from_secs(5))
            .wait()
            .unwrap();

        assert!(report.interrupted);
        assert!(!report.killed);
        assert!(!report.status.success());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn child_ignoring_sigint_is_killed_after_grace() {
        let token = CancelToken::new();
        let canceller = token.clone();
        // give the shell time to install its trap before the signal lands
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(300));
            canceller.cancel("test");
        });
        let grace = Duration::from_millis(300);
        let started = Instant::now();

        let report = Supervisor::new(spawn_shell("trap '' INT; sleep 30"), &token, grace)
            .wait()
            .unwrap();

        assert!(report.interrupted);
        assert!(report.killed);
        assert!(started.elapsed() >= grace + Duration::from_millis(300));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    fn process_state(pid: &str) -> Option<char> {
        let stat = fs::read_to_string(format!("/proc/{pid}/stat")).ok()?;
        // the state follows the parenthesised command name
        stat.rsplit_once(')')?.1.trim_start().chars().next()
    }

    #[test]
    fn unpollable_child_has_its_group_killed() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("grandchild");
        let script = format!("sleep 30 & echo $! > '{}'; wait", pid_file.display());
        let child = spawn_shell(&script);
        let leader = Pid::from_raw(child.id() as i32);

        let started = Instant::now();
        let grandchild = loop {
            let pid = fs::read_to_string(&pid_file).unwrap_or_default();
            if !pid.trim().is_empty() {
                break pid.trim().to_string();
            }
            assert!(started.elapsed() < Duration::from_secs(5), "grandchild never started");
            thread::sleep(Duration::from_millis(20));
        };

        // reap the leader behind the supervisor's back so polling fails
        kill(leader, Signal::SIGKILL).unwrap();
        waitpid(leader, None).unwrap();

        let token = CancelToken::new();
        let err = Supervisor::new(child, &token, Duration::from_secs(5))
            .wait()
            .unwrap_err();
        assert_eq!(err.raw_os_error(), Some(nix::libc::ECHILD));

        let started = Instant::now();
        while !matches!(process_state(&grandchild), None | Some('Z')) {
            assert!(
                started.elapsed() < Duration::from_secs(5),
                "grandchild {grandchild} survived"
            );
            thread::sleep(Duration::from_millis(20));
        }
    }
}
