//! Thin wrapper around `git ls-remote`.
//!
//! This uses the system git command, which automatically handles:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Personal access tokens
//! - Any authentication configured in ~/.gitconfig
//!
//! Interactive credential prompts are disabled so an inaccessible private
//! repository fails instead of waiting for input until the timeout fires.

use std::io::{ErrorKind, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};

use log::debug;

use crate::error::{Error, Result};

/// Exit status used by `git ls-remote --exit-code` when no matching refs were found.
pub const LS_REMOTE_NO_MATCH: i32 = 2;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// One line of `git ls-remote` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRef {
    pub object_id: String,
    pub name: String,
}

/// Result of a finished (or abandoned) `git ls-remote` call.
#[derive(Debug, Clone, Default)]
pub struct LsRemote {
    /// Exit code, `None` when the process was killed by a signal or timed out.
    pub exit_code: Option<i32>,
    pub refs: Vec<RemoteRef>,
    pub stderr: String,
    pub timed_out: bool,
}

impl LsRemote {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Output of a child process run under a deadline.
#[derive(Debug)]
pub(crate) struct BoundedOutput {
    pub status: Option<ExitStatus>,
    pub stdout: String,
    pub stderr: String,
}

/// List refs of `url` matching `pattern`, giving up after `timeout`.
///
/// Runs `git ls-remote --exit-code <url> <pattern>`. Failing to start `git`
/// at all is an error; everything else (non-zero exit, timeout) is reported
/// in the returned [`LsRemote`] for the caller to classify.
pub fn ls_remote(url: &str, pattern: &str, timeout: Duration) -> Result<LsRemote> {
    debug!("git ls-remote --exit-code {} {}", url, pattern);

    let mut command = Command::new("git");
    command
        .args(["ls-remote", "--exit-code", url, pattern])
        .env("GIT_TERMINAL_PROMPT", "0");

    let output = run_bounded(command, timeout).map_err(|e| Error::GitCommand {
        command: "ls-remote".to_string(),
        url: url.to_string(),
        stderr: e.to_string(),
    })?;

    let timed_out = output.status.is_none();
    Ok(LsRemote {
        exit_code: output.status.and_then(|s| s.code()),
        refs: parse_refs(&output.stdout),
        stderr: output.stderr.trim().to_string(),
        timed_out,
    })
}

/// Parse `<object-id>\t<ref>` lines, ignoring anything malformed.
pub fn parse_refs(stdout: &str) -> Vec<RemoteRef> {
    stdout
        .lines()
        .filter_map(|line| {
            let (object_id, name) = line.split_once('\t')?;
            let (object_id, name) = (object_id.trim(), name.trim());
            if object_id.is_empty() || name.is_empty() {
                return None;
            }
            Some(RemoteRef {
                object_id: object_id.to_string(),
                name: name.to_string(),
            })
        })
        .collect()
}

/// Spawn `command` and wait at most `timeout` for it to exit.
///
/// The child is killed once the deadline passes, in which case `status` is
/// `None`. Pipes are drained on helper threads so a chatty child can't block
/// on a full pipe buffer. The same deadline bounds draining: helpers spawned
/// by git (an ssh control master, a `git-remote-*` process) can keep the pipes
/// open after git itself exits, and then only what was read before the
/// deadline is returned.
pub(crate) fn run_bounded(mut command: Command, timeout: Duration) -> std::io::Result<BoundedOutput> {
    let deadline = Instant::now() + timeout;
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let (done_tx, done_rx) = mpsc::channel();
    let stdout = drain(child.stdout.take(), done_tx.clone());
    let stderr = drain(child.stderr.take(), done_tx);

    let status = wait_with_deadline(&mut child, deadline)?;

    if status.is_some() {
        for _ in 0..2 {
            // A child exiting right at the deadline still gets one poll
            // interval for its pipes to close.
            let remaining = deadline.saturating_duration_since(Instant::now()).max(POLL_INTERVAL);
            if done_rx.recv_timeout(remaining).is_err() {
                debug!("output pipes still open at the deadline, keeping partial output");
                break;
            }
        }
    }

    Ok(BoundedOutput {
        status,
        stdout: take_text(&stdout),
        stderr: take_text(&stderr),
    })
}

type SharedBuf = Arc<Mutex<Vec<u8>>>;

/// Copy `pipe` into a shared buffer on a detached thread, signalling `done` at EOF.
fn drain<R: Read + Send + 'static>(pipe: Option<R>, done: Sender<()>) -> SharedBuf {
    let buf = SharedBuf::default();
    let sink = Arc::clone(&buf);
    thread::spawn(move || {
        if let Some(mut pipe) = pipe {
            let mut chunk = [0u8; 4096];
            loop {
                match pipe.read(&mut chunk) {
                    Ok(0) => break,
                    Ok(n) => lock(&sink).extend_from_slice(&chunk[..n]),
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(_) => break,
                }
            }
        }
        let _ = done.send(());
    });
    buf
}

fn take_text(buf: &SharedBuf) -> String {
    String::from_utf8_lossy(&std::mem::take(&mut *lock(buf))).into_owned()
}

fn lock(buf: &SharedBuf) -> MutexGuard<'_, Vec<u8>> {
    buf.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn wait_with_deadline(child: &mut Child, deadline: Instant) -> std::io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        let now = Instant::now();
        if now >= deadline {
            // The child may have exited between try_wait and kill.
            let _ = child.kill();
            child.wait()?;
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}
