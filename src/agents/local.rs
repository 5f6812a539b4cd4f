//! Stateless executors that run prompts as local child processes.
//!
//! Failures here are data, not errors: spawn problems, timeouts, and OS
//! errors all come back as the reply text. Transport layers rely on that
//! contract to tell a failed dispatch from an unhappy command, so keep it
//! in place even though the remote executor propagates instead.

use std::ffi::OsString;
use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;
use wait_timeout::ChildExt;

/// Hard cap on child process runtime
const EXEC_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs the prompt as a standalone Python program.
#[derive(Debug, Default)]
pub struct CodeExecutor;

impl CodeExecutor {
    pub fn execute(&self, prompt: &str) -> String {
        let mut cmd = Command::new(python_interpreter());
        cmd.arg("-c").arg(prompt);
        run_captured(cmd)
    }
}

/// Runs the prompt as a shell command line.
#[derive(Debug, Default)]
pub struct ShellExecutor;

impl ShellExecutor {
    pub fn execute(&self, prompt: &str) -> String {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(prompt);
        run_captured(cmd)
    }
}

fn python_interpreter() -> OsString {
    which::which("python3")
        .or_else(|_| which::which("python"))
        .map(|path| path.into_os_string())
        .unwrap_or_else(|_| OsString::from("python3"))
}

/// Spawn the command, wait with the timeout, and reduce captured output
/// to a reply: trimmed stdout if non-empty, else trimmed stderr, else
/// empty. A non-zero exit is not a failure.
fn run_captured(mut cmd: Command) -> String {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => return e.to_string(),
    };

    // Drain both pipes on their own threads so a chatty child cannot
    // deadlock against a full pipe buffer while we wait on it.
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    match child.wait_timeout(EXEC_TIMEOUT) {
        Ok(Some(_status)) => {}
        Ok(None) => {
            let _ = child.kill();
            let _ = child.wait();
            let _ = stdout.join();
            let _ = stderr.join();
            return format!("command timed out after {} seconds", EXEC_TIMEOUT.as_secs());
        }
        Err(e) => {
            let _ = child.kill();
            let _ = stdout.join();
            let _ = stderr.join();
            return e.to_string();
        }
    }

    let stdout = stdout.join().unwrap_or_default();
    let stderr = stderr.join().unwrap_or_default();

    let stdout = stdout.trim();
    if stdout.is_empty() {
        stderr.trim().to_string()
    } else {
        stdout.to_string()
    }
}

fn drain(pipe: Option<impl Read + Send + 'static>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buffer = String::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_string(&mut buffer);
        }
        buffer
    })
}
