//! The closed set of executors behind every session.

use crate::agents::local::{CodeExecutor, ShellExecutor};
use crate::agents::remote::RemoteModelExecutor;
use crate::error::Result;

/// A capability that turns one prompt into one reply.
///
/// Kind selection happens in the builder; everything downstream goes
/// through [`Executor::execute`] without branching on the variant.
pub enum Executor {
    /// Stateful, multi-turn, backed by a remote chat endpoint
    Remote(RemoteModelExecutor),
    /// Stateless, runs the prompt as a Python program
    Code(CodeExecutor),
    /// Stateless, runs the prompt as a shell command line
    Shell(ShellExecutor),
    #[cfg(test)]
    Recording(RecordingExecutor),
}

impl Executor {
    /// Run one prompt. `reset_context` starts a new conversation on
    /// stateful executors; stateless ones ignore it.
    ///
    /// Local executors never fail: launch and timeout problems come back
    /// as reply text. Remote failures propagate.
    pub fn execute(&mut self, prompt: &str, reset_context: bool) -> Result<String> {
        match self {
            Executor::Remote(remote) => remote.execute(prompt, reset_context),
            Executor::Code(code) => Ok(code.execute(prompt)),
            Executor::Shell(shell) => Ok(shell.execute(prompt)),
            #[cfg(test)]
            Executor::Recording(recording) => Ok(recording.execute(prompt, reset_context)),
        }
    }
}

/// Test stand-in that records every `(prompt, reset_context)` pair and
/// answers with a canned reply.
#[cfg(test)]
pub struct RecordingExecutor {
    pub calls: Vec<(String, bool)>,
    pub reply: String,
}

#[cfg(test)]
impl RecordingExecutor {
    pub fn replying(reply: &str) -> Self {
        Self {
            calls: Vec::new(),
            reply: reply.to_string(),
        }
    }

    fn execute(&mut self, prompt: &str, reset_context: bool) -> String {
        self.calls.push((prompt.to_string(), reset_context));
        self.reply.clone()
    }
}
