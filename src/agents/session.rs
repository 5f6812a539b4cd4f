//! Conversation-state wrapper around a single executor.

use crate::agents::executor::Executor;
use crate::error::Result;

/// One stateful conversation with one executor.
///
/// The first `ask` starts a new conversational context; subsequent asks
/// continue it until [`Session::reset`]. Stateless executors ignore the
/// context flag but still get the uniform session surface so registry
/// dispatch never cares what is behind a name.
pub struct Session {
    pub(crate) executor: Executor,
    fresh: bool,
}

impl Session {
    pub fn new(executor: Executor) -> Self {
        Self {
            executor,
            fresh: true,
        }
    }

    /// Send one prompt and return the reply.
    ///
    /// The conversation counts as started once an attempt has been made:
    /// the flag is cleared before the call, so a failed ask will not make
    /// the next one reset context again.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        let reset_context = std::mem::replace(&mut self.fresh, false);
        self.executor.execute(prompt, reset_context)
    }

    /// Start a new conversational context on the next ask.
    pub fn reset(&mut self) {
        self.fresh = true;
    }
}
