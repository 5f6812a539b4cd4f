use crate::agents::executor::Executor;
use crate::agents::remote::RemoteModelExecutor;
use crate::agents::session::Session;
use crate::cli::ModelFlags;
use crate::error::Result;

/// Launch the full-screen chat interface over one session.
pub fn execute(flags: &ModelFlags) -> Result<()> {
    let executor = Executor::Remote(RemoteModelExecutor::new(flags.to_spec()?)?);
    crate::tui::run(Session::new(executor))
}
