use crate::agents::executor::Executor;
use crate::agents::remote::RemoteModelExecutor;
use crate::agents::session::Session;
use crate::cli::ModelFlags;
use crate::commands::with_spinner;
use crate::error::Result;

/// Ask once and print the reply.
pub fn execute(prompt: &str, flags: &ModelFlags) -> Result<()> {
    let executor = Executor::Remote(RemoteModelExecutor::new(flags.to_spec()?)?);
    let mut session = Session::new(executor);

    let reply = with_spinner("waiting for reply", || session.ask(prompt))?;
    println!("{}", reply);

    Ok(())
}
