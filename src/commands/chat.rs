use crate::agents::executor::Executor;
use crate::agents::remote::RemoteModelExecutor;
use crate::agents::session::Session;
use crate::cli::ModelFlags;
use crate::commands::with_spinner;
use crate::error::Result;
use std::io::Write;

/// Line-based chat loop. Empty lines are skipped; `exit` or `quit` ends
/// the session, as does end-of-input.
pub fn execute(flags: &ModelFlags) -> Result<()> {
    let executor = Executor::Remote(RemoteModelExecutor::new(flags.to_spec()?)?);
    let mut session = Session::new(executor);

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }

        let prompt = line.trim();
        if prompt.is_empty() {
            continue;
        }
        if prompt.eq_ignore_ascii_case("exit") || prompt.eq_ignore_ascii_case("quit") {
            break;
        }

        let reply = with_spinner("waiting for reply", || session.ask(prompt))?;
        println!("{}", reply);
    }

    Ok(())
}
