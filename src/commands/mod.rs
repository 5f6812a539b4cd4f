//! One file per CLI subcommand.

pub mod chat;
pub mod run;
pub mod serve;
pub mod tui;

use indicatif::ProgressBar;
use std::time::Duration;

/// Show a spinner on stderr while a blocking call is in flight.
pub(crate) fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    let result = f();
    spinner.finish_and_clear();
    result
}
