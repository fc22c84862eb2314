use crate::output::Output;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// Busy indicator shown while waiting on TMDb or the library
pub struct Busy {
    spinner: Option<ProgressBar>,
}

impl Busy {
    pub fn start(output: &Output, message: &str) -> Self {
        if !output.is_human() || output.is_quiet() || !is_interactive() {
            tracing::info!(operation = "progress", message, "Working");
            return Self { spinner: None };
        }

        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner: Some(spinner) }
    }

    pub fn finish(self) {
        if let Some(spinner) = self.spinner {
            spinner.finish_and_clear();
        }
    }
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
