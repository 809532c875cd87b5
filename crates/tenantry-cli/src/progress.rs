//! Progress spinners for remote calls

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Create a spinner for operations without known size
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// A spinner that draws nothing, for quiet and JSON output
pub fn hidden_spinner() -> ProgressBar {
    ProgressBar::hidden()
}

/// Stop a spinner and leave `message` in its place
pub fn finish(pb: &ProgressBar, message: &str) {
    if pb.is_hidden() {
        pb.finish_and_clear();
    } else {
        pb.finish_with_message(message.to_string());
    }
}
