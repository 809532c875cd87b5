//! CLI command implementations

pub mod configure;
pub mod csv;
pub mod data_url;
pub mod plans;
pub mod settings;
pub mod tenant;
pub mod users;

use std::rc::Rc;

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::ProgressBar;
use serde::Serialize;
use tenantry_core::console::ConsoleContext;
use tenantry_core::picker::{LocalFile, PickedFile, PickerEffect, PickerEvent, PickerState};
use tenantry_core::store::{DocumentStore, NotificationLevel, Notifier};
use tenantry_core::types::FilePayload;
use tenantry_core::ConsoleConfig;
use tracing::debug;

use crate::config;
use crate::progress;
use crate::remote::RemoteStore;
use crate::OutputFormat;

/// Context passed to all commands
pub struct CommandContext {
    pub config: ConsoleConfig,
    pub output_format: OutputFormat,
    pub verbose: bool,
    pub quiet: bool,
}

impl CommandContext {
    /// Check if output should be JSON
    pub fn is_json(&self) -> bool {
        matches!(self.output_format, OutputFormat::Json)
    }

    /// Print info message if not quiet
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg);
        }
    }

    /// Print verbose message if verbose mode
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            eprintln!("[DEBUG] {}", msg);
        }
    }

    /// Print error message
    pub fn error(&self, msg: &str) {
        eprintln!("{}", msg);
    }

    /// Pretty-print a value as JSON on stdout
    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Spinner for a remote call, hidden when output is quiet or JSON
    pub fn spinner(&self, message: &str) -> ProgressBar {
        if self.quiet || self.is_json() {
            progress::hidden_spinner()
        } else {
            progress::create_spinner(message)
        }
    }

    /// Open a session against the configured backend
    pub async fn connect(&self) -> Result<ConsoleContext> {
        config::validate_remote(&self.config)?;
        let store = Rc::new(RemoteStore::new(&self.config)?);
        let pb = self.spinner("Signing in...");
        let user = store
            .current_user()
            .await
            .with_context(|| format!("Could not sign in to {}", self.config.api.base_url))?;
        pb.finish_and_clear();
        debug!(user = %user.email, role = user.role.as_str(), "Session opened");
        self.debug(&format!("Signed in as {} ({})", user.email, user.role.label()));

        Ok(ConsoleContext::new(
            store.clone(),
            store,
            Rc::new(TerminalNotifier {
                quiet: self.quiet || self.is_json(),
            }),
            user,
            self.config.clone(),
        ))
    }
}

/// Prints console notifications to stderr
pub struct TerminalNotifier {
    quiet: bool,
}

impl Notifier for TerminalNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        // Failures come back as the command's error and are printed once by main.
        if level == NotificationLevel::Error {
            debug!(notification = %message, "Error notification");
            return;
        }
        if self.quiet {
            return;
        }
        let line = match level {
            NotificationLevel::Success => format!("{} {}", "✓".green(), message),
            NotificationLevel::Warning => format!("{} {}", "!".yellow(), message.yellow()),
            _ => format!("{} {}", "i".blue(), message),
        };
        eprintln!("{}", line);
    }
}

/// Run a local file through the logo picker.
///
/// Returns the payload to upload once the picker accepts the file, or the
/// picker's inline error otherwise.
pub(crate) async fn pick_logo(
    console: &ConsoleContext,
    existing_url: Option<String>,
    path: &str,
) -> Result<FilePayload> {
    let max = console.config.uploads.max_logo_bytes;
    let file = match LocalFile::open_within(path, max).await {
        Ok(file) => file,
        Err(err @ tenantry_core::Error::SizeExceeded { .. }) => return Err(err.into()),
        Err(err) => return Err(anyhow::Error::new(err).context(format!("Failed to read {}", path))),
    };
    if !file.is_image() {
        anyhow::bail!("{} is not an image ({})", path, file.mime_type());
    }

    let picker = PickerState::new(console.logo_picker_options(), existing_url);
    let transition = picker.reduce(PickerEvent::Select(file));
    let mut state = transition.state;
    let mut pending = None;
    for effect in transition.effects {
        match effect {
            PickerEffect::Selected(file) => pending = Some(file),
            PickerEffect::StartDecode(file) => {
                state = state
                    .reduce(PickerEvent::DecodeFinished(Ok(file.to_data_url())))
                    .state;
            }
            PickerEffect::Cleared | PickerEffect::ResetInput => {}
        }
    }

    if let Some(err) = state.error() {
        anyhow::bail!("{}", err);
    }
    let file = pending.context("The picker did not accept the file")?;
    debug!(
        name = file.name(),
        size = file.size(),
        preview_len = state.preview().map(str::len).unwrap_or(0),
        "Logo picked"
    );
    Ok(file.into_payload())
}

/// Render `yes`/`no` with color
pub(crate) fn yes_no(value: bool) -> String {
    if value {
        "yes".green().to_string()
    } else {
        "no".red().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenantry_core::store::MemoryStore;
    use tenantry_core::types::{AdminUser, UserRole};

    fn console(max_logo_bytes: u64) -> ConsoleContext {
        let store = Rc::new(MemoryStore::new());
        let mut config = ConsoleConfig::default();
        config.uploads.max_logo_bytes = max_logo_bytes;
        ConsoleContext::new(
            store.clone(),
            store,
            Rc::new(TerminalNotifier { quiet: true }),
            AdminUser::new("root@tenantry.io", "Root", UserRole::SuperAdmin),
            config,
        )
    }

    #[tokio::test]
    async fn test_pick_logo_accepts_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, [137, 80, 78, 71]).unwrap();

        let payload = pick_logo(&console(1024), None, path.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(payload.name, "logo.png");
        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(payload.size(), 4);
    }

    #[tokio::test]
    async fn test_pick_logo_rejects_oversized_and_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let big = dir.path().join("big.png");
        std::fs::write(&big, vec![0u8; 2048]).unwrap();
        let err = pick_logo(&console(1024), None, big.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("File is too large"));

        let text = dir.path().join("notes.txt");
        std::fs::write(&text, "hello").unwrap();
        let err = pick_logo(&console(1024), None, text.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("is not an image"));

        let sparse = dir.path().join("disk.png");
        std::fs::File::create(&sparse)
            .unwrap()
            .set_len(4 * 1024 * 1024 * 1024)
            .unwrap();
        let err = pick_logo(&console(1024), None, sparse.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("File is too large"));

        let missing = dir.path().join("missing.png");
        assert!(pick_logo(&console(1024), None, missing.to_str().unwrap())
            .await
            .is_err());
    }
}
