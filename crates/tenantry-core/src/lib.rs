//! Tenantry Core Library
//!
//! Domain records, form state, the file picker state machine and the page
//! controllers shared by the Tenantry admin console and CLI.

pub mod config;
pub mod console;
pub mod error;
pub mod forms;
pub mod picker;
pub mod store;
pub mod types;
pub mod utils;

pub use config::ConsoleConfig;
pub use error::{Error, FieldError, Result};

/// Tenantry version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default maximum logo size (2 MiB)
pub const DEFAULT_MAX_LOGO_BYTES: u64 = 2 * 1024 * 1024;

/// Default MIME filter for logo pickers
pub const DEFAULT_LOGO_TYPES: &str = "image/*";

/// Default API base path used by the browser console
pub const DEFAULT_API_BASE: &str = "/api/v1";

/// Default platform currency
pub const DEFAULT_CURRENCY: &str = "USD";
