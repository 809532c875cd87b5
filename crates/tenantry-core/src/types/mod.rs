//! Core types for Tenantry

mod billing;
mod branding;
mod file;
mod settings;
mod tenant;
mod user;

pub use billing::*;
pub use branding::*;
pub use file::*;
pub use settings::*;
pub use tenant::*;
pub use user::*;

/// Fields the console does not edit, kept so full-record saves preserve them.
pub type Extra = serde_json::Map<String, serde_json::Value>;
