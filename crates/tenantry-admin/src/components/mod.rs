//! Reusable UI components

mod button;
mod file_uploader;
mod form;
mod header;
mod modal;
mod sidebar;
mod stats;
mod table;
mod toast;

pub use button::{Button, ButtonVariant, IconButton};
pub use file_uploader::FileUploader;
pub use form::{ColorField, FieldError, SelectField, SettingsCard, Tabs, TextField, ToggleField};
pub use header::Header;
pub use modal::{ConfirmModal, Modal};
pub use sidebar::Sidebar;
pub use stats::StatCard;
pub use table::{Table, TableEmpty, TableHeader, TableLoading};
pub use toast::{ToastHost, ToastNotifier};
