//! Form state
//!
//! Every editable record goes through a single [`FormState`] value. The
//! record's own action type describes field edits; [`FormAction`] adds the
//! save lifecycle around it. Validation runs after every edit so the page
//! can show field errors and gate the save button.

mod plan;
mod settings;
mod tenant;
mod user;
mod validate;

pub use plan::PlanAction;
pub use settings::GlobalSettingsAction;
pub use tenant::{BrandingAction, TenantAction};
pub use user::NewUser;
pub use validate::{is_currency_code, is_email, is_hex_color};

use crate::FieldError;

/// A record that can be edited through a form.
pub trait Editable: Clone + PartialEq {
    type Action;

    fn apply(&mut self, action: Self::Action);

    /// Field errors for the current values, empty when valid.
    fn validate(&self) -> Vec<FieldError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Saving,
    Saved,
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum FormAction<T: Editable> {
    Edit(T::Action),
    Reset,
    SaveStarted,
    SaveSucceeded(T),
    SaveFailed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState<T> {
    original: T,
    draft: T,
    errors: Vec<FieldError>,
    status: FormStatus,
}

impl<T: Editable> FormState<T> {
    pub fn new(record: T) -> Self {
        let errors = record.validate();
        Self {
            draft: record.clone(),
            original: record,
            errors,
            status: FormStatus::Idle,
        }
    }

    pub fn original(&self) -> &T {
        &self.original
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// First error message for a field, if any.
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.original
    }

    pub fn is_saving(&self) -> bool {
        self.status == FormStatus::Saving
    }

    pub fn can_save(&self) -> bool {
        self.is_dirty() && self.errors.is_empty() && !self.is_saving()
    }

    pub fn reduce(self, action: FormAction<T>) -> Self {
        match action {
            FormAction::Edit(edit) => {
                let mut draft = self.draft;
                draft.apply(edit);
                let errors = draft.validate();
                let status = match self.status {
                    FormStatus::Saving => FormStatus::Saving,
                    _ => FormStatus::Idle,
                };
                Self {
                    draft,
                    errors,
                    status,
                    ..self
                }
            }
            FormAction::Reset => Self {
                draft: self.original.clone(),
                errors: self.original.validate(),
                status: FormStatus::Idle,
                ..self
            },
            FormAction::SaveStarted => Self {
                status: FormStatus::Saving,
                ..self
            },
            FormAction::SaveSucceeded(saved) => Self {
                errors: saved.validate(),
                draft: saved.clone(),
                original: saved,
                status: FormStatus::Saved,
            },
            FormAction::SaveFailed(message) => Self {
                status: FormStatus::Failed(message),
                ..self
            },
        }
    }

    /// Apply a single field edit.
    pub fn edit(self, action: T::Action) -> Self {
        self.reduce(FormAction::Edit(action))
    }

    /// In-place variant of [`FormState::reduce`] for owners holding the form
    /// behind `&mut`.
    pub fn dispatch(&mut self, action: FormAction<T>) {
        *self = self.clone().reduce(action);
    }
}

/// Maps an empty (after trimming) input to `None`.
pub(crate) fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TenantKind, TenantProfile};

    fn form() -> FormState<TenantProfile> {
        FormState::new(TenantProfile::new("acme", "Acme Stores", TenantKind::Retail))
    }

    #[test]
    fn test_new_form_is_clean() {
        let form = form();
        assert!(!form.is_dirty());
        assert!(!form.can_save());
        assert_eq!(form.status(), &FormStatus::Idle);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_edit_marks_dirty_and_revalidates() {
        let form = form().edit(TenantAction::SetName("Acme Markets".into()));
        assert!(form.is_dirty());
        assert!(form.can_save());

        let form = form.edit(TenantAction::SetName("   ".into()));
        assert_eq!(form.error_for("name"), Some("Name is required"));
        assert!(!form.can_save());
    }

    #[test]
    fn test_reset_restores_original() {
        let form = form()
            .edit(TenantAction::Branding(BrandingAction::SetPrimaryColor("nope".into())))
            .reduce(FormAction::SaveFailed("boom".into()))
            .reduce(FormAction::Reset);
        assert!(!form.is_dirty());
        assert!(form.errors().is_empty());
        assert_eq!(form.status(), &FormStatus::Idle);
    }

    #[test]
    fn test_reset_keeps_errors_of_invalid_original() {
        let mut tenant = TenantProfile::new("acme", "Acme Stores", TenantKind::Retail);
        tenant.currency = "shillings".into();
        let form = FormState::new(tenant);
        assert!(form.error_for("currency").is_some());

        let form = form
            .edit(TenantAction::SetName("Acme Markets".into()))
            .reduce(FormAction::Reset);
        assert!(!form.is_dirty());
        assert!(form.error_for("currency").is_some());
    }

    #[test]
    fn test_save_lifecycle() {
        let form = form().edit(TenantAction::SetPhone("+254 700 000 000".into()));
        let form = form.reduce(FormAction::SaveStarted);
        assert!(form.is_saving());
        assert!(!form.can_save());

        let failed = form.clone().reduce(FormAction::SaveFailed("network down".into()));
        assert_eq!(failed.status(), &FormStatus::Failed("network down".into()));
        assert_eq!(failed.draft().phone.as_deref(), Some("+254 700 000 000"));
        assert!(failed.is_dirty());

        let saved_record = form.draft().clone();
        let saved = form.reduce(FormAction::SaveSucceeded(saved_record));
        assert_eq!(saved.status(), &FormStatus::Saved);
        assert!(!saved.is_dirty());
    }

    #[test]
    fn test_edit_after_save_returns_to_idle() {
        let form = form()
            .edit(TenantAction::SetActive(false))
            .reduce(FormAction::SaveStarted);
        let saved = form.draft().clone();
        let form = form
            .reduce(FormAction::SaveSucceeded(saved))
            .edit(TenantAction::SetActive(true));
        assert_eq!(form.status(), &FormStatus::Idle);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  ".into()), None);
        assert_eq!(non_empty(" a ".into()), Some("a".into()));
    }
}
