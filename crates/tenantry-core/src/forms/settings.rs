use super::validate::{is_currency_code, is_email};
use super::{non_empty, BrandingAction, Editable};
use crate::types::GlobalSettings;
use crate::FieldError;

#[derive(Debug, Clone, PartialEq)]
pub enum GlobalSettingsAction {
    Branding(BrandingAction),
    SetSupportEmail(String),
    SetDefaultCurrency(String),
    SetMaintenanceMode(bool),
    SetAllowSelfSignup(bool),
    SetMaxUploadBytes(u64),
}

impl Editable for GlobalSettings {
    type Action = GlobalSettingsAction;

    fn apply(&mut self, action: GlobalSettingsAction) {
        match action {
            GlobalSettingsAction::Branding(action) => self.branding.apply(action),
            GlobalSettingsAction::SetSupportEmail(email) => self.support_email = non_empty(email),
            GlobalSettingsAction::SetDefaultCurrency(currency) => {
                self.default_currency = currency.trim().to_ascii_uppercase()
            }
            GlobalSettingsAction::SetMaintenanceMode(on) => self.maintenance_mode = on,
            GlobalSettingsAction::SetAllowSelfSignup(on) => self.allow_self_signup = on,
            GlobalSettingsAction::SetMaxUploadBytes(max) => self.max_upload_bytes = max,
        }
    }

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = self.branding.validate_with_prefix("branding.");
        if let Some(email) = &self.support_email {
            if !is_email(email) {
                errors.push(FieldError::new("supportEmail", "Enter a valid email address"));
            }
        }
        if !is_currency_code(&self.default_currency) {
            errors.push(FieldError::new(
                "defaultCurrency",
                "Use a three-letter currency code",
            ));
        }
        if self.max_upload_bytes == 0 {
            errors.push(FieldError::new(
                "maxUploadBytes",
                "Upload limit must be greater than zero",
            ));
        }
        errors
    }
}
