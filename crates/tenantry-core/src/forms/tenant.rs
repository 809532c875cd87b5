use super::validate::{is_currency_code, is_email, is_hex_color};
use super::{non_empty, Editable};
use crate::types::{BrandingSettings, TenantKind, TenantProfile};
use crate::FieldError;

#[derive(Debug, Clone, PartialEq)]
pub enum BrandingAction {
    SetDisplayName(String),
    SetPrimaryColor(String),
    SetSecondaryColor(String),
    SetSlogan(String),
    SetLogoUrl(Option<String>),
}

impl BrandingSettings {
    pub fn apply(&mut self, action: BrandingAction) {
        match action {
            BrandingAction::SetDisplayName(name) => self.display_name = name,
            BrandingAction::SetPrimaryColor(color) => self.primary_color = color.trim().to_string(),
            BrandingAction::SetSecondaryColor(color) => {
                self.secondary_color = color.trim().to_string()
            }
            BrandingAction::SetSlogan(slogan) => self.slogan = non_empty(slogan),
            BrandingAction::SetLogoUrl(url) => self.logo_url = url.and_then(non_empty),
        }
    }

    /// Field errors, with names prefixed by `prefix` (e.g. `branding.`).
    pub fn validate_with_prefix(&self, prefix: &str) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.display_name.trim().is_empty() {
            errors.push(FieldError::new(
                format!("{}displayName", prefix),
                "Display name is required",
            ));
        }
        if !is_hex_color(&self.primary_color) {
            errors.push(FieldError::new(
                format!("{}primaryColor", prefix),
                "Must be a hex color like #2563eb",
            ));
        }
        if !is_hex_color(&self.secondary_color) {
            errors.push(FieldError::new(
                format!("{}secondaryColor", prefix),
                "Must be a hex color like #1f2937",
            ));
        }
        errors
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TenantAction {
    SetName(String),
    SetKind(TenantKind),
    SetContactEmail(String),
    SetPhone(String),
    SetAddress(String),
    SetCurrency(String),
    SetActive(bool),
    Branding(BrandingAction),
}

impl Editable for TenantProfile {
    type Action = TenantAction;

    fn apply(&mut self, action: TenantAction) {
        match action {
            TenantAction::SetName(name) => self.name = name,
            TenantAction::SetKind(kind) => self.kind = kind,
            TenantAction::SetContactEmail(email) => self.contact_email = non_empty(email),
            TenantAction::SetPhone(phone) => self.phone = non_empty(phone),
            TenantAction::SetAddress(address) => self.address = non_empty(address),
            TenantAction::SetCurrency(currency) => {
                self.currency = currency.trim().to_ascii_uppercase()
            }
            TenantAction::SetActive(active) => self.active = active,
            TenantAction::Branding(action) => self.branding.apply(action),
        }
    }

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }
        if let Some(email) = &self.contact_email {
            if !is_email(email) {
                errors.push(FieldError::new("contactEmail", "Enter a valid email address"));
            }
        }
        if !is_currency_code(&self.currency) {
            errors.push(FieldError::new("currency", "Use a three-letter currency code"));
        }
        errors.extend(self.branding.validate_with_prefix("branding."));
        errors
    }
}
