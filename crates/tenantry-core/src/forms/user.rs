use super::validate::is_email;
use crate::types::{AdminUser, UserRole};
use crate::FieldError;

/// Input for creating an admin user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    pub tenant_id: Option<String>,
}

impl NewUser {
    pub fn new(email: impl Into<String>, display_name: impl Into<String>, role: UserRole) -> Self {
        Self {
            email: email.into(),
            display_name: display_name.into(),
            role,
            tenant_id: None,
        }
    }

    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if !is_email(self.email.trim()) {
            errors.push(FieldError::new("email", "Enter a valid email address"));
        }
        if self.role != UserRole::SuperAdmin && self.tenant_id.is_none() {
            errors.push(FieldError::new("tenantId", "Tenant users need a tenant"));
        }
        errors
    }

    /// Builds the record, falling back to the email's local part for a
    /// missing display name.
    pub fn into_user(self) -> AdminUser {
        let email = self.email.trim().to_ascii_lowercase();
        let display_name = match self.display_name.trim() {
            "" => email.split('@').next().unwrap_or_default().to_string(),
            name => name.to_string(),
        };
        let user = AdminUser::new(email, display_name, self.role);
        match self.tenant_id {
            Some(tenant_id) if self.role != UserRole::SuperAdmin => user.with_tenant(tenant_id),
            _ => user,
        }
    }
}
