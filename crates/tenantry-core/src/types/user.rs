//! Admin user types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Extra;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserRole {
    SuperAdmin,
    TenantAdmin,
    Staff,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "superAdmin",
            Self::TenantAdmin => "tenantAdmin",
            Self::Staff => "staff",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super admin",
            Self::TenantAdmin => "Tenant admin",
            Self::Staff => "Staff",
        }
    }

    /// Accepts wire names as well as the looser spellings found in CSV files.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "superadmin" => Some(Self::SuperAdmin),
            "tenantadmin" | "admin" => Some(Self::TenantAdmin),
            "staff" | "" => Some(Self::Staff),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(flatten, default)]
    pub extra: Extra,
}

fn default_active() -> bool {
    true
}

impl AdminUser {
    pub fn new(email: impl Into<String>, display_name: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.into(),
            display_name: display_name.into(),
            role,
            tenant_id: None,
            active: true,
            created_at: Utc::now(),
            extra: Extra::new(),
        }
    }

    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == UserRole::SuperAdmin
    }

    /// Whether this user may administer the given tenant.
    pub fn can_manage_tenant(&self, tenant_id: &str) -> bool {
        match self.role {
            UserRole::SuperAdmin => self.active,
            UserRole::TenantAdmin => self.active && self.tenant_id.as_deref() == Some(tenant_id),
            UserRole::Staff => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(UserRole::parse("Super Admin"), Some(UserRole::SuperAdmin));
        assert_eq!(UserRole::parse("tenant_admin"), Some(UserRole::TenantAdmin));
        assert_eq!(UserRole::parse(""), Some(UserRole::Staff));
        assert_eq!(UserRole::parse("owner"), None);
    }

    #[test]
    fn test_can_manage_tenant() {
        let root = AdminUser::new("root@example.com", "Root", UserRole::SuperAdmin);
        assert!(root.can_manage_tenant("any"));

        let mut disabled = root.clone();
        disabled.active = false;
        assert!(!disabled.can_manage_tenant("any"));

        let admin = AdminUser::new("a@acme.com", "A", UserRole::TenantAdmin).with_tenant("acme");
        assert!(admin.can_manage_tenant("acme"));
        assert!(!admin.can_manage_tenant("other"));

        let staff = AdminUser::new("s@acme.com", "S", UserRole::Staff).with_tenant("acme");
        assert!(!staff.can_manage_tenant("acme"));
    }
}
