//! Tenant types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BrandingSettings, Extra};

/// Kind of business a tenant runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TenantKind {
    Retail,
    SavingsGroup,
    Lender,
}

impl TenantKind {
    pub const ALL: [TenantKind; 3] = [Self::Retail, Self::SavingsGroup, Self::Lender];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retail => "retail",
            Self::SavingsGroup => "savingsGroup",
            Self::Lender => "lender",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Retail => "Retail business",
            Self::SavingsGroup => "Savings group",
            Self::Lender => "Lending entity",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str().eq_ignore_ascii_case(s))
    }
}

impl Default for TenantKind {
    fn default() -> Self {
        Self::Retail
    }
}

/// A registered business or group and its profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: TenantKind,
    pub branding: BrandingSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten, default)]
    pub extra: Extra,
}

fn default_currency() -> String {
    crate::DEFAULT_CURRENCY.to_string()
}

fn default_active() -> bool {
    true
}

impl TenantProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: TenantKind) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            branding: BrandingSettings::new(name.clone()),
            name,
            kind,
            contact_email: None,
            phone: None,
            address: None,
            currency: default_currency(),
            active: true,
            updated_at: None,
            extra: Extra::new(),
        }
    }
}
