//! Platform-wide settings

use serde::{Deserialize, Serialize};

use super::{BrandingSettings, Extra};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettings {
    #[serde(default)]
    pub branding: BrandingSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_email: Option<String>,
    #[serde(default = "default_currency")]
    pub default_currency: String,
    #[serde(default)]
    pub maintenance_mode: bool,
    #[serde(default)]
    pub allow_self_signup: bool,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
    #[serde(flatten, default)]
    pub extra: Extra,
}

fn default_currency() -> String {
    crate::DEFAULT_CURRENCY.to_string()
}

fn default_max_upload_bytes() -> u64 {
    crate::DEFAULT_MAX_LOGO_BYTES
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            branding: BrandingSettings::default(),
            support_email: None,
            default_currency: default_currency(),
            maintenance_mode: false,
            allow_self_signup: false,
            max_upload_bytes: default_max_upload_bytes(),
            extra: Extra::new(),
        }
    }
}
