//! Branding types

use serde::{Deserialize, Serialize};

/// Display identity of a tenant or of the platform itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingSettings {
    pub display_name: String,
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default = "default_secondary_color")]
    pub secondary_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slogan: Option<String>,
}

fn default_primary_color() -> String {
    "#2563eb".to_string()
}

fn default_secondary_color() -> String {
    "#1f2937".to_string()
}

impl BrandingSettings {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            primary_color: default_primary_color(),
            secondary_color: default_secondary_color(),
            logo_url: None,
            slogan: None,
        }
    }

    /// Initials shown when no logo is configured.
    pub fn initials(&self) -> String {
        let initials: String = self
            .display_name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() {
            "?".to_string()
        } else {
            initials
        }
    }
}

impl Default for BrandingSettings {
    fn default() -> Self {
        Self::new("Tenantry")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(BrandingSettings::new("Sunrise savings group").initials(), "SS");
        assert_eq!(BrandingSettings::new("acme").initials(), "A");
        assert_eq!(BrandingSettings::new("  ").initials(), "?");
    }

    #[test]
    fn test_defaults_fill_missing_colors() {
        let branding: BrandingSettings =
            serde_json::from_str(r#"{"displayName":"Acme"}"#).unwrap();
        assert_eq!(branding.primary_color, "#2563eb");
        assert!(branding.logo_url.is_none());

        let json = serde_json::to_value(&branding).unwrap();
        assert!(json.get("logoUrl").is_none());
    }
}
