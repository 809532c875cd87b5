//! Billing plan and invoice types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Extra;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BillingInterval {
    Monthly,
    Yearly,
}

impl BillingInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "monthly" | "month" => Some(Self::Monthly),
            "yearly" | "year" | "annual" => Some(Self::Yearly),
            _ => None,
        }
    }
}

impl Default for BillingInterval {
    fn default() -> Self {
        Self::Monthly
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingPlan {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price_cents: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub interval: BillingInterval,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_users: Option<u32>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(flatten, default)]
    pub extra: Extra,
}

fn default_currency() -> String {
    crate::DEFAULT_CURRENCY.to_string()
}

fn default_active() -> bool {
    true
}

impl BillingPlan {
    pub fn new(name: impl Into<String>, price_cents: i64, interval: BillingInterval) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            price_cents,
            currency: default_currency(),
            interval,
            features: Vec::new(),
            max_users: None,
            active: true,
            extra: Extra::new(),
        }
    }

    /// Price as shown in the console, e.g. `USD 19.99 / monthly`.
    pub fn display_price(&self) -> String {
        format!(
            "{} {} / {}",
            self.currency,
            format_cents(self.price_cents),
            self.interval.as_str()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvoiceStatus {
    Draft,
    Open,
    Paid,
    Void,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Open => "open",
            Self::Paid => "paid",
            Self::Void => "void",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub tenant_id: String,
    pub plan_id: String,
    pub amount_cents: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub status: InvoiceStatus,
    pub issued_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(flatten, default)]
    pub extra: Extra,
}

/// Format an amount in cents as `units.cents`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Parse a non-negative decimal amount such as `19.99` or `5` into cents.
pub fn parse_cents(text: &str) -> Option<i64> {
    let text = text.trim();
    let (units, fraction) = text.split_once('.').unwrap_or((text, ""));
    if units.is_empty() && fraction.is_empty() {
        return None;
    }
    if fraction.len() > 2 || !units.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }
    let units: i64 = if units.is_empty() { 0 } else { units.parse().ok()? };
    let fraction: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse().ok()?,
    };
    units.checked_mul(100)?.checked_add(fraction)
}
