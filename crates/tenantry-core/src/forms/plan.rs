use super::validate::is_currency_code;
use super::{non_empty, Editable};
use crate::types::{BillingInterval, BillingPlan};
use crate::FieldError;

#[derive(Debug, Clone, PartialEq)]
pub enum PlanAction {
    SetName(String),
    SetDescription(String),
    SetPriceCents(i64),
    SetCurrency(String),
    SetInterval(BillingInterval),
    AddFeature(String),
    RemoveFeature(usize),
    SetMaxUsers(Option<u32>),
    SetActive(bool),
}

impl Editable for BillingPlan {
    type Action = PlanAction;

    fn apply(&mut self, action: PlanAction) {
        match action {
            PlanAction::SetName(name) => self.name = name,
            PlanAction::SetDescription(description) => self.description = non_empty(description),
            PlanAction::SetPriceCents(cents) => self.price_cents = cents,
            PlanAction::SetCurrency(currency) => self.currency = currency.trim().to_ascii_uppercase(),
            PlanAction::SetInterval(interval) => self.interval = interval,
            PlanAction::AddFeature(feature) => {
                if let Some(feature) = non_empty(feature) {
                    if !self.features.contains(&feature) {
                        self.features.push(feature);
                    }
                }
            }
            PlanAction::RemoveFeature(index) => {
                if index < self.features.len() {
                    self.features.remove(index);
                }
            }
            PlanAction::SetMaxUsers(max) => self.max_users = max,
            PlanAction::SetActive(active) => self.active = active,
        }
    }

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "Plan name is required"));
        }
        if self.price_cents < 0 {
            errors.push(FieldError::new("priceCents", "Price cannot be negative"));
        }
        if !is_currency_code(&self.currency) {
            errors.push(FieldError::new("currency", "Use a three-letter currency code"));
        }
        if self.max_users == Some(0) {
            errors.push(FieldError::new("maxUsers", "Leave empty for unlimited users"));
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_list_edits() {
        let mut plan = BillingPlan::new("Growth", 4900, BillingInterval::Monthly);
        plan.apply(PlanAction::AddFeature("Custom branding".into()));
        plan.apply(PlanAction::AddFeature("Custom branding".into()));
        plan.apply(PlanAction::AddFeature(" ".into()));
        plan.apply(PlanAction::AddFeature("CSV import".into()));
        assert_eq!(plan.features, vec!["Custom branding", "CSV import"]);

        plan.apply(PlanAction::RemoveFeature(0));
        plan.apply(PlanAction::RemoveFeature(9));
        assert_eq!(plan.features, vec!["CSV import"]);
    }

    #[test]
    fn test_plan_validation() {
        let mut plan = BillingPlan::new("Free", 0, BillingInterval::Monthly);
        assert!(plan.validate().is_empty());

        plan.apply(PlanAction::SetPriceCents(-1));
        plan.apply(PlanAction::SetName("".into()));
        plan.apply(PlanAction::SetMaxUsers(Some(0)));
        let fields: Vec<_> = plan.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "priceCents", "maxUsers"]);
    }
}
