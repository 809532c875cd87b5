use tracing::info;

use super::ConsoleContext;
use crate::forms::{Editable, FormAction, FormState};
use crate::types::{BillingPlan, Invoice, UserRole};
use crate::{Error, Result};

/// Billing plans and invoices.
///
/// Anyone with administrative access can read plans; only super admins
/// change them.
#[derive(Clone)]
pub struct BillingPage {
    ctx: ConsoleContext,
    plans: Vec<BillingPlan>,
}

impl BillingPage {
    pub async fn load(ctx: ConsoleContext) -> Result<Self> {
        if ctx.user.role == UserRole::Staff || !ctx.user.active {
            return Err(Error::Forbidden(format!(
                "{} cannot view billing",
                ctx.user.email
            )));
        }
        let plans = ctx.store.list_plans().await?;
        Ok(Self { ctx, plans })
    }

    pub fn plans(&self) -> &[BillingPlan] {
        &self.plans
    }

    pub fn plan(&self, id: &str) -> Option<&BillingPlan> {
        self.plans.iter().find(|p| p.id == id)
    }

    /// A form for editing an existing plan.
    pub fn edit_plan(&self, id: &str) -> Result<FormState<BillingPlan>> {
        self.plan(id)
            .cloned()
            .map(FormState::new)
            .ok_or_else(|| Error::NotFound(format!("plan {}", id)))
    }

    pub async fn create_plan(&mut self, plan: BillingPlan) -> Result<BillingPlan> {
        let result = match self.check_plan(&plan) {
            Ok(()) => self.ctx.store.create_plan(&plan).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(created) => {
                info!(plan = %created.id, name = %created.name, "Plan created");
                self.plans.push(created.clone());
                self.plans.sort_by_key(|p| p.price_cents);
                self.ctx
                    .notifier
                    .success(&format!("Plan {} created", created.name));
                Ok(created)
            }
            Err(err) => self.ctx.report_failure("Could not create plan", err),
        }
    }

    /// Save an edited plan form, updating its status along the way.
    pub async fn update_plan(&mut self, form: &mut FormState<BillingPlan>) -> Result<BillingPlan> {
        if let Err(err) = self.check_plan(form.draft()) {
            return self.ctx.report_failure("Could not save plan", err);
        }

        form.dispatch(FormAction::SaveStarted);
        match self.ctx.store.update_plan(form.draft()).await {
            Ok(saved) => {
                form.dispatch(FormAction::SaveSucceeded(saved.clone()));
                self.replace(saved.clone());
                self.ctx
                    .notifier
                    .success(&format!("Plan {} saved", saved.name));
                Ok(saved)
            }
            Err(err) => {
                form.dispatch(FormAction::SaveFailed(err.to_string()));
                self.ctx.report_failure("Could not save plan", err)
            }
        }
    }

    pub async fn set_plan_active(&mut self, id: &str, active: bool) -> Result<BillingPlan> {
        let result = match (self.ctx.require_super_admin(), self.plan(id)) {
            (Err(err), _) => Err(err),
            (Ok(()), None) => Err(Error::NotFound(format!("plan {}", id))),
            (Ok(()), Some(plan)) => {
                let mut plan = plan.clone();
                plan.active = active;
                self.ctx.store.update_plan(&plan).await
            }
        };
        match result {
            Ok(saved) => {
                self.replace(saved.clone());
                let verb = if active { "activated" } else { "deactivated" };
                self.ctx
                    .notifier
                    .success(&format!("Plan {} {}", saved.name, verb));
                Ok(saved)
            }
            Err(err) => self.ctx.report_failure("Could not update plan", err),
        }
    }

    pub async fn delete_plan(&mut self, id: &str) -> Result<()> {
        let result = match self.ctx.require_super_admin() {
            Ok(()) => self.ctx.store.delete_plan(id).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(()) => {
                info!(plan = %id, "Plan deleted");
                self.plans.retain(|p| p.id != id);
                self.ctx.notifier.success("Plan deleted");
                Ok(())
            }
            Err(err) => self.ctx.report_failure("Could not delete plan", err),
        }
    }

    /// Invoices of one tenant. Tenant admins only see their own.
    pub async fn invoices(&self, tenant_id: Option<&str>) -> Result<Vec<Invoice>> {
        let scope = self.ctx.tenant_scope(tenant_id)?;
        self.ctx.store.list_invoices(scope.as_deref()).await
    }

    fn check_plan(&self, plan: &BillingPlan) -> Result<()> {
        self.ctx.require_super_admin()?;
        let errors = plan.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(errors))
        }
    }

    fn replace(&mut self, plan: BillingPlan) {
        match self.plans.iter_mut().find(|p| p.id == plan.id) {
            Some(slot) => *slot = plan,
            None => self.plans.push(plan),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::console::testing::Fixture;
    use crate::forms::{FormStatus, PlanAction};
    use crate::types::{BillingInterval, InvoiceStatus};

    fn invoice(tenant: &str, amount: i64) -> Invoice {
        Invoice {
            id: uuid::Uuid::new_v4().to_string(),
            tenant_id: tenant.into(),
            plan_id: "starter".into(),
            amount_cents: amount,
            currency: "USD".into(),
            status: InvoiceStatus::Open,
            issued_at: Utc::now(),
            due_at: None,
            extra: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_super_admin_manages_plans() {
        let fx = Fixture::super_admin();
        let mut page = BillingPage::load(fx.ctx.clone()).await.unwrap();
        assert!(page.plans().is_empty());

        let pro = page
            .create_plan(BillingPlan::new("Pro", 9900, BillingInterval::Monthly))
            .await
            .unwrap();
        page.create_plan(BillingPlan::new("Free", 0, BillingInterval::Monthly))
            .await
            .unwrap();
        assert_eq!(page.plans()[0].name, "Free");

        let mut form = page.edit_plan(&pro.id).unwrap();
        form.dispatch(FormAction::Edit(PlanAction::SetPriceCents(7900)));
        let saved = page.update_plan(&mut form).await.unwrap();
        assert_eq!(saved.price_cents, 7900);
        assert_eq!(form.status(), &FormStatus::Saved);
        assert_eq!(page.plan(&pro.id).unwrap().price_cents, 7900);

        let inactive = page.set_plan_active(&pro.id, false).await.unwrap();
        assert!(!inactive.active);

        page.delete_plan(&pro.id).await.unwrap();
        assert!(page.plan(&pro.id).is_none());
    }

    #[tokio::test]
    async fn test_invalid_plan_is_not_written() {
        let fx = Fixture::super_admin();
        let mut page = BillingPage::load(fx.ctx.clone()).await.unwrap();
        let err = page
            .create_plan(BillingPlan::new("Broken", -5, BillingInterval::Yearly))
            .await
            .unwrap_err();
        assert_eq!(err.field_errors()[0].field, "priceCents");
        assert_eq!(fx.store.calls().writes, 0);
    }

    #[tokio::test]
    async fn test_tenant_admin_reads_only() {
        let fx = Fixture::tenant_admin("acme");
        let plan = BillingPlan::new("Starter", 1900, BillingInterval::Monthly);
        fx.store.insert_plan(plan.clone());

        let mut page = BillingPage::load(fx.ctx.clone()).await.unwrap();
        assert_eq!(page.plans().len(), 1);

        let err = page.set_plan_active(&plan.id, false).await.unwrap_err();
        assert_eq!(err.code(), "Forbidden");
        let err = page.delete_plan(&plan.id).await.unwrap_err();
        assert_eq!(err.code(), "Forbidden");
        assert_eq!(fx.store.calls().writes, 0);

        let staff = Fixture::staff("acme");
        assert!(BillingPage::load(staff.ctx.clone()).await.is_err());
    }

    #[tokio::test]
    async fn test_invoices_are_tenant_scoped() {
        let fx = Fixture::tenant_admin("acme");
        fx.store.insert_invoice(invoice("acme", 1900));
        fx.store.insert_invoice(invoice("sunrise", 4900));

        let page = BillingPage::load(fx.ctx.clone()).await.unwrap();
        let own = page.invoices(None).await.unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].tenant_id, "acme");
        assert!(page.invoices(Some("sunrise")).await.is_err());

        let root = Fixture::super_admin();
        root.store.insert_invoice(invoice("acme", 1900));
        root.store.insert_invoice(invoice("sunrise", 4900));
        let page = BillingPage::load(root.ctx.clone()).await.unwrap();
        assert_eq!(page.invoices(None).await.unwrap().len(), 2);
        assert_eq!(page.invoices(Some("sunrise")).await.unwrap().len(), 1);
    }
}
