use tracing::{info, warn};

use super::ConsoleContext;
use crate::forms::{BrandingAction, Editable, FormAction, FormState, TenantAction};
use crate::types::{FilePayload, TenantProfile};
use crate::{Error, Result};

/// Branding and profile settings of one tenant.
#[derive(Clone)]
pub struct BusinessSettingsPage {
    ctx: ConsoleContext,
    form: FormState<TenantProfile>,
}

impl BusinessSettingsPage {
    pub async fn load(ctx: ConsoleContext, tenant_id: &str) -> Result<Self> {
        ctx.require_tenant_access(tenant_id)?;

        let tenant = ctx
            .store
            .get_tenant(tenant_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("tenant {}", tenant_id)))?;

        Ok(Self {
            form: FormState::new(tenant),
            ctx,
        })
    }

    pub fn context(&self) -> &ConsoleContext {
        &self.ctx
    }

    pub fn form(&self) -> &FormState<TenantProfile> {
        &self.form
    }

    pub fn dispatch(&mut self, action: TenantAction) {
        self.form.dispatch(FormAction::Edit(action));
    }

    pub fn reset(&mut self) {
        self.form.dispatch(FormAction::Reset);
    }

    /// Upload the pending logo, if any, then write the whole draft back.
    ///
    /// Nothing is written when validation fails, and the tenant record is
    /// left untouched when the upload fails.
    pub async fn save(&mut self, pending_logo: Option<FilePayload>) -> Result<TenantProfile> {
        let errors = self.form.draft().validate();
        if !errors.is_empty() {
            return self.ctx.report_failure("Save failed", Error::Validation(errors));
        }

        self.form.dispatch(FormAction::SaveStarted);
        match self.persist(pending_logo).await {
            Ok(saved) => {
                info!(tenant = %saved.id, "Business settings saved");
                self.form.dispatch(FormAction::SaveSucceeded(saved.clone()));
                self.ctx.notifier.success("Business settings saved");
                Ok(saved)
            }
            Err(err) => {
                warn!(tenant = %self.form.draft().id, error = %err, "Saving business settings failed");
                self.form.dispatch(FormAction::SaveFailed(err.to_string()));
                self.ctx.report_failure("Could not save business settings", err)
            }
        }
    }

    async fn persist(&mut self, pending_logo: Option<FilePayload>) -> Result<TenantProfile> {
        if let Some(file) = pending_logo {
            let prefix = format!("tenants/{}", self.form.draft().id);
            let url = self.ctx.upload_logo(&prefix, &file).await?;
            self.dispatch(TenantAction::Branding(BrandingAction::SetLogoUrl(Some(url))));
        }
        self.ctx.store.update_tenant(self.form.draft()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::testing::Fixture;
    use crate::forms::FormStatus;
    use crate::store::NotificationLevel;

    fn logo() -> FilePayload {
        FilePayload::new("logo.png", "image/png", vec![137, 80, 78, 71])
    }

    #[tokio::test]
    async fn test_load_and_save_with_logo() {
        let fx = Fixture::tenant_admin("acme");
        let mut page = BusinessSettingsPage::load(fx.ctx.clone(), "acme").await.unwrap();
        assert_eq!(page.form().draft().name, "Acme Stores");

        page.dispatch(TenantAction::Branding(BrandingAction::SetSlogan(
            "Everything, every day".into(),
        )));
        let saved = page.save(Some(logo())).await.unwrap();

        let logo_url = saved.branding.logo_url.clone().unwrap();
        assert!(logo_url.starts_with("memory://tenants/acme/branding/logo-"));
        assert!(logo_url.ends_with(".png"));

        let stored = fx.store.tenant("acme").unwrap();
        assert_eq!(stored.branding.slogan.as_deref(), Some("Everything, every day"));
        assert_eq!(stored.branding.logo_url, Some(logo_url));
        assert_eq!(page.form().status(), &FormStatus::Saved);
        assert!(!page.form().is_dirty());
        assert_eq!(fx.notifier.count(NotificationLevel::Success), 1);
    }

    #[tokio::test]
    async fn test_failed_upload_never_updates_tenant() {
        let fx = Fixture::tenant_admin("acme");
        fx.store.fail_uploads(true);
        let mut page = BusinessSettingsPage::load(fx.ctx.clone(), "acme").await.unwrap();
        page.dispatch(TenantAction::SetName("Acme Markets".into()));

        let err = page.save(Some(logo())).await.unwrap_err();
        assert_eq!(err.code(), "UploadFailure");
        assert_eq!(fx.store.calls().uploads, 1);
        assert_eq!(fx.store.calls().writes, 0);
        assert_eq!(fx.store.tenant("acme").unwrap().name, "Acme Stores");
        assert!(matches!(page.form().status(), FormStatus::Failed(_)));
        assert_eq!(page.form().draft().name, "Acme Markets");
        assert_eq!(fx.notifier.last().unwrap().level, NotificationLevel::Error);
    }

    #[tokio::test]
    async fn test_validation_errors_make_no_remote_call() {
        let fx = Fixture::tenant_admin("acme");
        let mut page = BusinessSettingsPage::load(fx.ctx.clone(), "acme").await.unwrap();
        page.dispatch(TenantAction::Branding(BrandingAction::SetPrimaryColor(
            "not-a-color".into(),
        )));

        let err = page.save(Some(logo())).await.unwrap_err();
        assert_eq!(err.code(), "ValidationFailed");
        assert_eq!(err.field_errors()[0].field, "branding.primaryColor");
        assert_eq!(fx.store.calls().uploads, 0);
        assert_eq!(fx.store.calls().writes, 0);
        assert_eq!(page.form().status(), &FormStatus::Idle);
        assert_eq!(fx.notifier.count(NotificationLevel::Error), 1);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_draft() {
        let fx = Fixture::super_admin();
        fx.store.fail_writes(true);
        let mut page = BusinessSettingsPage::load(fx.ctx.clone(), "sunrise").await.unwrap();
        page.dispatch(TenantAction::SetCurrency("kes".into()));

        let err = page.save(None).await.unwrap_err();
        assert_eq!(err.code(), "SaveFailure");
        assert_eq!(page.form().draft().currency, "KES");
        assert_eq!(fx.store.tenant("sunrise").unwrap().currency, "USD");
    }

    #[tokio::test]
    async fn test_oversized_logo_is_rejected_before_upload() {
        let fx = Fixture::super_admin();
        let mut page = BusinessSettingsPage::load(fx.ctx.clone(), "acme").await.unwrap();
        let big = FilePayload::new(
            "big.png",
            "image/png",
            vec![0; fx.ctx.config.uploads.max_logo_bytes as usize + 1],
        );

        let err = page.save(Some(big)).await.unwrap_err();
        assert_eq!(err.code(), "SizeExceeded");
        assert_eq!(fx.store.calls().uploads, 0);
        assert_eq!(fx.store.calls().writes, 0);
    }

    #[tokio::test]
    async fn test_access_rules() {
        let admin = Fixture::tenant_admin("acme");
        let err = BusinessSettingsPage::load(admin.ctx.clone(), "sunrise")
            .await
            .err()
            .unwrap();
        assert_eq!(err.code(), "Forbidden");

        let staff = Fixture::staff("acme");
        assert!(BusinessSettingsPage::load(staff.ctx.clone(), "acme").await.is_err());

        let root = Fixture::super_admin();
        let err = BusinessSettingsPage::load(root.ctx.clone(), "ghost")
            .await
            .err()
            .unwrap();
        assert_eq!(err.code(), "NotFound");
    }

    #[tokio::test]
    async fn test_reset_discards_edits() {
        let fx = Fixture::super_admin();
        let mut page = BusinessSettingsPage::load(fx.ctx.clone(), "acme").await.unwrap();
        page.dispatch(TenantAction::SetName("Renamed".into()));
        assert!(page.form().is_dirty());
        page.reset();
        assert!(!page.form().is_dirty());
    }
}
