use tracing::{info, warn};

use super::ConsoleContext;
use crate::forms::{BrandingAction, Editable, FormAction, FormState, GlobalSettingsAction};
use crate::types::{FilePayload, GlobalSettings};
use crate::{Error, Result};

/// Platform-wide settings. Super admins only.
#[derive(Clone)]
pub struct GlobalSettingsPage {
    ctx: ConsoleContext,
    form: FormState<GlobalSettings>,
}

impl GlobalSettingsPage {
    pub async fn load(ctx: ConsoleContext) -> Result<Self> {
        ctx.require_super_admin()?;
        let settings = ctx.store.get_global_settings().await?;
        Ok(Self {
            form: FormState::new(settings),
            ctx,
        })
    }

    pub fn context(&self) -> &ConsoleContext {
        &self.ctx
    }

    pub fn form(&self) -> &FormState<GlobalSettings> {
        &self.form
    }

    pub fn dispatch(&mut self, action: GlobalSettingsAction) {
        self.form.dispatch(FormAction::Edit(action));
    }

    pub fn reset(&mut self) {
        self.form.dispatch(FormAction::Reset);
    }

    pub async fn save(&mut self, pending_logo: Option<FilePayload>) -> Result<GlobalSettings> {
        let errors = self.form.draft().validate();
        if !errors.is_empty() {
            return self.ctx.report_failure("Save failed", Error::Validation(errors));
        }

        self.form.dispatch(FormAction::SaveStarted);
        match self.persist(pending_logo).await {
            Ok(saved) => {
                info!("Global settings saved");
                self.form.dispatch(FormAction::SaveSucceeded(saved.clone()));
                self.ctx.notifier.success("Platform settings saved");
                Ok(saved)
            }
            Err(err) => {
                warn!(error = %err, "Saving global settings failed");
                self.form.dispatch(FormAction::SaveFailed(err.to_string()));
                self.ctx.report_failure("Could not save platform settings", err)
            }
        }
    }

    async fn persist(&mut self, pending_logo: Option<FilePayload>) -> Result<GlobalSettings> {
        if let Some(file) = pending_logo {
            let url = self.ctx.upload_logo("platform", &file).await?;
            self.dispatch(GlobalSettingsAction::Branding(BrandingAction::SetLogoUrl(
                Some(url),
            )));
        }
        self.ctx.store.update_global_settings(self.form.draft()).await
    }
}
