//! Page controllers
//!
//! Each console page is a controller holding its loaded records and form
//! state. Controllers receive everything they talk to through an explicit
//! [`ConsoleContext`]; the browser builds one at startup from the session
//! and the CLI builds one per command.

mod billing;
mod business;
mod global;
mod users;

#[cfg(test)]
mod testing;

pub use billing::BillingPage;
pub use business::BusinessSettingsPage;
pub use global::GlobalSettingsPage;
pub use users::{ImportReport, ImportRowError, UsersPage};

use std::rc::Rc;

use tracing::info;

use crate::picker::PickerOptions;
use crate::store::{DocumentStore, FileStorage, Notifier};
use crate::types::{AdminUser, FilePayload, UserRole};
use crate::{ConsoleConfig, Error, Result};

/// Collaborators and identity shared by every page.
#[derive(Clone)]
pub struct ConsoleContext {
    pub store: Rc<dyn DocumentStore>,
    pub storage: Rc<dyn FileStorage>,
    pub notifier: Rc<dyn Notifier>,
    /// The acting user.
    pub user: AdminUser,
    pub config: ConsoleConfig,
}

impl ConsoleContext {
    pub fn new(
        store: Rc<dyn DocumentStore>,
        storage: Rc<dyn FileStorage>,
        notifier: Rc<dyn Notifier>,
        user: AdminUser,
        config: ConsoleConfig,
    ) -> Self {
        Self {
            store,
            storage,
            notifier,
            user,
            config,
        }
    }

    /// Picker options for logo fields, from the upload configuration.
    pub fn logo_picker_options(&self) -> PickerOptions {
        PickerOptions::new(
            self.config.uploads.accepted_logo_types.clone(),
            self.config.uploads.max_logo_bytes,
        )
    }

    /// Active super admins only.
    pub fn require_super_admin(&self) -> Result<()> {
        if self.user.is_super_admin() && self.user.active {
            Ok(())
        } else {
            Err(Error::Forbidden("super admin role required".into()))
        }
    }

    pub fn require_tenant_access(&self, tenant_id: &str) -> Result<()> {
        if self.user.can_manage_tenant(tenant_id) {
            Ok(())
        } else {
            Err(Error::Forbidden(format!(
                "{} cannot manage tenant {}",
                self.user.email, tenant_id
            )))
        }
    }

    /// Tenant admins are pinned to their own tenant; super admins may pick
    /// any tenant or none.
    pub fn tenant_scope(&self, requested: Option<&str>) -> Result<Option<String>> {
        match self.user.role {
            UserRole::SuperAdmin if self.user.active => Ok(requested.map(str::to_string)),
            UserRole::TenantAdmin if self.user.active => {
                let own = self
                    .user
                    .tenant_id
                    .clone()
                    .ok_or_else(|| Error::Forbidden("user has no tenant".into()))?;
                match requested {
                    Some(other) if other != own => Err(Error::Forbidden(format!(
                        "{} cannot manage tenant {}",
                        self.user.email, other
                    ))),
                    _ => Ok(Some(own)),
                }
            }
            _ => Err(Error::Forbidden(format!(
                "{} has no administrative access",
                self.user.email
            ))),
        }
    }

    /// Size-check and upload a logo under `{prefix}/branding/`.
    pub async fn upload_logo(&self, prefix: &str, file: &FilePayload) -> Result<String> {
        let max = self.config.uploads.max_logo_bytes;
        if file.size() > max {
            return Err(Error::SizeExceeded {
                size: file.size(),
                max,
            });
        }

        let path = logo_path(prefix, file);
        let url = self.storage.upload(&path, file).await?;
        info!(path = %path, size = file.size(), "Logo uploaded");
        Ok(url)
    }

    /// Notify about a failed operation and pass the error on.
    pub(crate) fn report_failure<T>(&self, action: &str, err: Error) -> Result<T> {
        let message = match &err {
            Error::Validation(_) => "Fix the highlighted fields before saving".to_string(),
            other => format!("{}: {}", action, other),
        };
        self.notifier.error(&message);
        Err(err)
    }
}

/// Destination for a new logo: `{prefix}/branding/logo-{uuid}.{ext}`.
pub fn logo_path(prefix: &str, file: &FilePayload) -> String {
    format!(
        "{}/branding/logo-{}.{}",
        prefix.trim_end_matches('/'),
        uuid::Uuid::new_v4(),
        file.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::testing::Fixture;
    use super::*;

    #[test]
    fn test_logo_path_shape() {
        let file = FilePayload::new("Brand.PNG", "image/png", vec![]);
        let path = logo_path("tenants/acme", &file);
        assert!(path.starts_with("tenants/acme/branding/logo-"));
        assert!(path.ends_with(".png"));
        assert_eq!(path.len(), "tenants/acme/branding/logo-".len() + 36 + 4);
    }

    #[test]
    fn test_tenant_scope() {
        let root = Fixture::super_admin();
        assert_eq!(root.ctx.tenant_scope(None).unwrap(), None);
        assert_eq!(
            root.ctx.tenant_scope(Some("other")).unwrap(),
            Some("other".to_string())
        );

        let admin = Fixture::tenant_admin("acme");
        assert_eq!(admin.ctx.tenant_scope(None).unwrap(), Some("acme".into()));
        assert_eq!(admin.ctx.tenant_scope(Some("acme")).unwrap(), Some("acme".into()));
        assert_eq!(
            admin.ctx.tenant_scope(Some("other")).unwrap_err().code(),
            "Forbidden"
        );

        let staff = Fixture::staff("acme");
        assert!(staff.ctx.tenant_scope(None).is_err());
    }

    #[test]
    fn test_inactive_users_lose_access() {
        let mut root = AdminUser::new("root@tenantry.io", "Root", UserRole::SuperAdmin);
        root.active = false;
        let fx = Fixture::as_user(root);
        assert_eq!(fx.ctx.require_super_admin().unwrap_err().code(), "Forbidden");
        assert_eq!(fx.ctx.tenant_scope(None).unwrap_err().code(), "Forbidden");
        assert_eq!(fx.ctx.require_tenant_access("acme").unwrap_err().code(), "Forbidden");

        let mut owner = AdminUser::new("owner@acme.com", "Owner", UserRole::TenantAdmin).with_tenant("acme");
        owner.active = false;
        let fx = Fixture::as_user(owner);
        assert!(fx.ctx.tenant_scope(None).is_err());
        assert!(fx.ctx.require_tenant_access("acme").is_err());
    }

    #[tokio::test]
    async fn test_upload_logo_rejects_oversized() {
        let fx = Fixture::super_admin();
        let big = FilePayload::new(
            "huge.png",
            "image/png",
            vec![0; crate::DEFAULT_MAX_LOGO_BYTES as usize + 1],
        );
        let err = fx.ctx.upload_logo("platform", &big).await.unwrap_err();
        assert_eq!(err.code(), "SizeExceeded");
        assert_eq!(fx.store.calls().uploads, 0);
    }
}
