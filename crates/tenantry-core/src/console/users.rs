use serde::Serialize;
use tracing::{debug, info};

use super::ConsoleContext;
use crate::forms::NewUser;
use crate::types::{AdminUser, UserRole};
use crate::utils::parse_csv;
use crate::{Error, FieldError, Result};

/// A CSV row that was not imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRowError {
    /// 1-based index among the data rows.
    pub row: usize,
    pub email: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub created: Vec<AdminUser>,
    pub skipped: Vec<ImportRowError>,
}

impl ImportReport {
    pub fn summary(&self) -> String {
        format!(
            "Imported {} user{}, {} skipped",
            self.created.len(),
            if self.created.len() == 1 { "" } else { "s" },
            self.skipped.len()
        )
    }
}

/// Admin users of one tenant, or of every tenant for super admins.
#[derive(Clone)]
pub struct UsersPage {
    ctx: ConsoleContext,
    scope: Option<String>,
    users: Vec<AdminUser>,
}

impl UsersPage {
    pub async fn load(ctx: ConsoleContext, tenant_id: Option<&str>) -> Result<Self> {
        let scope = ctx.tenant_scope(tenant_id)?;
        let users = ctx.store.list_users(scope.as_deref()).await?;
        debug!(count = users.len(), scope = ?scope, "Users loaded");
        Ok(Self { ctx, scope, users })
    }

    pub fn users(&self) -> &[AdminUser] {
        &self.users
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub async fn refresh(&mut self) -> Result<()> {
        self.users = self.ctx.store.list_users(self.scope.as_deref()).await?;
        Ok(())
    }

    pub async fn create(&mut self, new_user: NewUser) -> Result<AdminUser> {
        match self.create_inner(new_user).await {
            Ok(user) => {
                self.ctx
                    .notifier
                    .success(&format!("Created {}", user.email));
                Ok(user)
            }
            Err(err) => self.ctx.report_failure("Could not create user", err),
        }
    }

    async fn create_inner(&mut self, new_user: NewUser) -> Result<AdminUser> {
        let new_user = self.authorize_new_user(new_user)?;
        let errors = new_user.validate();
        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }

        let email = new_user.email.trim().to_ascii_lowercase();
        let existing = self.ctx.store.list_users(None).await?;
        if existing.iter().any(|u| u.email.eq_ignore_ascii_case(&email)) {
            return Err(Error::InvalidArgument(format!("{} is already registered", email)));
        }

        let created = self.ctx.store.create_user(&new_user.into_user()).await?;
        info!(user = %created.email, role = created.role.as_str(), "User created");
        if self.in_scope(&created) {
            self.users.push(created.clone());
        }
        Ok(created)
    }

    /// Tenant admins create users in their own tenant only, and never super admins.
    fn authorize_new_user(&self, mut new_user: NewUser) -> Result<NewUser> {
        if self.ctx.user.is_super_admin() {
            return Ok(new_user);
        }
        if new_user.role == UserRole::SuperAdmin {
            return Err(Error::Forbidden("only super admins can create super admins".into()));
        }
        match (&new_user.tenant_id, &self.ctx.user.tenant_id) {
            (Some(requested), Some(own)) if requested != own => {
                return Err(Error::Forbidden(format!(
                    "cannot create users in tenant {}",
                    requested
                )))
            }
            (None, own) => new_user.tenant_id = own.clone(),
            _ => {}
        }
        Ok(new_user)
    }

    pub async fn set_active(&mut self, user_id: &str, active: bool) -> Result<AdminUser> {
        if user_id == self.ctx.user.id && !active {
            return self.ctx.report_failure(
                "Could not update user",
                Error::InvalidArgument("you cannot deactivate yourself".into()),
            );
        }
        let verb = if active { "Enabled" } else { "Disabled" };
        self.modify(user_id, verb, |user| {
            user.active = active;
            Ok(())
        })
        .await
    }

    pub async fn set_role(&mut self, user_id: &str, role: UserRole) -> Result<AdminUser> {
        if role == UserRole::SuperAdmin && !self.ctx.user.is_super_admin() {
            return self.ctx.report_failure(
                "Could not update user",
                Error::Forbidden("only super admins can grant the super admin role".into()),
            );
        }
        if user_id == self.ctx.user.id {
            return self.ctx.report_failure(
                "Could not update user",
                Error::InvalidArgument("you cannot change your own role".into()),
            );
        }
        self.modify(user_id, "Updated role of", |user| {
            if role == UserRole::SuperAdmin {
                user.tenant_id = None;
            } else if user.tenant_id.is_none() {
                return Err(Error::Validation(vec![FieldError::new(
                    "tenantId",
                    "Tenant users need a tenant",
                )]));
            }
            user.role = role;
            Ok(())
        })
        .await
    }

    pub async fn delete(&mut self, user_id: &str) -> Result<()> {
        match self.delete_inner(user_id).await {
            Ok(user) => {
                info!(user = %user.email, "User deleted");
                self.users.retain(|u| u.id != user.id);
                self.ctx.notifier.success(&format!("Deleted {}", user.email));
                Ok(())
            }
            Err(err) => self.ctx.report_failure("Could not delete user", err),
        }
    }

    async fn delete_inner(&self, user_id: &str) -> Result<AdminUser> {
        if user_id == self.ctx.user.id {
            return Err(Error::InvalidArgument("you cannot delete yourself".into()));
        }
        let user = self.find_manageable(user_id).await?;
        self.ctx.store.delete_user(&user.id).await?;
        Ok(user)
    }

    /// Create users from CSV text with an `email` column and optional `name`
    /// and `role` columns. Invalid or duplicate rows are reported and skipped.
    pub async fn import_csv(&mut self, text: &str, tenant_id: Option<&str>) -> Result<ImportReport> {
        let table = parse_csv(text);
        if !table.has_column("email") {
            return self.ctx.report_failure(
                "Import failed",
                Error::InvalidArgument("CSV must have an email column".into()),
            );
        }

        let tenant_id = match tenant_id {
            Some(id) => Some(id.to_string()),
            None => self.scope.clone(),
        };

        let mut report = ImportReport::default();
        let mut known: Vec<String> = match self.ctx.store.list_users(None).await {
            Ok(users) => users.into_iter().map(|u| u.email.to_ascii_lowercase()).collect(),
            Err(err) => return self.ctx.report_failure("Import failed", err),
        };

        for (index, row) in table.rows.iter().enumerate() {
            let email = row.get("email").cloned().unwrap_or_default();
            let skip = |reason: String| ImportRowError {
                row: index + 1,
                email: email.clone(),
                reason,
            };

            let role_text = row.get("role").map(String::as_str).unwrap_or_default();
            let Some(role) = UserRole::parse(role_text) else {
                report.skipped.push(skip(format!("unknown role '{}'", role_text)));
                continue;
            };

            let mut new_user = NewUser::new(
                email.clone(),
                row.get("name").cloned().unwrap_or_default(),
                role,
            );
            new_user.tenant_id = tenant_id.clone();

            let lowered = email.trim().to_ascii_lowercase();
            if known.contains(&lowered) {
                report.skipped.push(skip("email already registered".into()));
                continue;
            }

            let outcome = match self.authorize_new_user(new_user) {
                Ok(new_user) => {
                    let errors = new_user.validate();
                    if errors.is_empty() {
                        self.ctx.store.create_user(&new_user.into_user()).await
                    } else {
                        Err(Error::Validation(errors))
                    }
                }
                Err(err) => Err(err),
            };

            match outcome {
                Ok(user) => {
                    known.push(lowered);
                    if self.in_scope(&user) {
                        self.users.push(user.clone());
                    }
                    report.created.push(user);
                }
                Err(err) => report.skipped.push(skip(err.to_string())),
            }
        }

        info!(
            created = report.created.len(),
            skipped = report.skipped.len(),
            "CSV import finished"
        );
        self.ctx.notifier.success(&report.summary());
        Ok(report)
    }

    async fn modify<F>(&mut self, user_id: &str, verb: &str, change: F) -> Result<AdminUser>
    where
        F: FnOnce(&mut AdminUser) -> Result<()>,
    {
        match self.update_inner(user_id, change).await {
            Ok(user) => {
                if let Some(slot) = self.users.iter_mut().find(|u| u.id == user.id) {
                    *slot = user.clone();
                }
                self.ctx
                    .notifier
                    .success(&format!("{} {}", verb, user.email));
                Ok(user)
            }
            Err(err) => self.ctx.report_failure("Could not update user", err),
        }
    }

    async fn update_inner<F>(&self, user_id: &str, change: F) -> Result<AdminUser>
    where
        F: FnOnce(&mut AdminUser) -> Result<()>,
    {
        let mut user = self.find_manageable(user_id).await?;
        change(&mut user)?;
        self.ctx.store.update_user(&user).await
    }

    /// Fetch a user the acting user is allowed to change.
    async fn find_manageable(&self, user_id: &str) -> Result<AdminUser> {
        let user = self
            .ctx
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user {}", user_id)))?;

        if self.ctx.user.is_super_admin() {
            return Ok(user);
        }
        let same_tenant = user.tenant_id.is_some() && user.tenant_id == self.ctx.user.tenant_id;
        if user.is_super_admin() || !same_tenant {
            return Err(Error::Forbidden(format!("cannot manage {}", user.email)));
        }
        Ok(user)
    }

    fn in_scope(&self, user: &AdminUser) -> bool {
        match &self.scope {
            Some(tenant) => user.tenant_id.as_deref() == Some(tenant.as_str()),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::testing::Fixture;
    use crate::store::NotificationLevel;

    #[tokio::test]
    async fn test_tenant_admin_sees_own_tenant_only() {
        let fx = Fixture::tenant_admin("acme");
        fx.store
            .insert_user(AdminUser::new("x@sunrise.org", "X", UserRole::Staff).with_tenant("sunrise"));

        let page = UsersPage::load(fx.ctx.clone(), None).await.unwrap();
        assert_eq!(page.scope(), Some("acme"));
        assert!(page.users().iter().all(|u| u.tenant_id.as_deref() == Some("acme")));

        let err = UsersPage::load(fx.ctx.clone(), Some("sunrise")).await.err().unwrap();
        assert_eq!(err.code(), "Forbidden");
    }

    #[tokio::test]
    async fn test_super_admin_sees_everyone() {
        let fx = Fixture::super_admin();
        fx.store
            .insert_user(AdminUser::new("x@sunrise.org", "X", UserRole::Staff).with_tenant("sunrise"));
        let page = UsersPage::load(fx.ctx.clone(), None).await.unwrap();
        assert_eq!(page.users().len(), 2);
    }

    #[tokio::test]
    async fn test_create_rules() {
        let fx = Fixture::tenant_admin("acme");
        let mut page = UsersPage::load(fx.ctx.clone(), None).await.unwrap();

        let user = page
            .create(NewUser::new("cashier@acme.com", "Cashier", UserRole::Staff))
            .await
            .unwrap();
        assert_eq!(user.tenant_id.as_deref(), Some("acme"));
        assert_eq!(page.users().len(), 2);

        let dup = page
            .create(NewUser::new("CASHIER@acme.com", "Again", UserRole::Staff))
            .await
            .unwrap_err();
        assert_eq!(dup.code(), "InvalidArgument");

        let root = page
            .create(NewUser::new("boss@acme.com", "Boss", UserRole::SuperAdmin))
            .await
            .unwrap_err();
        assert_eq!(root.code(), "Forbidden");

        let other = page
            .create(NewUser::new("a@sunrise.org", "A", UserRole::Staff).with_tenant("sunrise"))
            .await
            .unwrap_err();
        assert_eq!(other.code(), "Forbidden");

        let invalid = page
            .create(NewUser::new("not-an-email", "", UserRole::Staff))
            .await
            .unwrap_err();
        assert_eq!(invalid.code(), "ValidationFailed");
        assert_eq!(fx.notifier.count(NotificationLevel::Error), 4);
    }

    #[tokio::test]
    async fn test_set_active_and_role() {
        let fx = Fixture::tenant_admin("acme");
        let clerk = AdminUser::new("clerk@acme.com", "Clerk", UserRole::Staff).with_tenant("acme");
        fx.store.insert_user(clerk.clone());
        let mut page = UsersPage::load(fx.ctx.clone(), None).await.unwrap();

        let updated = page.set_active(&clerk.id, false).await.unwrap();
        assert!(!updated.active);
        assert!(!page.users().iter().find(|u| u.id == clerk.id).unwrap().active);

        let promoted = page.set_role(&clerk.id, UserRole::TenantAdmin).await.unwrap();
        assert_eq!(promoted.role, UserRole::TenantAdmin);

        let err = page.set_role(&clerk.id, UserRole::SuperAdmin).await.unwrap_err();
        assert_eq!(err.code(), "Forbidden");

        let own_id = fx.ctx.user.id.clone();
        assert!(page.set_active(&own_id, false).await.is_err());
    }

    #[tokio::test]
    async fn test_demotion_needs_a_tenant() {
        let fx = Fixture::super_admin();
        let other = AdminUser::new("ops@tenantry.io", "Ops", UserRole::SuperAdmin);
        fx.store.insert_user(other.clone());
        let mut page = UsersPage::load(fx.ctx.clone(), None).await.unwrap();

        let err = page.set_role(&other.id, UserRole::TenantAdmin).await.unwrap_err();
        assert_eq!(err.field_errors()[0].field, "tenantId");
        assert_eq!(fx.store.calls().writes, 0);
        let stored = fx.store.user_by_email("ops@tenantry.io").unwrap();
        assert_eq!(stored.role, UserRole::SuperAdmin);

        let clerk = AdminUser::new("clerk@acme.com", "Clerk", UserRole::Staff).with_tenant("acme");
        fx.store.insert_user(clerk.clone());
        let promoted = page.set_role(&clerk.id, UserRole::SuperAdmin).await.unwrap();
        assert_eq!(promoted.tenant_id, None);
    }

    #[tokio::test]
    async fn test_cannot_touch_other_tenants() {
        let fx = Fixture::tenant_admin("acme");
        let outsider = AdminUser::new("x@sunrise.org", "X", UserRole::Staff).with_tenant("sunrise");
        fx.store.insert_user(outsider.clone());
        let mut page = UsersPage::load(fx.ctx.clone(), None).await.unwrap();

        let err = page.delete(&outsider.id).await.unwrap_err();
        assert_eq!(err.code(), "Forbidden");
        assert_eq!(fx.store.calls().writes, 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let fx = Fixture::super_admin();
        let clerk = AdminUser::new("clerk@acme.com", "Clerk", UserRole::Staff).with_tenant("acme");
        fx.store.insert_user(clerk.clone());
        let mut page = UsersPage::load(fx.ctx.clone(), None).await.unwrap();

        page.delete(&clerk.id).await.unwrap();
        assert!(page.users().iter().all(|u| u.id != clerk.id));
        assert!(fx.store.user_by_email("clerk@acme.com").is_none());

        let own_id = fx.ctx.user.id.clone();
        let err = page.delete(&own_id).await.unwrap_err();
        assert_eq!(err.code(), "InvalidArgument");
    }

    #[tokio::test]
    async fn test_import_csv_reports_invalid_rows() {
        let fx = Fixture::tenant_admin("acme");
        let mut page = UsersPage::load(fx.ctx.clone(), None).await.unwrap();

        let csv = "email,name,role\n\
                   jane@acme.com,Jane Doe,staff\n\
                   \n\
                   not-an-email,Broken,staff\n\
                   owner@acme.com,Owner Again,admin\n\
                   sam@acme.com,Sam,wizard\n\
                   root@acme.com,Root,super admin\n\
                   li@acme.com,,tenant admin\n";
        let report = page.import_csv(csv, None).await.unwrap();

        let created: Vec<_> = report.created.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(created, vec!["jane@acme.com", "li@acme.com"]);
        assert_eq!(report.created[1].display_name, "li");
        assert_eq!(report.created[1].role, UserRole::TenantAdmin);

        let skipped: Vec<_> = report.skipped.iter().map(|s| s.row).collect();
        assert_eq!(skipped, vec![2, 3, 4, 5]);
        assert!(report.skipped[1].reason.contains("already registered"));
        assert!(report.skipped[2].reason.contains("wizard"));

        assert!(fx.store.user_by_email("jane@acme.com").is_some());
        assert_eq!(page.users().len(), 3);
        assert_eq!(fx.notifier.last().unwrap().message, "Imported 2 users, 4 skipped");
    }

    #[tokio::test]
    async fn test_import_requires_email_column() {
        let fx = Fixture::super_admin();
        let mut page = UsersPage::load(fx.ctx.clone(), None).await.unwrap();
        let err = page.import_csv("name,role\nJane,staff", Some("acme")).await.unwrap_err();
        assert_eq!(err.code(), "InvalidArgument");
        assert_eq!(fx.store.calls().writes, 0);
    }

    #[tokio::test]
    async fn test_import_into_chosen_tenant() {
        let fx = Fixture::super_admin();
        let mut page = UsersPage::load(fx.ctx.clone(), None).await.unwrap();
        let report = page
            .import_csv("email\nmember@sunrise.org\n", Some("sunrise"))
            .await
            .unwrap();
        assert_eq!(report.created[0].tenant_id.as_deref(), Some("sunrise"));
        assert_eq!(report.created[0].role, UserRole::Staff);
    }
}
