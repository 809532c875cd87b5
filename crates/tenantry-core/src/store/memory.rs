use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

use super::{DocumentStore, FileStorage};
use crate::types::{AdminUser, BillingPlan, FilePayload, GlobalSettings, Invoice, TenantProfile};
use crate::{Error, Result};

#[derive(Debug, Default)]
struct Data {
    session: Option<AdminUser>,
    tenants: BTreeMap<String, TenantProfile>,
    settings: GlobalSettings,
    users: BTreeMap<String, AdminUser>,
    plans: BTreeMap<String, BillingPlan>,
    invoices: Vec<Invoice>,
    files: BTreeMap<String, FilePayload>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Faults {
    uploads: bool,
    writes: bool,
}

/// Write counters, for asserting which remote calls a flow made.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallCounts {
    pub uploads: usize,
    pub writes: usize,
}

/// In-memory document store and file storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<Data>,
    faults: RwLock<Faults>,
    calls: RwLock<CallCounts>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(self, user: AdminUser) -> Self {
        {
            let mut data = self.data.write();
            data.users.insert(user.id.clone(), user.clone());
            data.session = Some(user);
        }
        self
    }

    pub fn insert_tenant(&self, tenant: TenantProfile) {
        self.data.write().tenants.insert(tenant.id.clone(), tenant);
    }

    pub fn insert_user(&self, user: AdminUser) {
        self.data.write().users.insert(user.id.clone(), user);
    }

    pub fn insert_plan(&self, plan: BillingPlan) {
        self.data.write().plans.insert(plan.id.clone(), plan);
    }

    pub fn insert_invoice(&self, invoice: Invoice) {
        self.data.write().invoices.push(invoice);
    }

    pub fn set_global_settings(&self, settings: GlobalSettings) {
        self.data.write().settings = settings;
    }

    pub fn tenant(&self, id: &str) -> Option<TenantProfile> {
        self.data.read().tenants.get(id).cloned()
    }

    pub fn global_settings(&self) -> GlobalSettings {
        self.data.read().settings.clone()
    }

    pub fn user_by_email(&self, email: &str) -> Option<AdminUser> {
        self.data
            .read()
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    pub fn file(&self, path: &str) -> Option<FilePayload> {
        self.data.read().files.get(path).cloned()
    }

    pub fn file_paths(&self) -> Vec<String> {
        self.data.read().files.keys().cloned().collect()
    }

    /// Make every following upload fail.
    pub fn fail_uploads(&self, fail: bool) {
        self.faults.write().uploads = fail;
    }

    /// Make every following record write fail.
    pub fn fail_writes(&self, fail: bool) {
        self.faults.write().writes = fail;
    }

    pub fn calls(&self) -> CallCounts {
        *self.calls.read()
    }

    fn begin_write(&self) -> Result<()> {
        self.calls.write().writes += 1;
        if self.faults.read().writes {
            return Err(Error::Store("simulated write failure".into()));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl DocumentStore for MemoryStore {
    async fn current_user(&self) -> Result<AdminUser> {
        self.data
            .read()
            .session
            .clone()
            .ok_or_else(|| Error::NotFound("session".into()))
    }

    async fn get_tenant(&self, id: &str) -> Result<Option<TenantProfile>> {
        Ok(self.data.read().tenants.get(id).cloned())
    }

    async fn list_tenants(&self) -> Result<Vec<TenantProfile>> {
        Ok(self.data.read().tenants.values().cloned().collect())
    }

    async fn update_tenant(&self, tenant: &TenantProfile) -> Result<TenantProfile> {
        self.begin_write()?;
        let mut data = self.data.write();
        if !data.tenants.contains_key(&tenant.id) {
            return Err(Error::NotFound(format!("tenant {}", tenant.id)));
        }
        let mut stored = tenant.clone();
        stored.updated_at = Some(Utc::now());
        data.tenants.insert(stored.id.clone(), stored.clone());
        debug!(tenant = %stored.id, "Tenant updated");
        Ok(stored)
    }

    async fn get_global_settings(&self) -> Result<GlobalSettings> {
        Ok(self.data.read().settings.clone())
    }

    async fn update_global_settings(&self, settings: &GlobalSettings) -> Result<GlobalSettings> {
        self.begin_write()?;
        self.data.write().settings = settings.clone();
        Ok(settings.clone())
    }

    async fn list_users(&self, tenant_id: Option<&str>) -> Result<Vec<AdminUser>> {
        let data = self.data.read();
        let mut users: Vec<AdminUser> = data
            .users
            .values()
            .filter(|u| tenant_id.is_none() || u.tenant_id.as_deref() == tenant_id)
            .cloned()
            .collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    async fn get_user(&self, id: &str) -> Result<Option<AdminUser>> {
        Ok(self.data.read().users.get(id).cloned())
    }

    async fn create_user(&self, user: &AdminUser) -> Result<AdminUser> {
        self.begin_write()?;
        let mut data = self.data.write();
        if data.users.contains_key(&user.id) {
            return Err(Error::InvalidArgument(format!("user {} already exists", user.id)));
        }
        data.users.insert(user.id.clone(), user.clone());
        Ok(user.clone())
    }

    async fn update_user(&self, user: &AdminUser) -> Result<AdminUser> {
        self.begin_write()?;
        let mut data = self.data.write();
        match data.users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user.clone())
            }
            None => Err(Error::NotFound(format!("user {}", user.id))),
        }
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        self.begin_write()?;
        self.data
            .write()
            .users
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(format!("user {}", id)))
    }

    async fn list_plans(&self) -> Result<Vec<BillingPlan>> {
        let mut plans: Vec<BillingPlan> = self.data.read().plans.values().cloned().collect();
        plans.sort_by_key(|p| p.price_cents);
        Ok(plans)
    }

    async fn create_plan(&self, plan: &BillingPlan) -> Result<BillingPlan> {
        self.begin_write()?;
        self.data.write().plans.insert(plan.id.clone(), plan.clone());
        Ok(plan.clone())
    }

    async fn update_plan(&self, plan: &BillingPlan) -> Result<BillingPlan> {
        self.begin_write()?;
        let mut data = self.data.write();
        match data.plans.get_mut(&plan.id) {
            Some(existing) => {
                *existing = plan.clone();
                Ok(plan.clone())
            }
            None => Err(Error::NotFound(format!("plan {}", plan.id))),
        }
    }

    async fn delete_plan(&self, id: &str) -> Result<()> {
        self.begin_write()?;
        self.data
            .write()
            .plans
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(format!("plan {}", id)))
    }

    async fn list_invoices(&self, tenant_id: Option<&str>) -> Result<Vec<Invoice>> {
        let mut invoices: Vec<Invoice> = self
            .data
            .read()
            .invoices
            .iter()
            .filter(|i| tenant_id.map_or(true, |t| i.tenant_id == t))
            .cloned()
            .collect();
        invoices.sort_by(|a, b| b.issued_at.cmp(&a.issued_at));
        Ok(invoices)
    }
}

#[async_trait(?Send)]
impl FileStorage for MemoryStore {
    async fn upload(&self, path: &str, file: &FilePayload) -> Result<String> {
        self.calls.write().uploads += 1;
        if self.faults.read().uploads {
            return Err(Error::Upload("simulated upload failure".into()));
        }
        self.data.write().files.insert(path.to_string(), file.clone());
        debug!(path, size = file.size(), "File stored");
        Ok(format!("memory://{}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TenantKind, UserRole};

    #[tokio::test]
    async fn test_tenant_update_stamps_time() {
        let store = MemoryStore::new();
        store.insert_tenant(TenantProfile::new("acme", "Acme", TenantKind::Retail));

        let mut tenant = store.get_tenant("acme").await.unwrap().unwrap();
        tenant.name = "Acme Markets".into();
        let saved = store.update_tenant(&tenant).await.unwrap();

        assert!(saved.updated_at.is_some());
        assert_eq!(store.tenant("acme").unwrap().name, "Acme Markets");
        assert_eq!(store.calls().writes, 1);
    }

    #[tokio::test]
    async fn test_update_missing_tenant() {
        let store = MemoryStore::new();
        let tenant = TenantProfile::new("ghost", "Ghost", TenantKind::Retail);
        let err = store.update_tenant(&tenant).await.unwrap_err();
        assert_eq!(err.code(), "NotFound");
    }

    #[tokio::test]
    async fn test_users_filtered_by_tenant() {
        let store = MemoryStore::new();
        store.insert_user(AdminUser::new("b@acme.com", "B", UserRole::Staff).with_tenant("acme"));
        store.insert_user(AdminUser::new("a@acme.com", "A", UserRole::TenantAdmin).with_tenant("acme"));
        store.insert_user(AdminUser::new("x@other.com", "X", UserRole::Staff).with_tenant("other"));

        let acme = store.list_users(Some("acme")).await.unwrap();
        assert_eq!(
            acme.iter().map(|u| u.email.as_str()).collect::<Vec<_>>(),
            vec!["a@acme.com", "b@acme.com"]
        );
        assert_eq!(store.list_users(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_upload_and_faults() {
        let store = MemoryStore::new();
        let file = FilePayload::new("logo.png", "image/png", vec![1, 2, 3]);

        let url = store.upload("tenants/acme/logo.png", &file).await.unwrap();
        assert_eq!(url, "memory://tenants/acme/logo.png");
        assert_eq!(store.file("tenants/acme/logo.png"), Some(file.clone()));

        store.fail_uploads(true);
        let err = store.upload("tenants/acme/other.png", &file).await.unwrap_err();
        assert_eq!(err.code(), "UploadFailure");
        assert_eq!(store.calls().uploads, 2);
        assert_eq!(store.file_paths().len(), 1);
    }

    #[tokio::test]
    async fn test_session() {
        let store = MemoryStore::new();
        assert!(store.current_user().await.is_err());

        let root = AdminUser::new("root@tenantry.io", "Root", UserRole::SuperAdmin);
        let store = store.with_session(root.clone());
        assert_eq!(store.current_user().await.unwrap(), root);
        assert!(store.user_by_email("ROOT@tenantry.io").is_some());
    }
}
