//! Remote collaborators
//!
//! The console talks to three external services: the document store that
//! holds tenant, user, plan and settings records, the file storage service
//! that turns uploads into durable URLs, and a notification surface for
//! transient toasts. Each is a trait here; the browser and CLI provide HTTP
//! adapters and [`MemoryStore`] backs tests and local development.

mod memory;
mod notify;

pub use memory::{CallCounts, MemoryStore};
pub use notify::{LogNotifier, Notification, NotificationLevel, Notifier, RecordingNotifier};

use async_trait::async_trait;

use crate::types::{AdminUser, BillingPlan, FilePayload, GlobalSettings, Invoice, TenantProfile};
use crate::Result;

/// Document store holding whole records keyed by id.
///
/// Futures are not required to be `Send` so browser clients can implement it.
#[async_trait(?Send)]
pub trait DocumentStore {
    // ============= Session =============

    /// The user the console is acting as.
    async fn current_user(&self) -> Result<AdminUser>;

    // ============= Tenant Operations =============

    async fn get_tenant(&self, id: &str) -> Result<Option<TenantProfile>>;
    async fn list_tenants(&self) -> Result<Vec<TenantProfile>>;
    async fn update_tenant(&self, tenant: &TenantProfile) -> Result<TenantProfile>;

    // ============= Global Settings =============

    async fn get_global_settings(&self) -> Result<GlobalSettings>;
    async fn update_global_settings(&self, settings: &GlobalSettings) -> Result<GlobalSettings>;

    // ============= User Operations =============

    /// All users, or only those of one tenant.
    async fn list_users(&self, tenant_id: Option<&str>) -> Result<Vec<AdminUser>>;
    async fn get_user(&self, id: &str) -> Result<Option<AdminUser>>;
    async fn create_user(&self, user: &AdminUser) -> Result<AdminUser>;
    async fn update_user(&self, user: &AdminUser) -> Result<AdminUser>;
    async fn delete_user(&self, id: &str) -> Result<()>;

    // ============= Billing Operations =============

    async fn list_plans(&self) -> Result<Vec<BillingPlan>>;
    async fn create_plan(&self, plan: &BillingPlan) -> Result<BillingPlan>;
    async fn update_plan(&self, plan: &BillingPlan) -> Result<BillingPlan>;
    async fn delete_plan(&self, id: &str) -> Result<()>;
    async fn list_invoices(&self, tenant_id: Option<&str>) -> Result<Vec<Invoice>>;
}

/// File storage service.
#[async_trait(?Send)]
pub trait FileStorage {
    /// Store `file` at `path` and return its durable URL.
    async fn upload(&self, path: &str, file: &FilePayload) -> Result<String>;
}
