use std::rc::Rc;

use super::ConsoleContext;
use crate::store::{MemoryStore, RecordingNotifier};
use crate::types::{AdminUser, TenantKind, TenantProfile, UserRole};
use crate::ConsoleConfig;

pub(crate) struct Fixture {
    pub store: Rc<MemoryStore>,
    pub notifier: Rc<RecordingNotifier>,
    pub ctx: ConsoleContext,
}

impl Fixture {
    pub fn as_user(user: AdminUser) -> Self {
        let store = Rc::new(MemoryStore::new().with_session(user.clone()));
        store.insert_tenant(TenantProfile::new("acme", "Acme Stores", TenantKind::Retail));
        store.insert_tenant(TenantProfile::new(
            "sunrise",
            "Sunrise Savings",
            TenantKind::SavingsGroup,
        ));
        let notifier = Rc::new(RecordingNotifier::new());
        let ctx = ConsoleContext::new(
            store.clone(),
            store.clone(),
            notifier.clone(),
            user,
            ConsoleConfig::default(),
        );
        Self {
            store,
            notifier,
            ctx,
        }
    }

    pub fn super_admin() -> Self {
        Self::as_user(AdminUser::new("root@tenantry.io", "Root", UserRole::SuperAdmin))
    }

    pub fn tenant_admin(tenant_id: &str) -> Self {
        Self::as_user(
            AdminUser::new("owner@acme.com", "Owner", UserRole::TenantAdmin).with_tenant(tenant_id),
        )
    }

    pub fn staff(tenant_id: &str) -> Self {
        Self::as_user(AdminUser::new("clerk@acme.com", "Clerk", UserRole::Staff).with_tenant(tenant_id))
    }
}
