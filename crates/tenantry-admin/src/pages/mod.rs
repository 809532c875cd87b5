//! Page components

mod billing;
mod business_settings;
mod global_settings;
mod not_found;
mod tenants;
mod users;

pub use billing::BillingPage;
pub use business_settings::BusinessSettingsPage;
pub use global_settings::GlobalSettingsPage;
pub use not_found::NotFoundPage;
pub use tenants::TenantsPage;
pub use users::UsersPage;

use std::future::Future;

use leptos::*;
use wasm_bindgen_futures::spawn_local;

/// Run an async operation on a copy of the page controller and store the
/// result back. Failures are already reported by the controller. Only one
/// operation runs at a time, so no other change to the page is overwritten.
pub(crate) fn run_with<C, F, Fut>(page: RwSignal<Option<C>>, busy: RwSignal<bool>, op: F)
where
    C: Clone + 'static,
    F: FnOnce(C) -> Fut + 'static,
    Fut: Future<Output = C> + 'static,
{
    if busy.get_untracked() {
        return;
    }
    let Some(controller) = page.get_untracked() else {
        return;
    };
    busy.set(true);
    spawn_local(async move {
        let controller = op(controller).await;
        page.set(Some(controller));
        busy.set(false);
    });
}
