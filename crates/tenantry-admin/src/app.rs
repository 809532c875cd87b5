//! Main application component with routing

use std::rc::Rc;

use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::{Outlet, Redirect, Route, Router, Routes};
use wasm_bindgen_futures::spawn_local;

use tenantry_core::console::ConsoleContext;
use tenantry_core::store::DocumentStore;
use tenantry_core::types::AdminUser;

use crate::api::{api_base, clear_token, save_api_url, save_token, HttpStore};
use crate::components::{Header, Sidebar, ToastHost, ToastNotifier};
use crate::pages::{
    BillingPage, BusinessSettingsPage, GlobalSettingsPage, NotFoundPage, TenantsPage, UsersPage,
};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Tenantry Console" />
        <Router>
            <div class="min-h-screen bg-gray-900 text-gray-100">
                <Routes>
                    <Route path="/login" view=LoginPage />
                    <Route path="/" view=MainLayout>
                        <Route path="" view=HomePage />
                        <Route path="tenants" view=TenantsPage />
                        <Route path="tenants/:id/settings" view=BusinessSettingsPage />
                        <Route path="users" view=UsersPage />
                        <Route path="billing" view=BillingPage />
                        <Route path="settings" view=GlobalSettingsPage />
                        <Route path="/*any" view=NotFoundPage />
                    </Route>
                </Routes>
            </div>
        </Router>
    }
}

fn redirect_to_login() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href("/login");
    }
}

async fn load_session() -> Result<(HttpStore, AdminUser), String> {
    let store = HttpStore::from_local_storage();
    let user = store.current_user().await.map_err(|e| e.to_string())?;
    log::info!("Signed in as {} ({})", user.email, user.role.as_str());
    Ok((store, user))
}

/// Main layout with sidebar and header. Resolves the session and provides
/// the [`ConsoleContext`] every page reads.
#[component]
fn MainLayout() -> impl IntoView {
    let toasts = ToastNotifier::new();
    let session = create_local_resource(|| (), |_| load_session());

    view! {
        {move || match session.get() {
            None => view! {
                <div class="flex h-screen items-center justify-center text-gray-400">"Loading..."</div>
            }.into_view(),
            Some(Err(e)) => {
                log::warn!("No valid session: {}", e);
                redirect_to_login();
                ().into_view()
            }
            Some(Ok((store, user))) => {
                let config = store.console_config();
                let store = Rc::new(store);
                provide_context(ConsoleContext::new(
                    store.clone(),
                    store,
                    Rc::new(toasts),
                    user,
                    config,
                ));
                view! {
                    <div class="flex h-screen">
                        <Sidebar />
                        <div class="flex-1 flex flex-col overflow-hidden">
                            <Header />
                            <main class="flex-1 overflow-y-auto p-6 bg-gray-800">
                                <Outlet />
                            </main>
                        </div>
                    </div>
                }.into_view()
            }
        }}
        <ToastHost notifier=toasts />
    }
}

/// Landing route: the tenant directory for super admins, the own tenant's
/// settings for everyone else.
#[component]
fn HomePage() -> impl IntoView {
    let ctx = expect_context::<ConsoleContext>();
    match (ctx.user.is_super_admin(), ctx.user.tenant_id.clone()) {
        (true, _) => view! { <TenantsPage /> }.into_view(),
        (false, Some(id)) => view! { <Redirect path=format!("/tenants/{}/settings", id) /> }.into_view(),
        (false, None) => view! { <Redirect path="/users" /> }.into_view(),
    }
}

/// Login page
#[component]
fn LoginPage() -> impl IntoView {
    let (api_url, set_api_url) = create_signal(api_base());
    let (token, set_token) = create_signal(String::new());
    let (error, set_error) = create_signal(Option::<String>::None);
    let (loading, set_loading) = create_signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_loading.set(true);
        set_error.set(None);

        save_api_url(&api_url.get());
        save_token(token.get().trim());

        spawn_local(async move {
            match load_session().await {
                Ok(_) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href("/");
                    }
                }
                Err(e) => {
                    log::warn!("Sign-in failed: {}", e);
                    clear_token();
                    set_error.set(Some(e));
                    set_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-gray-900">
            <div class="max-w-md w-full bg-gray-800 rounded-xl shadow-2xl p-8">
                <div class="text-center mb-8">
                    <h1 class="text-3xl font-bold text-white">"Tenantry"</h1>
                    <p class="text-gray-400 mt-2">"Platform administration"</p>
                </div>

                <form on:submit=on_submit class="space-y-6">
                    {move || error.get().map(|e| view! {
                        <div class="bg-red-900/50 border border-red-500 text-red-200 px-4 py-3 rounded">
                            {e}
                        </div>
                    })}

                    <div>
                        <label class="block text-sm font-medium text-gray-300 mb-2">"API URL"</label>
                        <input
                            type="text"
                            class="w-full px-4 py-3 bg-gray-700 border border-gray-600 rounded-lg
                                   text-white placeholder-gray-400 focus:outline-none focus:border-blue-500
                                   transition-colors"
                            prop:value=move || api_url.get()
                            on:input=move |ev| set_api_url.set(event_target_value(&ev))
                        />
                    </div>

                    <div>
                        <label class="block text-sm font-medium text-gray-300 mb-2">"Access token"</label>
                        <input
                            type="password"
                            class="w-full px-4 py-3 bg-gray-700 border border-gray-600 rounded-lg
                                   text-white placeholder-gray-400 focus:outline-none focus:border-blue-500
                                   transition-colors"
                            placeholder="Paste your access token"
                            prop:value=move || token.get()
                            on:input=move |ev| set_token.set(event_target_value(&ev))
                        />
                    </div>

                    <button
                        type="submit"
                        class="w-full py-3 px-4 bg-blue-600 hover:bg-blue-700 text-white font-medium
                               rounded-lg transition-colors focus:outline-none focus:ring-2
                               focus:ring-blue-500 focus:ring-offset-2 focus:ring-offset-gray-800
                               disabled:opacity-50 disabled:cursor-not-allowed"
                        disabled=move || loading.get()
                    >
                        {move || if loading.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
