//! Sidebar navigation

use leptos::*;
use leptos_router::use_location;
use tenantry_core::console::ConsoleContext;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = expect_context::<ConsoleContext>();
    let location = use_location();

    let is_active = move |path: &str| location.pathname.get().starts_with(path);

    let super_admin = ctx.user.is_super_admin();
    let settings_href = ctx
        .user
        .tenant_id
        .as_ref()
        .map(|id| format!("/tenants/{}/settings", id));

    view! {
        <aside class="w-64 bg-gray-900 border-r border-gray-700 flex flex-col">
            <div class="h-16 flex items-center px-6 border-b border-gray-700">
                <a href="/" class="flex items-center space-x-3">
                    <svg class="w-8 h-8 text-blue-500" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d=ICON_TENANTS />
                    </svg>
                    <span class="text-xl font-bold text-white">"Tenantry"</span>
                </a>
            </div>

            <nav class="flex-1 px-4 py-6 space-y-2">
                {super_admin.then(|| view! {
                    <NavItem
                        href="/tenants".to_string()
                        icon=ICON_TENANTS
                        label="Tenants"
                        active=Signal::derive(move || is_active("/tenants"))
                    />
                })}
                {settings_href.map(|href| view! {
                    <NavItem
                        href=href
                        icon=ICON_BUSINESS
                        label="Business settings"
                        active=Signal::derive(move || {
                            !super_admin && is_active("/tenants")
                        })
                    />
                })}
                <NavItem
                    href="/users".to_string()
                    icon=ICON_USERS
                    label="Users"
                    active=Signal::derive(move || is_active("/users"))
                />
                <NavItem
                    href="/billing".to_string()
                    icon=ICON_BILLING
                    label="Billing"
                    active=Signal::derive(move || is_active("/billing"))
                />

                {super_admin.then(|| view! {
                    <div class="pt-4 mt-4 border-t border-gray-700">
                        <NavItem
                            href="/settings".to_string()
                            icon=ICON_SETTINGS
                            label="Platform settings"
                            active=Signal::derive(move || is_active("/settings"))
                        />
                    </div>
                })}
            </nav>

            <div class="px-6 py-4 border-t border-gray-700">
                <div class="text-xs text-gray-500">
                    {format!("Tenantry v{}", tenantry_core::VERSION)}
                </div>
            </div>
        </aside>
    }
}

#[component]
fn NavItem(
    href: String,
    icon: &'static str,
    label: &'static str,
    active: Signal<bool>,
) -> impl IntoView {
    view! {
        <a
            href=href
            class=move || {
                let base = "flex items-center px-4 py-3 rounded-lg transition-colors";
                if active.get() {
                    format!("{} bg-blue-600 text-white", base)
                } else {
                    format!("{} text-gray-400 hover:bg-gray-800 hover:text-white", base)
                }
            }
        >
            <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d=icon />
            </svg>
            <span class="ml-3">{label}</span>
        </a>
    }
}

const ICON_TENANTS: &str = "M19 21V5a2 2 0 00-2-2H7a2 2 0 00-2 2v16m14 0h2m-2 0h-5m-9 0H3m2 0h5M9 7h1m-1 4h1m4-4h1m-1 4h1m-5 10v-5a1 1 0 011-1h2a1 1 0 011 1v5m-4 0h4";

const ICON_BUSINESS: &str = "M7 21a4 4 0 01-4-4V5a2 2 0 012-2h4a2 2 0 012 2v12a4 4 0 01-4 4zm0 0h12a2 2 0 002-2v-4a2 2 0 00-2-2h-2.343M11 7.343l1.657-1.657a2 2 0 012.828 0l2.829 2.829a2 2 0 010 2.828l-8.486 8.485M7 17h.01";

const ICON_USERS: &str = "M12 4.354a4 4 0 110 5.292M15 21H3v-1a6 6 0 0112 0v1zm0 0h6v-1a6 6 0 00-9-5.197M13 7a4 4 0 11-8 0 4 4 0 018 0z";

const ICON_BILLING: &str = "M3 10h18M7 15h1m4 0h1m-7 4h12a3 3 0 003-3V8a3 3 0 00-3-3H6a3 3 0 00-3 3v8a3 3 0 003 3z";

const ICON_SETTINGS: &str = "M10.325 4.317c.426-1.756 2.924-1.756 3.35 0a1.724 1.724 0 002.573 1.066c1.543-.94 3.31.826 2.37 2.37a1.724 1.724 0 001.065 2.572c1.756.426 1.756 2.924 0 3.35a1.724 1.724 0 00-1.066 2.573c.94 1.543-.826 3.31-2.37 2.37a1.724 1.724 0 00-2.572 1.065c-.426 1.756-2.924 1.756-3.35 0a1.724 1.724 0 00-2.573-1.066c-1.543.94-3.31-.826-2.37-2.37a1.724 1.724 0 00-1.065-2.572c-1.756-.426-1.756-2.924 0-3.35a1.724 1.724 0 001.066-2.573c-.94-1.543.826-3.31 2.37-2.37.996.608 2.296.07 2.572-1.065z";
