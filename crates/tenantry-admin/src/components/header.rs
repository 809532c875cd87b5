//! Header with the acting user's menu

use leptos::*;
use tenantry_core::console::ConsoleContext;

use crate::api::clear_token;

#[component]
pub fn Header() -> impl IntoView {
    let ctx = expect_context::<ConsoleContext>();
    let (show_user_menu, set_show_user_menu) = create_signal(false);

    let name = if ctx.user.display_name.is_empty() {
        ctx.user.email.clone()
    } else {
        ctx.user.display_name.clone()
    };
    let initial = name
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase().to_string())
        .unwrap_or_default();
    let scope = match &ctx.user.tenant_id {
        Some(tenant) => format!("{} · {}", ctx.user.role.label(), tenant),
        None => ctx.user.role.label().to_string(),
    };

    let on_logout = move |_| {
        clear_token();
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/login");
        }
    };

    view! {
        <header class="h-16 bg-gray-900 border-b border-gray-700 flex items-center justify-end px-6">
            <div class="relative">
                <button
                    class="flex items-center space-x-3 p-2 rounded-lg hover:bg-gray-800 transition-colors"
                    on:click=move |_| set_show_user_menu.update(|v| *v = !*v)
                >
                    <div class="w-8 h-8 bg-blue-600 rounded-full flex items-center justify-center">
                        <span class="text-sm font-medium text-white">{initial}</span>
                    </div>
                    <div class="text-left">
                        <p class="text-sm text-gray-200">{name}</p>
                        <p class="text-xs text-gray-500">{scope}</p>
                    </div>
                    <svg class="w-4 h-4 text-gray-400" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M19 9l-7 7-7-7" />
                    </svg>
                </button>

                {move || show_user_menu.get().then(|| view! {
                    <div class="absolute right-0 mt-2 w-48 bg-gray-800 rounded-lg shadow-lg border border-gray-700 py-1 z-50">
                        <button
                            class="block w-full text-left px-4 py-2 text-sm text-red-400 hover:bg-gray-700"
                            on:click=on_logout
                        >
                            "Sign Out"
                        </button>
                    </div>
                })}
            </div>
        </header>
    }
}
