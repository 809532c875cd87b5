//! 404 page

use leptos::*;

use crate::components::Button;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let go_home = move |_: ()| {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/");
        }
    };

    view! {
        <div class="min-h-[60vh] flex items-center justify-center">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-white mb-4">"404"</h1>
                <h2 class="text-2xl font-semibold text-gray-300 mb-2">"Page not found"</h2>
                <p class="text-gray-400 mb-8 max-w-md mx-auto">
                    "There is nothing at this address."
                </p>
                <Button on_click=Callback::new(go_home)>"Back to the console"</Button>
            </div>
        </div>
    }
}
