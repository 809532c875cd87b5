//! Summary tiles

use leptos::*;

#[component]
pub fn StatCard(
    title: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(optional)] subtitle: Option<&'static str>,
    #[prop(optional)] color: Option<&'static str>,
    #[prop(optional)] icon: Option<&'static str>,
) -> impl IntoView {
    let bg_class = match color.unwrap_or("blue") {
        "blue" => "bg-blue-600/20",
        "green" => "bg-green-600/20",
        "purple" => "bg-purple-600/20",
        "red" => "bg-red-600/20",
        "yellow" => "bg-yellow-600/20",
        _ => "bg-gray-600/20",
    };

    let icon_path = match icon.unwrap_or("building") {
        "users" => "M12 4.354a4 4 0 110 5.292M15 21H3v-1a6 6 0 0112 0v1zm0 0h6v-1a6 6 0 00-9-5.197M13 7a4 4 0 11-8 0 4 4 0 018 0z",
        "check-circle" => "M9 12l2 2 4-4m6 2a9 9 0 11-18 0 9 9 0 0118 0z",
        "x-circle" => "M10 14l2-2m0 0l2-2m-2 2l-2-2m2 2l2 2m7-2a9 9 0 11-18 0 9 9 0 0118 0z",
        "card" => "M3 10h18M7 15h1m4 0h1m-7 4h12a3 3 0 003-3V8a3 3 0 00-3-3H6a3 3 0 00-3 3v8a3 3 0 003 3z",
        _ => "M19 21V5a2 2 0 00-2-2H7a2 2 0 00-2 2v16m14 0h2m-2 0h-5m-9 0H3m2 0h5M9 7h1m-1 4h1m4-4h1m-1 4h1m-5 10v-5a1 1 0 011-1h2a1 1 0 011 1v5m-4 0h4",
    };

    view! {
        <div class="bg-gray-800 rounded-xl p-6 border border-gray-700">
            <div class="flex items-start justify-between">
                <div>
                    <p class="text-sm font-medium text-gray-400">{title}</p>
                    <p class="text-3xl font-bold text-white mt-2">{move || value.get()}</p>
                    {subtitle.map(|s| view! {
                        <p class="text-sm text-gray-500 mt-1">{s}</p>
                    })}
                </div>
                <div class=format!("p-3 rounded-lg {}", bg_class)>
                    <div class="w-5 h-5 text-white opacity-80">
                        <svg fill="none" stroke="currentColor" viewBox="0 0 24 24">
                            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d=icon_path />
                        </svg>
                    </div>
                </div>
            </div>
        </div>
    }
}
