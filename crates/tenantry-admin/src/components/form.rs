//! Form building blocks shared by the settings pages

use leptos::*;
use tenantry_core::utils::{class_if, merge_classes};

const INPUT: &str = "w-full px-4 py-2 bg-gray-700 border border-gray-600 rounded-lg text-white \
    placeholder-gray-400 focus:outline-none focus:border-blue-500 transition-colors";

#[component]
pub fn SettingsCard(
    title: &'static str,
    description: &'static str,
    children: Children,
    #[prop(optional)] danger: Option<bool>,
) -> impl IntoView {
    let border_class = if danger.unwrap_or(false) {
        "border-red-800"
    } else {
        "border-gray-700"
    };

    view! {
        <div class=format!("bg-gray-800 rounded-xl border {} p-6", border_class)>
            <div class="mb-4">
                <h2 class="text-lg font-semibold text-white">{title}</h2>
                <p class="text-sm text-gray-400">{description}</p>
            </div>
            {children()}
        </div>
    }
}

/// Inline message under a field.
#[component]
pub fn FieldError(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message
            .get()
            .map(|text| view! { <p class="mt-1 text-sm text-red-400">{text}</p> })
    }
}

#[component]
pub fn TextField(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into, optional)] error: Option<Signal<Option<String>>>,
    #[prop(optional)] placeholder: Option<&'static str>,
    #[prop(optional)] input_type: Option<&'static str>,
) -> impl IntoView {
    let error = error.unwrap_or_else(|| Signal::derive(|| None));
    let has_error = move || error.get().is_some();

    view! {
        <div>
            <label class="block text-sm font-medium text-gray-300 mb-2">{label}</label>
            <input
                type=input_type.unwrap_or("text")
                class=move || merge_classes([INPUT, class_if(has_error(), "border-red-500")])
                placeholder=placeholder.unwrap_or("")
                prop:value=move || value.get()
                on:input=move |ev| on_input.call(event_target_value(&ev))
            />
            <FieldError message=error />
        </div>
    }
}

/// Hex color input with a swatch.
#[component]
pub fn ColorField(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm font-medium text-gray-300 mb-2">{label}</label>
            <div class="flex items-center space-x-3">
                <input
                    type="color"
                    class="h-10 w-12 rounded border border-gray-600 bg-gray-700 cursor-pointer"
                    prop:value=move || value.get()
                    on:input=move |ev| on_input.call(event_target_value(&ev))
                />
                <input
                    type="text"
                    class=move || merge_classes([
                        INPUT,
                        "font-mono",
                        class_if(error.get().is_some(), "border-red-500"),
                    ])
                    prop:value=move || value.get()
                    on:input=move |ev| on_input.call(event_target_value(&ev))
                />
            </div>
            <FieldError message=error />
        </div>
    }
}

#[component]
pub fn SelectField(
    label: &'static str,
    options: Vec<(&'static str, &'static str)>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm font-medium text-gray-300 mb-2">{label}</label>
            <select
                class=INPUT
                on:change=move |ev| on_change.call(event_target_value(&ev))
            >
                {options.into_iter().map(|(option, text)| view! {
                    <option value=option selected=move || value.get() == option>{text}</option>
                }).collect_view()}
            </select>
        </div>
    }
}

#[component]
pub fn ToggleField(
    label: &'static str,
    description: &'static str,
    #[prop(into)] enabled: Signal<bool>,
    #[prop(into)] on_toggle: Callback<bool>,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between p-4 bg-gray-750 rounded-lg">
            <div>
                <p class="text-white font-medium">{label}</p>
                <p class="text-sm text-gray-400">{description}</p>
            </div>
            <button
                type="button"
                class=move || merge_classes([
                    "relative inline-flex h-6 w-11 items-center rounded-full transition-colors",
                    if enabled.get() { "bg-blue-600" } else { "bg-gray-600" },
                ])
                on:click=move |_| on_toggle.call(!enabled.get_untracked())
            >
                <span
                    class=move || merge_classes([
                        "inline-block h-4 w-4 transform rounded-full bg-white transition-transform",
                        if enabled.get() { "translate-x-6" } else { "translate-x-1" },
                    ])
                />
            </button>
        </div>
    }
}

/// Tab strip; `active` holds the index of the selected tab.
#[component]
pub fn Tabs(tabs: Vec<&'static str>, active: RwSignal<usize>) -> impl IntoView {
    view! {
        <div class="flex space-x-1 border-b border-gray-700">
            {tabs.into_iter().enumerate().map(|(index, label)| view! {
                <button
                    type="button"
                    class=move || merge_classes([
                        "px-4 py-2 text-sm font-medium border-b-2 -mb-px transition-colors",
                        if active.get() == index {
                            "border-blue-500 text-white"
                        } else {
                            "border-transparent text-gray-400 hover:text-white"
                        },
                    ])
                    on:click=move |_| active.set(index)
                >
                    {label}
                </button>
            }).collect_view()}
        </div>
    }
}
