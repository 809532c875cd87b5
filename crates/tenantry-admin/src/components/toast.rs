//! Transient notifications

use gloo_timers::callback::Timeout;
use leptos::*;
use tenantry_core::store::{NotificationLevel, Notifier};

const TOAST_MILLIS: u32 = 4_000;

#[derive(Debug, Clone, PartialEq)]
struct Toast {
    id: u32,
    level: NotificationLevel,
    message: String,
}

/// Notifier backed by a signal rendered by [`ToastHost`].
#[derive(Clone, Copy)]
pub struct ToastNotifier {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u32>,
}

impl ToastNotifier {
    pub fn new() -> Self {
        Self {
            toasts: create_rw_signal(Vec::new()),
            next_id: store_value(0),
        }
    }

    fn dismiss(&self, id: u32) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }
}

impl Default for ToastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        match level {
            NotificationLevel::Error => log::error!("{}", message),
            NotificationLevel::Warning => log::warn!("{}", message),
            _ => log::info!("{}", message),
        }

        let id = self.next_id.get_value();
        self.next_id.set_value(id.wrapping_add(1));
        self.toasts.update(|list| {
            list.push(Toast {
                id,
                level,
                message: message.to_string(),
            })
        });

        let this = *self;
        Timeout::new(TOAST_MILLIS, move || this.dismiss(id)).forget();
    }
}

#[component]
pub fn ToastHost(notifier: ToastNotifier) -> impl IntoView {
    view! {
        <div class="fixed bottom-4 right-4 z-50 space-y-2 w-80">
            <For
                each=move || notifier.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let class = match toast.level {
                        NotificationLevel::Success => "bg-green-900/90 border-green-600 text-green-100",
                        NotificationLevel::Info => "bg-gray-800/95 border-gray-600 text-gray-100",
                        NotificationLevel::Warning => "bg-yellow-900/90 border-yellow-600 text-yellow-100",
                        NotificationLevel::Error => "bg-red-900/90 border-red-600 text-red-100",
                    };
                    let id = toast.id;
                    view! {
                        <div class=format!("flex items-start justify-between px-4 py-3 rounded-lg border shadow-lg {}", class)>
                            <span class="text-sm">{toast.message}</span>
                            <button
                                class="ml-3 opacity-70 hover:opacity-100"
                                on:click=move |_| notifier.dismiss(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
