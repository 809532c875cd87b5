//! Logo picker with drag & drop and an inline preview

use leptos::html::Input;
use leptos::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{DragEvent, FileList};

use tenantry_core::picker::{
    DecodeError, PickedFile, PickerEffect, PickerEvent, PickerOptions, PickerState,
};
use tenantry_core::utils::{class_if, format_size, merge_classes};

use crate::api::{read_as_data_url, BrowserFile};

/// Handles needed to run picker effects, shared by every event handler.
#[derive(Clone, Copy)]
struct Picker {
    state: RwSignal<PickerState<BrowserFile>>,
    input: NodeRef<Input>,
    on_select: Callback<BrowserFile>,
    on_clear: Option<Callback<()>>,
}

impl Picker {
    fn dispatch(self, event: PickerEvent<BrowserFile>) {
        let mut effects = Vec::new();
        self.state.update(|state| {
            let transition = state.clone().reduce(event);
            *state = transition.state;
            effects = transition.effects;
        });

        for effect in effects {
            match effect {
                PickerEffect::Selected(file) => self.on_select.call(file),
                PickerEffect::StartDecode(file) => spawn_local(async move {
                    let result = read_as_data_url(file.file())
                        .await
                        .map_err(|e| DecodeError(format!("{:?}", e)));
                    self.dispatch(PickerEvent::DecodeFinished(result));
                }),
                PickerEffect::Cleared => {
                    if let Some(on_clear) = self.on_clear {
                        on_clear.call(());
                    }
                }
                PickerEffect::ResetInput => {
                    if let Some(input) = self.input.get_untracked() {
                        input.set_value("");
                    }
                }
            }
        }
    }
}

fn collect_files(list: Option<FileList>) -> Vec<BrowserFile> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(BrowserFile::new)
        .collect()
}

#[component]
pub fn FileUploader(
    #[prop(into)] on_select: Callback<BrowserFile>,
    #[prop(into, optional)] on_clear: Option<Callback<()>>,
    #[prop(into, optional)] existing_preview_url: MaybeSignal<Option<String>>,
    #[prop(optional)] accept: Option<String>,
    #[prop(optional)] max_size_bytes: Option<u64>,
    #[prop(optional)] label: Option<&'static str>,
) -> impl IntoView {
    let defaults = PickerOptions::default();
    let options = PickerOptions::new(
        accept.unwrap_or(defaults.accepted_types),
        max_size_bytes.unwrap_or(defaults.max_size_bytes),
    );
    let accept_attr = options.accepted_types.clone();
    let max_label = format_size(options.max_size_bytes);

    let state = create_rw_signal(PickerState::new(
        options,
        existing_preview_url.get_untracked(),
    ));
    let input = create_node_ref::<Input>();
    let picker = Picker {
        state,
        input,
        on_select,
        on_clear,
    };

    create_effect(move |prev: Option<Option<String>>| {
        let url = existing_preview_url.get();
        if prev.is_some_and(|prev| prev != url) {
            picker.dispatch(PickerEvent::ExistingUrlChanged(url.clone()));
        }
        url
    });

    let on_dragenter = move |ev: DragEvent| {
        ev.prevent_default();
        picker.dispatch(PickerEvent::DragEnter);
    };
    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        picker.dispatch(PickerEvent::DragOver);
    };
    let on_dragleave = move |ev: DragEvent| {
        ev.prevent_default();
        picker.dispatch(PickerEvent::DragLeave);
    };
    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        let files = collect_files(ev.data_transfer().and_then(|dt| dt.files()));
        picker.dispatch(PickerEvent::Drop(files));
    };
    let on_change = move |_| {
        let files = collect_files(input.get_untracked().and_then(|el| el.files()));
        if let Some(file) = files.into_iter().next() {
            picker.dispatch(PickerEvent::Select(file));
        }
    };
    let on_browse = move |_| {
        if let Some(el) = input.get_untracked() {
            el.click();
        }
    };

    let zone_class = move || {
        let dragging = state.with(|s| s.is_dragging());
        let failed = state.with(|s| s.error().is_some());
        merge_classes([
            "relative border-2 border-dashed rounded-xl p-6 text-center cursor-pointer transition-colors",
            if dragging {
                "border-blue-500 bg-blue-500/10"
            } else {
                "border-gray-600 hover:border-gray-500"
            },
            class_if(failed, "border-red-500"),
        ])
    };

    view! {
        <div>
            {label.map(|text| view! {
                <label class="block text-sm font-medium text-gray-300 mb-2">{text}</label>
            })}
            <div
                class=zone_class
                on:dragenter=on_dragenter
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:drop=on_drop
                on:click=on_browse
            >
                <input
                    node_ref=input
                    type="file"
                    class="hidden"
                    accept=accept_attr
                    on:change=on_change
                    on:click=|ev| ev.stop_propagation()
                />
                {move || {
                    let preview = state.with(|s| s.preview().map(str::to_string));
                    let selected = state.with(|s| s.selected().cloned());
                    match (preview, selected) {
                        (Some(url), _) => view! {
                            <img src=url alt="Preview" class="mx-auto max-h-32 rounded-lg object-contain" />
                        }.into_view(),
                        (None, Some(file)) if !file.is_image() => view! {
                            <div class="text-gray-300">
                                <p class="font-medium">{file.name().to_string()}</p>
                                <p class="text-sm text-gray-500">{format_size(file.size())}</p>
                            </div>
                        }.into_view(),
                        _ => view! {
                            <div class="text-gray-400">
                                <svg class="w-10 h-10 mx-auto mb-2" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M4 16l4.586-4.586a2 2 0 012.828 0L16 16m-2-2l1.586-1.586a2 2 0 012.828 0L20 14m-6-6h.01M6 20h12a2 2 0 002-2V6a2 2 0 00-2-2H6a2 2 0 00-2 2v12a2 2 0 002 2z" />
                                </svg>
                                <p>"Drop an image here or click to browse"</p>
                                <p class="text-xs text-gray-500 mt-1">{format!("Up to {}", max_label)}</p>
                            </div>
                        }.into_view(),
                    }
                }}
            </div>
            {move || state.with(|s| s.error().map(|e| e.to_string())).map(|text| view! {
                <p class="mt-2 text-sm text-red-400">{text}</p>
            })}
            <Show when=move || state.with(|s| s.preview().is_some() || s.selected().is_some())>
                <button
                    type="button"
                    class="mt-2 text-sm text-gray-400 hover:text-red-400 transition-colors"
                    on:click=move |_| picker.dispatch(PickerEvent::Clear)
                >
                    "Remove"
                </button>
            </Show>
        </div>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use js_sys::{Array, Uint8Array};
    use tenantry_core::utils::encode_data_url;
    use wasm_bindgen_test::*;
    use web_sys::{File, FilePropertyBag};

    wasm_bindgen_test_configure!(run_in_browser);

    fn browser_file(name: &str, mime_type: &str, bytes: &[u8]) -> BrowserFile {
        let parts = Array::new();
        parts.push(&Uint8Array::from(bytes));
        let options = FilePropertyBag::new();
        options.set_type(mime_type);
        BrowserFile::new(
            File::new_with_u8_array_sequence_and_options(&parts, name, &options).unwrap(),
        )
    }

    struct Harness {
        picker: Picker,
        selected: RwSignal<Vec<String>>,
        clears: RwSignal<usize>,
    }

    fn harness(max_size_bytes: u64, existing: Option<&str>) -> Harness {
        let selected = create_rw_signal(Vec::<String>::new());
        let clears = create_rw_signal(0usize);
        let picker = Picker {
            state: create_rw_signal(PickerState::new(
                PickerOptions::new("image/*", max_size_bytes),
                existing.map(str::to_string),
            )),
            input: create_node_ref::<Input>(),
            on_select: Callback::new(move |file: BrowserFile| {
                selected.update(|names| names.push(file.name().to_string()))
            }),
            on_clear: Some(Callback::new(move |_: ()| clears.update(|n| *n += 1))),
        };
        Harness {
            picker,
            selected,
            clears,
        }
    }

    fn preview(picker: Picker) -> Option<String> {
        picker
            .state
            .with_untracked(|s| s.preview().map(str::to_string))
    }

    async fn wait_for_preview(picker: Picker) -> Option<String> {
        for _ in 0..50 {
            if let Some(url) = preview(picker) {
                return Some(url);
            }
            TimeoutFuture::new(20).await;
        }
        None
    }

    #[wasm_bindgen_test]
    async fn test_image_selection_decodes_preview_and_clears() {
        let runtime = create_runtime();
        let h = harness(1024, None);
        let bytes = [137u8, 80, 78, 71];

        h.picker
            .dispatch(PickerEvent::Select(browser_file("logo.png", "image/png", &bytes)));
        assert_eq!(h.selected.get_untracked(), vec!["logo.png".to_string()]);

        let url = wait_for_preview(h.picker).await;
        assert_eq!(url, Some(encode_data_url("image/png", &bytes)));

        h.picker.dispatch(PickerEvent::Clear);
        assert_eq!(h.clears.get_untracked(), 1);
        assert_eq!(preview(h.picker), None);
        assert!(h.picker.state.with_untracked(|s| s.selected().is_none()));
        runtime.dispose();
    }

    #[wasm_bindgen_test]
    fn test_oversized_file_is_rejected_without_callback() {
        let runtime = create_runtime();
        let h = harness(2, Some("https://cdn.example.com/logo.png"));

        h.picker
            .dispatch(PickerEvent::Select(browser_file("big.png", "image/png", &[1, 2, 3])));
        assert!(h.selected.get_untracked().is_empty());
        assert!(h.picker.state.with_untracked(|s| s.error().is_some()));
        assert_eq!(
            preview(h.picker).as_deref(),
            Some("https://cdn.example.com/logo.png")
        );
        runtime.dispose();
    }

    #[wasm_bindgen_test]
    fn test_drop_selects_first_file_only() {
        let runtime = create_runtime();
        let h = harness(1024, Some("https://cdn.example.com/logo.png"));

        h.picker.dispatch(PickerEvent::DragEnter);
        assert!(h.picker.state.with_untracked(|s| s.is_dragging()));
        h.picker.dispatch(PickerEvent::Drop(Vec::new()));
        assert!(h.selected.get_untracked().is_empty());
        assert!(!h.picker.state.with_untracked(|s| s.is_dragging()));

        h.picker.dispatch(PickerEvent::Drop(vec![
            browser_file("terms.pdf", "application/pdf", b"%PDF"),
            browser_file("logo.png", "image/png", &[1]),
        ]));
        assert_eq!(h.selected.get_untracked(), vec!["terms.pdf".to_string()]);
        assert_eq!(preview(h.picker), None);
        runtime.dispose();
    }
}
