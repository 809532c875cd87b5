//! Business settings page

use leptos::*;
use leptos_router::use_params_map;
use wasm_bindgen_futures::spawn_local;

use tenantry_core::console::{BusinessSettingsPage as Controller, ConsoleContext};
use tenantry_core::forms::{BrandingAction, TenantAction};
use tenantry_core::store::Notifier;
use tenantry_core::types::{TenantKind, TenantProfile};

use crate::api::BrowserFile;
use crate::components::{
    Button, ButtonVariant, ColorField, FileUploader, SelectField, SettingsCard, Tabs, TextField,
    ToggleField,
};

#[component]
pub fn BusinessSettingsPage() -> impl IntoView {
    let ctx = expect_context::<ConsoleContext>();
    let params = use_params_map();
    let tenant_id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());

    let loader_ctx = ctx.clone();
    let loaded = create_local_resource(tenant_id, move |id| {
        let ctx = loader_ctx.clone();
        async move { Controller::load(ctx, &id).await.map_err(|e| e.to_string()) }
    });

    let page = create_rw_signal(None::<Controller>);
    create_effect(move |_| {
        if let Some(Ok(controller)) = loaded.get() {
            page.set(Some(controller));
        }
    });

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold text-white">"Business settings"</h1>
                <p class="text-gray-400 mt-1">"Profile and branding shown to this business's customers"</p>
            </div>

            {move || match loaded.get() {
                None => view! { <SettingsSkeleton /> }.into_view(),
                Some(Err(e)) => view! {
                    <p class="text-red-400">{format!("Failed to load business: {}", e)}</p>
                }.into_view(),
                Some(Ok(_)) => view! { <TenantForm page=page notifier=ctx.notifier.clone() /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn TenantForm(
    page: RwSignal<Option<Controller>>,
    notifier: std::rc::Rc<dyn Notifier>,
) -> impl IntoView {
    let tab = create_rw_signal(0usize);
    let pending_logo = create_rw_signal(None::<BrowserFile>);
    let saving = create_rw_signal(false);

    let draft = move |f: fn(&TenantProfile) -> String| {
        Signal::derive(move || {
            page.with(|p| p.as_ref().map(|p| f(p.form().draft())).unwrap_or_default())
        })
    };
    let error = move |field: &'static str| {
        Signal::derive(move || {
            page.with(|p| {
                p.as_ref()
                    .and_then(|p| p.form().error_for(field).map(str::to_string))
            })
        })
    };
    // The save works on a copy of the controller, so the form is frozen until
    // it comes back.
    let edit = move |action: TenantAction| {
        if saving.get_untracked() {
            return;
        }
        page.update(|p| {
            if let Some(p) = p {
                p.dispatch(action);
            }
        })
    };
    let branding = move |action: BrandingAction| edit(TenantAction::Branding(action));

    let dirty = Signal::derive(move || {
        pending_logo.with(Option::is_some)
            || page.with(|p| p.as_ref().is_some_and(|p| p.form().is_dirty()))
    });
    let has_errors =
        Signal::derive(move || page.with(|p| p.as_ref().is_some_and(|p| !p.form().errors().is_empty())));

    let existing_logo = Signal::derive(move || {
        page.with(|p| {
            p.as_ref()
                .and_then(|p| p.form().draft().branding.logo_url.clone())
        })
    });
    let (max_logo_bytes, accepted) = page.with_untracked(|p| {
        p.as_ref()
            .map(|p| {
                let options = p.context().logo_picker_options();
                (options.max_size_bytes, options.accepted_types)
            })
            .unwrap_or_default()
    });
    let accepted = store_value(accepted);

    let on_save = move |_: ()| {
        let Some(mut controller) = page.get_untracked() else {
            return;
        };
        let file = pending_logo.get_untracked();
        let notifier = notifier.clone();
        saving.set(true);
        spawn_local(async move {
            let payload = match file {
                Some(file) => match file.to_payload().await {
                    Ok(payload) => Some(payload),
                    Err(e) => {
                        log::warn!("Reading logo failed: {:?}", e);
                        notifier.error("Could not read the selected logo");
                        saving.set(false);
                        return;
                    }
                },
                None => None,
            };
            if controller.save(payload).await.is_ok() {
                pending_logo.set(None);
            }
            page.set(Some(controller));
            saving.set(false);
        });
    };
    let on_reset = move |_: ()| {
        pending_logo.set(None);
        page.update(|p| {
            if let Some(p) = p {
                p.reset();
            }
        });
    };

    let kind_options = || {
        TenantKind::ALL
            .iter()
            .map(|k| (k.as_str(), k.label()))
            .collect::<Vec<_>>()
    };

    view! {
        <Tabs tabs=vec!["Profile", "Branding"] active=tab />

        <fieldset class="space-y-6" disabled=move || saving.get()>
        <Show
            when=move || tab.get() == 0
            fallback=move || view! {
                <SettingsCard title="Branding" description="Name, colors and logo used across the storefront">
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                        <div class="space-y-4">
                            <TextField
                                label="Display name"
                                value=draft(|t| t.branding.display_name.clone())
                                on_input=move |v: String| branding(BrandingAction::SetDisplayName(v))
                                error=error("branding.displayName")
                            />
                            <TextField
                                label="Slogan"
                                value=draft(|t| t.branding.slogan.clone().unwrap_or_default())
                                on_input=move |v: String| branding(BrandingAction::SetSlogan(v))
                            />
                            <ColorField
                                label="Primary color"
                                value=draft(|t| t.branding.primary_color.clone())
                                on_input=move |v: String| branding(BrandingAction::SetPrimaryColor(v))
                                error=error("branding.primaryColor")
                            />
                            <ColorField
                                label="Secondary color"
                                value=draft(|t| t.branding.secondary_color.clone())
                                on_input=move |v: String| branding(BrandingAction::SetSecondaryColor(v))
                                error=error("branding.secondaryColor")
                            />
                        </div>
                        <FileUploader
                            label="Logo"
                            accept=accepted.get_value()
                            max_size_bytes=max_logo_bytes
                            existing_preview_url=existing_logo
                            on_select=move |file: BrowserFile| {
                                if !saving.get_untracked() {
                                    pending_logo.set(Some(file));
                                }
                            }
                            on_clear=move |_: ()| {
                                if saving.get_untracked() {
                                    return;
                                }
                                pending_logo.set(None);
                                branding(BrandingAction::SetLogoUrl(None));
                            }
                        />
                    </div>
                </SettingsCard>
            }
        >
            <SettingsCard title="Profile" description="How this business is registered on the platform">
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <TextField
                        label="Name"
                        value=draft(|t| t.name.clone())
                        on_input=move |v: String| edit(TenantAction::SetName(v))
                        error=error("name")
                    />
                    <SelectField
                        label="Type"
                        options=kind_options()
                        value=draft(|t| t.kind.as_str().to_string())
                        on_change=move |v: String| {
                            if let Some(kind) = TenantKind::parse(&v) {
                                edit(TenantAction::SetKind(kind));
                            }
                        }
                    />
                    <TextField
                        label="Contact email"
                        input_type="email"
                        value=draft(|t| t.contact_email.clone().unwrap_or_default())
                        on_input=move |v: String| edit(TenantAction::SetContactEmail(v))
                        error=error("contactEmail")
                    />
                    <TextField
                        label="Phone"
                        value=draft(|t| t.phone.clone().unwrap_or_default())
                        on_input=move |v: String| edit(TenantAction::SetPhone(v))
                    />
                    <TextField
                        label="Address"
                        value=draft(|t| t.address.clone().unwrap_or_default())
                        on_input=move |v: String| edit(TenantAction::SetAddress(v))
                    />
                    <TextField
                        label="Currency"
                        placeholder="USD"
                        value=draft(|t| t.currency.clone())
                        on_input=move |v: String| edit(TenantAction::SetCurrency(v))
                        error=error("currency")
                    />
                </div>
                <div class="mt-4">
                    <ToggleField
                        label="Active"
                        description="Inactive businesses cannot sign in"
                        enabled=Signal::derive(move || {
                            page.with(|p| p.as_ref().is_some_and(|p| p.form().draft().active))
                        })
                        on_toggle=move |on: bool| edit(TenantAction::SetActive(on))
                    />
                </div>
            </SettingsCard>
        </Show>
        </fieldset>

        <div class="flex justify-end space-x-3">
            <Button
                variant=ButtonVariant::Secondary
                disabled=Signal::derive(move || !dirty.get() || saving.get())
                on_click=Callback::new(on_reset)
            >
                "Reset"
            </Button>
            <Button
                disabled=Signal::derive(move || !dirty.get() || has_errors.get())
                loading=saving
                on_click=Callback::new(on_save)
            >
                "Save changes"
            </Button>
        </div>
    }
}

#[component]
pub(crate) fn SettingsSkeleton() -> impl IntoView {
    view! {
        <div class="animate-pulse space-y-4">
            <div class="h-10 bg-gray-700 rounded w-1/3"></div>
            <div class="h-48 bg-gray-700 rounded"></div>
        </div>
    }
}
