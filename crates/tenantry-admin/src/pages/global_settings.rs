//! Platform settings page

use std::rc::Rc;

use leptos::*;
use wasm_bindgen_futures::spawn_local;

use tenantry_core::console::{ConsoleContext, GlobalSettingsPage as Controller};
use tenantry_core::forms::{BrandingAction, GlobalSettingsAction};
use tenantry_core::store::Notifier;
use tenantry_core::types::GlobalSettings;
use tenantry_core::utils::format_size;

use super::business_settings::SettingsSkeleton;
use crate::api::BrowserFile;
use crate::components::{
    Button, ButtonVariant, ColorField, FileUploader, SettingsCard, TextField, ToggleField,
};

#[component]
pub fn GlobalSettingsPage() -> impl IntoView {
    let ctx = expect_context::<ConsoleContext>();

    let loader_ctx = ctx.clone();
    let loaded = create_local_resource(
        || (),
        move |_| {
            let ctx = loader_ctx.clone();
            async move { Controller::load(ctx).await.map_err(|e| e.to_string()) }
        },
    );

    let page = create_rw_signal(None::<Controller>);
    create_effect(move |_| {
        if let Some(Ok(controller)) = loaded.get() {
            page.set(Some(controller));
        }
    });

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold text-white">"Platform settings"</h1>
                <p class="text-gray-400 mt-1">"Defaults and branding shared by every tenant"</p>
            </div>

            {move || match loaded.get() {
                None => view! { <SettingsSkeleton /> }.into_view(),
                Some(Err(e)) => view! {
                    <p class="text-red-400">{format!("Failed to load platform settings: {}", e)}</p>
                }.into_view(),
                Some(Ok(_)) => view! { <SettingsForm page=page notifier=ctx.notifier.clone() /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn SettingsForm(page: RwSignal<Option<Controller>>, notifier: Rc<dyn Notifier>) -> impl IntoView {
    let pending_logo = create_rw_signal(None::<BrowserFile>);
    let saving = create_rw_signal(false);

    let draft = move |f: fn(&GlobalSettings) -> String| {
        Signal::derive(move || {
            page.with(|p| p.as_ref().map(|p| f(p.form().draft())).unwrap_or_default())
        })
    };
    let flag = move |f: fn(&GlobalSettings) -> bool| {
        Signal::derive(move || page.with(|p| p.as_ref().is_some_and(|p| f(p.form().draft()))))
    };
    let error = move |field: &'static str| {
        Signal::derive(move || {
            page.with(|p| {
                p.as_ref()
                    .and_then(|p| p.form().error_for(field).map(str::to_string))
            })
        })
    };
    // Frozen while a save runs on a copy of the controller.
    let edit = move |action: GlobalSettingsAction| {
        if saving.get_untracked() {
            return;
        }
        page.update(|p| {
            if let Some(p) = p {
                p.dispatch(action);
            }
        })
    };
    let branding = move |action: BrandingAction| edit(GlobalSettingsAction::Branding(action));

    let dirty = Signal::derive(move || {
        pending_logo.with(Option::is_some)
            || page.with(|p| p.as_ref().is_some_and(|p| p.form().is_dirty()))
    });
    let has_errors = Signal::derive(move || {
        page.with(|p| p.as_ref().is_some_and(|p| !p.form().errors().is_empty()))
    });
    let existing_logo = Signal::derive(move || {
        page.with(|p| {
            p.as_ref()
                .and_then(|p| p.form().draft().branding.logo_url.clone())
        })
    });
    let options = page.with_untracked(|p| p.as_ref().map(|p| p.context().logo_picker_options()));
    let options = options.unwrap_or_default();

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

    view! {
        <fieldset class="space-y-6" disabled=move || saving.get()>
        <SettingsCard title="Platform branding" description="Shown on the sign-in page and in emails">
            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                <div class="space-y-4">
                    <TextField
                        label="Platform name"
                        value=draft(|s| s.branding.display_name.clone())
                        on_input=move |v: String| branding(BrandingAction::SetDisplayName(v))
                        error=error("branding.displayName")
                    />
                    <TextField
                        label="Slogan"
                        value=draft(|s| s.branding.slogan.clone().unwrap_or_default())
                        on_input=move |v: String| branding(BrandingAction::SetSlogan(v))
                    />
                    <ColorField
                        label="Primary color"
                        value=draft(|s| s.branding.primary_color.clone())
                        on_input=move |v: String| branding(BrandingAction::SetPrimaryColor(v))
                        error=error("branding.primaryColor")
                    />
                    <ColorField
                        label="Secondary color"
                        value=draft(|s| s.branding.secondary_color.clone())
                        on_input=move |v: String| branding(BrandingAction::SetSecondaryColor(v))
                        error=error("branding.secondaryColor")
                    />
                </div>
                <FileUploader
                    label="Logo"
                    accept=options.accepted_types.clone()
                    max_size_bytes=options.max_size_bytes
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

        <SettingsCard title="Defaults" description="Values new tenants start with">
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <TextField
                    label="Support email"
                    input_type="email"
                    value=draft(|s| s.support_email.clone().unwrap_or_default())
                    on_input=move |v: String| edit(GlobalSettingsAction::SetSupportEmail(v))
                    error=error("supportEmail")
                />
                <TextField
                    label="Default currency"
                    value=draft(|s| s.default_currency.clone())
                    on_input=move |v: String| edit(GlobalSettingsAction::SetDefaultCurrency(v))
                    error=error("defaultCurrency")
                />
                <div>
                    <TextField
                        label="Maximum upload size (bytes)"
                        input_type="number"
                        value=draft(|s| s.max_upload_bytes.to_string())
                        on_input=move |v: String| {
                            if let Ok(max) = v.trim().parse::<u64>() {
                                edit(GlobalSettingsAction::SetMaxUploadBytes(max));
                            }
                        }
                        error=error("maxUploadBytes")
                    />
                    <p class="mt-1 text-xs text-gray-500">
                        {move || page.with(|p| p.as_ref().map(|p| format_size(p.form().draft().max_upload_bytes)))}
                    </p>
                </div>
            </div>
        </SettingsCard>

        <SettingsCard title="Access" description="Platform-wide switches" danger=true>
            <div class="space-y-3">
                <ToggleField
                    label="Maintenance mode"
                    description="Tenants see a maintenance notice and cannot sign in"
                    enabled=flag(|s| s.maintenance_mode)
                    on_toggle=move |on: bool| edit(GlobalSettingsAction::SetMaintenanceMode(on))
                />
                <ToggleField
                    label="Self sign-up"
                    description="Allow new businesses to register without an invitation"
                    enabled=flag(|s| s.allow_self_signup)
                    on_toggle=move |on: bool| edit(GlobalSettingsAction::SetAllowSelfSignup(on))
                />
            </div>
        </SettingsCard>
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
