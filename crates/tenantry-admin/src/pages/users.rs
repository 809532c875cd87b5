//! Users management page

use leptos::*;
use leptos_router::use_query_map;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;

use tenantry_core::console::{ConsoleContext, ImportReport, UsersPage as Controller};
use tenantry_core::forms::NewUser;
use tenantry_core::store::Notifier;
use tenantry_core::types::{AdminUser, UserRole};
use tenantry_core::utils::{format_date, parse_csv};

use super::run_with;
use crate::api::read_as_text;
use crate::components::{
    Button, ButtonVariant, ConfirmModal, IconButton, Modal, SelectField, Table, TableEmpty,
    TableHeader, TableLoading, TextField,
};

const PREVIEW_ROWS: usize = 5;

fn role_options(super_admin: bool) -> Vec<(&'static str, &'static str)> {
    let mut roles = vec![UserRole::TenantAdmin, UserRole::Staff];
    if super_admin {
        roles.insert(0, UserRole::SuperAdmin);
    }
    roles.into_iter().map(|r| (r.as_str(), r.label())).collect()
}

#[component]
pub fn UsersPage() -> impl IntoView {
    let ctx = expect_context::<ConsoleContext>();
    let super_admin = ctx.user.is_super_admin();
    let query = use_query_map();
    let tenant = move || query.with(|q| q.get("tenant").cloned().filter(|t| !t.is_empty()));

    let loader_ctx = ctx.clone();
    let loaded = create_local_resource(tenant, move |tenant| {
        let ctx = loader_ctx.clone();
        async move {
            Controller::load(ctx, tenant.as_deref())
                .await
                .map_err(|e| e.to_string())
        }
    });

    let page = create_rw_signal(None::<Controller>);
    create_effect(move |_| {
        if let Some(Ok(controller)) = loaded.get() {
            page.set(Some(controller));
        }
    });

    let busy = create_rw_signal(false);
    let show_create = create_rw_signal(false);
    let show_import = create_rw_signal(false);
    let pending_delete = create_rw_signal(None::<AdminUser>);

    let users = move || {
        page.with(|p| p.as_ref().map(|p| p.users().to_vec()).unwrap_or_default())
    };

    let on_confirm_delete = move |_: ()| {
        let Some(user) = pending_delete.get_untracked() else {
            return;
        };
        pending_delete.set(None);
        run_with(page, busy, move |mut p| async move {
            let _ = p.delete(&user.id).await;
            p
        });
    };

    let self_id = ctx.user.id.clone();
    let own_tenant = ctx.user.tenant_id.clone();

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-2xl font-bold text-white">"Users"</h1>
                    <p class="text-gray-400 mt-1">
                        {move || match page.with(|p| p.as_ref().and_then(|p| p.scope().map(str::to_string))) {
                            Some(scope) => format!("Administrators of {}", scope),
                            None => "Administrators across every tenant".to_string(),
                        }}
                    </p>
                </div>
                <div class="flex space-x-3">
                    <Button
                        variant=ButtonVariant::Secondary
                        on_click=Callback::new(move |_: ()| show_import.set(true))
                    >
                        "Import CSV"
                    </Button>
                    <Button on_click=Callback::new(move |_: ()| show_create.set(true))>
                        "Create user"
                    </Button>
                </div>
            </div>

            <Table>
                <TableHeader columns=vec!["User", "Role", "Tenant", "Status", "Created", ""] />
                <tbody class="divide-y divide-gray-700">
                    {move || match loaded.get() {
                        None => view! { <TableLoading colspan=6 /> }.into_view(),
                        Some(Err(e)) => view! {
                            <TableEmpty message=format!("Failed to load users: {}", e) colspan=6 />
                        }.into_view(),
                        Some(Ok(_)) if users().is_empty() => view! {
                            <TableEmpty message="No users yet" colspan=6 />
                        }.into_view(),
                        Some(Ok(_)) => {
                            let self_id = self_id.clone();
                            view! {
                                <For
                                    each=users
                                    key=|u| (u.id.clone(), u.active, u.role)
                                    children=move |user| view! {
                                        <UserRow
                                            is_self=user.id == self_id
                                            user=user
                                            page=page
                                            busy=busy
                                            super_admin=super_admin
                                            on_delete=move |u: AdminUser| pending_delete.set(Some(u))
                                        />
                                    }
                                />
                            }.into_view()
                        }
                    }}
                </tbody>
            </Table>

            <CreateUserModal
                show=show_create
                page=page
                busy=busy
                super_admin=super_admin
                own_tenant=own_tenant
            />
            <ImportUsersModal
                show=show_import
                page=page
                busy=busy
                super_admin=super_admin
                notifier=ctx.notifier.clone()
            />
            <ConfirmModal
                title="Delete user"
                message=Signal::derive(move || {
                    pending_delete
                        .get()
                        .map(|u| format!("Delete {}? They will lose access immediately.", u.email))
                        .unwrap_or_default()
                })
                show=Signal::derive(move || pending_delete.with(Option::is_some))
                on_confirm=on_confirm_delete
                on_cancel=move |_: ()| pending_delete.set(None)
                confirm_text="Delete"
                danger=true
            />
        </div>
    }
}

#[component]
fn UserRow(
    user: AdminUser,
    is_self: bool,
    page: RwSignal<Option<Controller>>,
    busy: RwSignal<bool>,
    super_admin: bool,
    #[prop(into)] on_delete: Callback<AdminUser>,
) -> impl IntoView {
    let id = user.id.clone();
    let active = user.active;
    let role = user.role;

    let toggle_id = id.clone();
    let on_toggle = move |_| {
        let id = toggle_id.clone();
        run_with(page, busy, move |mut p| async move {
            let _ = p.set_active(&id, !active).await;
            p
        });
    };
    let on_role = move |value: String| {
        let Some(new_role) = UserRole::parse(&value) else {
            return;
        };
        if new_role == role {
            return;
        }
        let id = id.clone();
        run_with(page, busy, move |mut p| async move {
            let _ = p.set_role(&id, new_role).await;
            p
        });
    };

    let initial = user
        .display_name
        .chars()
        .next()
        .unwrap_or('U')
        .to_uppercase()
        .to_string();
    let deleted = user.clone();
    let locked = is_self || (role == UserRole::SuperAdmin && !super_admin);

    view! {
        <tr class="hover:bg-gray-750 transition-colors">
            <td class="px-4 py-3">
                <div class="flex items-center space-x-3">
                    <div class="w-10 h-10 bg-blue-600 rounded-full flex items-center justify-center">
                        <span class="text-white font-medium">{initial}</span>
                    </div>
                    <div>
                        <p class="text-white font-medium">{user.display_name.clone()}</p>
                        <p class="text-sm text-gray-400">{user.email.clone()}</p>
                    </div>
                </div>
            </td>
            <td class="px-4 py-3">
                {if locked {
                    view! { <span class="text-gray-300">{role.label()}</span> }.into_view()
                } else {
                    view! {
                        <select
                            class="bg-gray-700 border border-gray-600 rounded px-2 py-1 text-sm text-white"
                            disabled=move || busy.get()
                            on:change=move |ev| on_role(event_target_value(&ev))
                        >
                            {role_options(super_admin).into_iter().map(|(value, label)| view! {
                                <option value=value selected=value == role.as_str()>{label}</option>
                            }).collect_view()}
                        </select>
                    }.into_view()
                }}
            </td>
            <td class="px-4 py-3 text-gray-300">
                {user.tenant_id.clone().unwrap_or_else(|| "-".to_string())}
            </td>
            <td class="px-4 py-3">
                <button
                    class="cursor-pointer disabled:cursor-not-allowed"
                    disabled=move || busy.get() || is_self
                    on:click=on_toggle
                    title=if active { "Click to disable" } else { "Click to enable" }
                >
                    {if active {
                        view! { <span class="px-2 py-1 text-xs bg-green-600/20 text-green-400 rounded">"Active"</span> }
                    } else {
                        view! { <span class="px-2 py-1 text-xs bg-red-600/20 text-red-400 rounded">"Disabled"</span> }
                    }}
                </button>
            </td>
            <td class="px-4 py-3 text-sm text-gray-400">{format_date(&user.created_at)}</td>
            <td class="px-4 py-3 text-right">
                <IconButton
                    variant=ButtonVariant::Danger
                    title="Delete user"
                    disabled=Signal::derive(move || busy.get() || is_self)
                    on_click=move |_: ()| on_delete.call(deleted.clone())
                >
                    <svg class="w-4 h-4" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2"
                            d="M19 7l-.867 12.142A2 2 0 0116.138 21H7.862a2 2 0 01-1.995-1.858L5 7m5 4v6m4-6v6m1-10V4a1 1 0 00-1-1h-4a1 1 0 00-1 1v3M4 7h16" />
                    </svg>
                </IconButton>
            </td>
        </tr>
    }
}

#[component]
fn CreateUserModal(
    show: RwSignal<bool>,
    page: RwSignal<Option<Controller>>,
    busy: RwSignal<bool>,
    super_admin: bool,
    own_tenant: Option<String>,
) -> impl IntoView {
    let email = create_rw_signal(String::new());
    let name = create_rw_signal(String::new());
    let role = create_rw_signal(UserRole::Staff.as_str().to_string());
    let tenant = create_rw_signal(own_tenant.clone().unwrap_or_default());
    let submitted = create_rw_signal(false);

    let draft = move || {
        let role = UserRole::parse(&role.get()).unwrap_or(UserRole::Staff);
        let new_user = NewUser::new(email.get(), name.get(), role);
        match tenant.get().trim() {
            "" => new_user,
            id => new_user.with_tenant(id),
        }
    };
    let error = move |field: &'static str| {
        Signal::derive(move || {
            if !submitted.get() {
                return None;
            }
            draft()
                .validate()
                .into_iter()
                .find(|e| e.field == field)
                .map(|e| e.message)
        })
    };

    let close = move || {
        show.set(false);
        submitted.set(false);
        email.set(String::new());
        name.set(String::new());
    };

    let on_submit = move |_: ()| {
        submitted.set(true);
        let new_user = draft();
        if !new_user.validate().is_empty() {
            return;
        }
        run_with(page, busy, move |mut p| async move {
            if p.create(new_user).await.is_ok() {
                close();
            }
            p
        });
    };

    view! {
        <Modal title="Create user" show=show on_close=move |_: ()| close()>
            <div class="space-y-4">
                <TextField
                    label="Email"
                    input_type="email"
                    placeholder="jane@example.com"
                    value=email
                    on_input=move |v: String| email.set(v)
                    error=error("email")
                />
                <TextField
                    label="Name"
                    placeholder="Defaults to the email's user name"
                    value=name
                    on_input=move |v: String| name.set(v)
                />
                <SelectField
                    label="Role"
                    options=role_options(super_admin)
                    value=role
                    on_change=move |v: String| role.set(v)
                />
                {super_admin.then(|| view! {
                    <TextField
                        label="Tenant"
                        placeholder="Tenant id, empty for super admins"
                        value=tenant
                        on_input=move |v: String| tenant.set(v)
                        error=error("tenantId")
                    />
                })}
                <div class="flex justify-end space-x-3 pt-2">
                    <Button variant=ButtonVariant::Secondary on_click=Callback::new(move |_: ()| close())>
                        "Cancel"
                    </Button>
                    <Button loading=busy on_click=Callback::new(on_submit)>
                        "Create"
                    </Button>
                </div>
            </div>
        </Modal>
    }
}

#[component]
fn ImportUsersModal(
    show: RwSignal<bool>,
    page: RwSignal<Option<Controller>>,
    busy: RwSignal<bool>,
    super_admin: bool,
    notifier: std::rc::Rc<dyn Notifier>,
) -> impl IntoView {
    let text = create_rw_signal(String::new());
    let file_name = create_rw_signal(None::<String>);
    let tenant = create_rw_signal(String::new());
    let report = create_rw_signal(None::<ImportReport>);
    let notifier = store_value(notifier);

    let table = create_memo(move |_| text.with(|t| parse_csv(t)));
    let missing_email = move || table.with(|t| !t.is_empty() && !t.has_column("email"));

    let on_file = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        file_name.set(Some(file.name()));
        report.set(None);
        spawn_local(async move {
            match read_as_text(&file).await {
                Ok(content) => text.set(content),
                Err(e) => {
                    log::warn!("Reading CSV failed: {:?}", e);
                    notifier.with_value(|n| n.error("Could not read the selected file"));
                }
            }
        });
    };

    let close = move || {
        show.set(false);
        text.set(String::new());
        file_name.set(None);
        report.set(None);
    };

    let on_import = move |_: ()| {
        let content = text.get_untracked();
        let tenant_id = Some(tenant.get_untracked()).filter(|t| !t.trim().is_empty());
        run_with(page, busy, move |mut p| async move {
            if let Ok(outcome) = p.import_csv(&content, tenant_id.as_deref()).await {
                report.set(Some(outcome));
            }
            p
        });
    };

    view! {
        <Modal title="Import users" show=show on_close=move |_: ()| close() size="lg">
            <div class="space-y-4">
                <p class="text-sm text-gray-400">
                    "Upload a CSV with an " <code>"email"</code> " column and optional "
                    <code>"name"</code> " and " <code>"role"</code> " columns."
                </p>
                <input
                    type="file"
                    accept=".csv,text/csv"
                    class="block w-full text-sm text-gray-300"
                    on:change=on_file
                />
                {super_admin.then(|| view! {
                    <TextField
                        label="Tenant"
                        placeholder="Tenant id for the imported users"
                        value=tenant
                        on_input=move |v: String| tenant.set(v)
                    />
                })}

                <Show when=missing_email>
                    <p class="text-sm text-red-400">"The file has no email column."</p>
                </Show>

                <Show when=move || table.with(|t| !t.is_empty())>
                    <div class="text-sm text-gray-400">
                        {move || format!(
                            "{}: {} row(s)",
                            file_name.get().unwrap_or_default(),
                            table.with(|t| t.rows.len())
                        )}
                    </div>
                    <Table>
                        <thead>
                            <tr class="border-b border-gray-700">
                                {move || table.with(|t| t.headers.iter().map(|header| view! {
                                    <th class="px-4 py-2 text-left text-xs font-medium text-gray-400 uppercase">
                                        {header.clone()}
                                    </th>
                                }).collect_view())}
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-gray-700">
                            {move || table.with(|t| {
                                t.rows.iter().take(PREVIEW_ROWS).map(|row| {
                                    let cells = t.headers
                                        .iter()
                                        .map(|h| row.get(h).cloned().unwrap_or_default())
                                        .collect::<Vec<_>>();
                                    view! {
                                        <tr>
                                            {cells.into_iter().map(|cell| view! {
                                                <td class="px-4 py-2 text-sm text-gray-300">{cell}</td>
                                            }).collect_view()}
                                        </tr>
                                    }
                                }).collect_view()
                            })}
                        </tbody>
                    </Table>
                </Show>

                {move || report.get().map(|report| view! {
                    <div class="p-4 bg-gray-900 rounded-lg space-y-2">
                        <p class="text-white font-medium">{report.summary()}</p>
                        <ul class="text-sm text-red-300 space-y-1">
                            {report.skipped.into_iter().map(|row| view! {
                                <li>{format!("Row {} ({}): {}", row.row, row.email, row.reason)}</li>
                            }).collect_view()}
                        </ul>
                    </div>
                })}

                <div class="flex justify-end space-x-3 pt-2">
                    <Button variant=ButtonVariant::Secondary on_click=Callback::new(move |_: ()| close())>
                        "Close"
                    </Button>
                    <Button
                        loading=busy
                        disabled=Signal::derive(move || table.with(|t| t.rows.is_empty()) || missing_email())
                        on_click=Callback::new(on_import)
                    >
                        "Import"
                    </Button>
                </div>
            </div>
        </Modal>
    }
}
