//! Billing plans and invoices

use leptos::*;

use tenantry_core::console::{BillingPage as Controller, ConsoleContext};
use tenantry_core::forms::{FormState, PlanAction};
use tenantry_core::types::{format_cents, parse_cents, BillingInterval, BillingPlan};
use tenantry_core::utils::format_date;

use super::run_with;
use crate::components::{
    Button, ButtonVariant, ConfirmModal, Modal, SelectField, StatCard, Table, TableEmpty,
    TableHeader, TableLoading, TextField, ToggleField,
};

/// Which plan the editor modal is working on.
#[derive(Clone, PartialEq)]
enum Editor {
    Closed,
    New,
    Existing(String),
}

#[component]
pub fn BillingPage() -> impl IntoView {
    let ctx = expect_context::<ConsoleContext>();
    let super_admin = ctx.user.is_super_admin();

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

    let busy = create_rw_signal(false);
    let editor = create_rw_signal(Editor::Closed);
    let pending_delete = create_rw_signal(None::<BillingPlan>);

    let plans = move || page.with(|p| p.as_ref().map(|p| p.plans().to_vec()).unwrap_or_default());
    let active_count = Signal::derive(move || {
        plans().iter().filter(|p| p.active).count().to_string()
    });
    let total_count = Signal::derive(move || plans().len().to_string());

    let on_confirm_delete = move |_: ()| {
        let Some(plan) = pending_delete.get_untracked() else {
            return;
        };
        pending_delete.set(None);
        run_with(page, busy, move |mut p| async move {
            let _ = p.delete_plan(&plan.id).await;
            p
        });
    };

    let columns = if super_admin {
        vec!["Plan", "Price", "Features", "Users", "Status", ""]
    } else {
        vec!["Plan", "Price", "Features", "Users", "Status"]
    };
    let colspan = columns.len();

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-2xl font-bold text-white">"Billing"</h1>
                    <p class="text-gray-400 mt-1">"Subscription plans and invoices"</p>
                </div>
                {super_admin.then(|| view! {
                    <Button on_click=Callback::new(move |_: ()| editor.set(Editor::New))>
                        "New plan"
                    </Button>
                })}
            </div>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                <StatCard title="Plans" value=total_count icon="card" />
                <StatCard title="Active plans" value=active_count color="green" icon="check-circle" />
            </div>

            <Table>
                <TableHeader columns=columns />
                <tbody class="divide-y divide-gray-700">
                    {move || match loaded.get() {
                        None => view! { <TableLoading colspan=colspan /> }.into_view(),
                        Some(Err(e)) => view! {
                            <TableEmpty message=format!("Failed to load plans: {}", e) colspan=colspan />
                        }.into_view(),
                        Some(Ok(_)) if plans().is_empty() => view! {
                            <TableEmpty message="No billing plans yet" colspan=colspan />
                        }.into_view(),
                        Some(Ok(_)) => plans().into_iter().map(|plan| view! {
                            <PlanRow
                                plan=plan
                                page=page
                                busy=busy
                                editable=super_admin
                                editor=editor
                                pending_delete=pending_delete
                            />
                        }).collect_view(),
                    }}
                </tbody>
            </Table>

            <Invoices page=page super_admin=super_admin />

            {move || {
                let form = match editor.get() {
                    Editor::Closed => return None,
                    Editor::New => FormState::new(BillingPlan::new("", 0, BillingInterval::Monthly)),
                    Editor::Existing(id) => page.with_untracked(|p| p.as_ref()?.edit_plan(&id).ok())?,
                };
                Some(view! { <PlanEditor form=form page=page busy=busy editor=editor /> })
            }}

            <ConfirmModal
                title="Delete plan"
                message=Signal::derive(move || {
                    pending_delete
                        .get()
                        .map(|p| format!("Delete the {} plan? Existing invoices keep their amounts.", p.name))
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
fn PlanRow(
    plan: BillingPlan,
    page: RwSignal<Option<Controller>>,
    busy: RwSignal<bool>,
    editable: bool,
    editor: RwSignal<Editor>,
    pending_delete: RwSignal<Option<BillingPlan>>,
) -> impl IntoView {
    let id = plan.id.clone();
    let active = plan.active;
    let on_toggle = move |_| {
        let id = id.clone();
        run_with(page, busy, move |mut p| async move {
            let _ = p.set_plan_active(&id, !active).await;
            p
        });
    };

    let status = if active {
        view! { <span class="px-2 py-1 text-xs bg-green-600/20 text-green-400 rounded">"Active"</span> }
    } else {
        view! { <span class="px-2 py-1 text-xs bg-gray-600/20 text-gray-400 rounded">"Inactive"</span> }
    };
    let edit_id = plan.id.clone();
    let deleted = plan.clone();

    view! {
        <tr class="hover:bg-gray-750 transition-colors">
            <td class="px-4 py-3">
                <p class="text-white font-medium">{plan.name.clone()}</p>
                <p class="text-sm text-gray-400">{plan.description.clone().unwrap_or_default()}</p>
            </td>
            <td class="px-4 py-3 text-gray-300">{plan.display_price()}</td>
            <td class="px-4 py-3 text-sm text-gray-400">{plan.features.join(", ")}</td>
            <td class="px-4 py-3 text-gray-300">
                {plan.max_users.map(|m| m.to_string()).unwrap_or_else(|| "Unlimited".to_string())}
            </td>
            <td class="px-4 py-3">
                {if editable {
                    view! {
                        <button
                            class="cursor-pointer"
                            title=if active { "Click to deactivate" } else { "Click to activate" }
                            disabled=move || busy.get()
                            on:click=on_toggle
                        >
                            {status}
                        </button>
                    }.into_view()
                } else {
                    status.into_view()
                }}
            </td>
            {editable.then(|| view! {
                <td class="px-4 py-3 text-right space-x-2">
                    <button
                        class="text-sm text-blue-400 hover:text-blue-300"
                        on:click=move |_| editor.set(Editor::Existing(edit_id.clone()))
                    >
                        "Edit"
                    </button>
                    <button
                        class="text-sm text-red-400 hover:text-red-300"
                        on:click=move |_| pending_delete.set(Some(deleted.clone()))
                    >
                        "Delete"
                    </button>
                </td>
            })}
        </tr>
    }
}

#[component]
fn PlanEditor(
    form: FormState<BillingPlan>,
    page: RwSignal<Option<Controller>>,
    busy: RwSignal<bool>,
    editor: RwSignal<Editor>,
) -> impl IntoView {
    let is_new = editor.get_untracked() == Editor::New;
    let form = create_rw_signal(form);
    let submitted = create_rw_signal(false);
    let price_text = create_rw_signal(format_cents(form.with_untracked(|f| f.draft().price_cents)));
    let feature_text = create_rw_signal(String::new());

    let edit = move |action: PlanAction| {
        if !busy.get_untracked() {
            form.update(|f| *f = f.clone().edit(action));
        }
    };
    let text = move |f: fn(&BillingPlan) -> String| {
        Signal::derive(move || form.with(|state| f(state.draft())))
    };
    let error = move |field: &'static str| {
        Signal::derive(move || {
            form.with(|f| {
                if !(submitted.get() || f.is_dirty()) {
                    return None;
                }
                f.error_for(field).map(str::to_string)
            })
        })
    };
    let price_error = Signal::derive(move || {
        if parse_cents(&price_text.get()).is_none() {
            Some("Enter an amount such as 19.99".to_string())
        } else {
            error("priceCents").get()
        }
    });

    let close = move || editor.set(Editor::Closed);
    let on_save = move |_: ()| {
        submitted.set(true);
        let mut state = form.get_untracked();
        if !state.errors().is_empty() || price_error.get_untracked().is_some() {
            return;
        }
        run_with(page, busy, move |mut p| async move {
            let saved = if is_new {
                p.create_plan(state.draft().clone()).await.is_ok()
            } else {
                let saved = p.update_plan(&mut state).await.is_ok();
                form.set(state);
                saved
            };
            if saved {
                close();
            }
            p
        });
    };
    let on_add_feature = move |_: ()| {
        let feature = feature_text.get_untracked();
        edit(PlanAction::AddFeature(feature));
        feature_text.set(String::new());
    };

    let intervals = vec![
        (BillingInterval::Monthly.as_str(), "Monthly"),
        (BillingInterval::Yearly.as_str(), "Yearly"),
    ];

    view! {
        <Modal
            title=if is_new { "New plan" } else { "Edit plan" }
            show=Signal::derive(move || editor.get() != Editor::Closed)
            on_close=move |_: ()| close()
            size="lg"
        >
            <div class="space-y-4">
                <fieldset class="space-y-4" disabled=move || busy.get()>
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <TextField
                        label="Name"
                        value=text(|p| p.name.clone())
                        on_input=move |v: String| edit(PlanAction::SetName(v))
                        error=error("name")
                    />
                    <TextField
                        label="Description"
                        value=text(|p| p.description.clone().unwrap_or_default())
                        on_input=move |v: String| edit(PlanAction::SetDescription(v))
                    />
                    <TextField
                        label="Price"
                        value=price_text
                        on_input=move |v: String| {
                            if busy.get_untracked() {
                                return;
                            }
                            if let Some(cents) = parse_cents(&v) {
                                edit(PlanAction::SetPriceCents(cents));
                            }
                            price_text.set(v);
                        }
                        error=price_error
                    />
                    <TextField
                        label="Currency"
                        value=text(|p| p.currency.clone())
                        on_input=move |v: String| edit(PlanAction::SetCurrency(v))
                        error=error("currency")
                    />
                    <SelectField
                        label="Interval"
                        options=intervals.clone()
                        value=text(|p| p.interval.as_str().to_string())
                        on_change=move |v: String| {
                            if let Some(interval) = BillingInterval::parse(&v) {
                                edit(PlanAction::SetInterval(interval));
                            }
                        }
                    />
                    <TextField
                        label="Maximum users"
                        input_type="number"
                        placeholder="Unlimited"
                        value=text(|p| p.max_users.map(|m| m.to_string()).unwrap_or_default())
                        on_input=move |v: String| {
                            let trimmed = v.trim();
                            if trimmed.is_empty() {
                                edit(PlanAction::SetMaxUsers(None));
                            } else if let Ok(max) = trimmed.parse::<u32>() {
                                edit(PlanAction::SetMaxUsers(Some(max)));
                            }
                        }
                        error=error("maxUsers")
                    />
                </div>

                <div>
                    <label class="block text-sm font-medium text-gray-300 mb-2">"Features"</label>
                    <ul class="space-y-1 mb-2">
                        {move || form.with(|f| f.draft().features.clone()).into_iter().enumerate().map(|(index, feature)| view! {
                            <li class="flex items-center justify-between px-3 py-1 bg-gray-700 rounded">
                                <span class="text-sm text-gray-200">{feature}</span>
                                <button
                                    class="text-gray-400 hover:text-red-400"
                                    on:click=move |_| edit(PlanAction::RemoveFeature(index))
                                >
                                    "×"
                                </button>
                            </li>
                        }).collect_view()}
                    </ul>
                    <div class="flex space-x-2">
                        <div class="flex-1">
                            <TextField
                                label=""
                                placeholder="Add a feature"
                                value=feature_text
                                on_input=move |v: String| feature_text.set(v)
                            />
                        </div>
                        <Button variant=ButtonVariant::Secondary on_click=Callback::new(on_add_feature)>
                            "Add"
                        </Button>
                    </div>
                </div>

                <ToggleField
                    label="Active"
                    description="Inactive plans cannot be chosen by new tenants"
                    enabled=Signal::derive(move || form.with(|f| f.draft().active))
                    on_toggle=move |on: bool| edit(PlanAction::SetActive(on))
                />
                </fieldset>

                <div class="flex justify-end space-x-3 pt-2">
                    <Button variant=ButtonVariant::Secondary on_click=Callback::new(move |_: ()| close())>
                        "Cancel"
                    </Button>
                    <Button loading=busy on_click=Callback::new(on_save)>
                        {if is_new { "Create plan" } else { "Save plan" }}
                    </Button>
                </div>
            </div>
        </Modal>
    }
}

#[component]
fn Invoices(page: RwSignal<Option<Controller>>, super_admin: bool) -> impl IntoView {
    let tenant = create_rw_signal(String::new());

    let invoices = create_local_resource(
        move || (tenant.get(), page.with(Option::is_some)),
        move |(tenant, ready)| async move {
            let Some(controller) = page.get_untracked().filter(|_| ready) else {
                return Ok(Vec::new());
            };
            let tenant = Some(tenant).filter(|t| !t.trim().is_empty());
            controller
                .invoices(tenant.as_deref())
                .await
                .map_err(|e| e.to_string())
        },
    );

    view! {
        <div class="space-y-4">
            <div class="flex items-end justify-between">
                <h2 class="text-lg font-semibold text-white">"Invoices"</h2>
                {super_admin.then(|| view! {
                    <div class="w-64">
                        <TextField
                            label="Tenant"
                            placeholder="All tenants"
                            value=tenant
                            on_input=move |v: String| tenant.set(v)
                        />
                    </div>
                })}
            </div>
            <Table>
                <TableHeader columns=vec!["Invoice", "Tenant", "Amount", "Status", "Issued", "Due"] />
                <tbody class="divide-y divide-gray-700">
                    {move || match invoices.get() {
                        None => view! { <TableLoading colspan=6 /> }.into_view(),
                        Some(Err(e)) => view! {
                            <TableEmpty message=format!("Failed to load invoices: {}", e) colspan=6 />
                        }.into_view(),
                        Some(Ok(list)) if list.is_empty() => view! {
                            <TableEmpty message="No invoices" colspan=6 />
                        }.into_view(),
                        Some(Ok(list)) => list.into_iter().map(|invoice| view! {
                            <tr>
                                <td class="px-4 py-3 font-mono text-sm text-gray-300">{invoice.id.clone()}</td>
                                <td class="px-4 py-3 text-gray-300">{invoice.tenant_id.clone()}</td>
                                <td class="px-4 py-3 text-gray-300">
                                    {format!("{} {}", invoice.currency, format_cents(invoice.amount_cents))}
                                </td>
                                <td class="px-4 py-3 text-sm text-gray-400">{invoice.status.as_str()}</td>
                                <td class="px-4 py-3 text-sm text-gray-400">{format_date(&invoice.issued_at)}</td>
                                <td class="px-4 py-3 text-sm text-gray-400">
                                    {invoice.due_at.as_ref().map(format_date).unwrap_or_default()}
                                </td>
                            </tr>
                        }).collect_view(),
                    }}
                </tbody>
            </Table>
        </div>
    }
}
