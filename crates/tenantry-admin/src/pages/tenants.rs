//! Tenant directory for super admins

use leptos::*;

use tenantry_core::console::ConsoleContext;
use tenantry_core::types::{TenantKind, TenantProfile};
use tenantry_core::utils::format_date;

use crate::components::{StatCard, Table, TableEmpty, TableHeader, TableLoading};

#[component]
pub fn TenantsPage() -> impl IntoView {
    let ctx = expect_context::<ConsoleContext>();

    let tenants = create_local_resource(
        || (),
        move |_| {
            let ctx = ctx.clone();
            async move {
                ctx.require_super_admin().map_err(|e| e.to_string())?;
                let mut tenants = ctx.store.list_tenants().await.map_err(|e| e.to_string())?;
                tenants.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
                Ok::<_, String>(tenants)
            }
        },
    );

    let list = move || tenants.get().and_then(Result::ok).unwrap_or_default();
    let count = move |filter: fn(&TenantProfile) -> bool| {
        Signal::derive(move || list().iter().filter(|t| filter(t)).count().to_string())
    };

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold text-white">"Tenants"</h1>
                <p class="text-gray-400 mt-1">"Businesses and groups registered on the platform"</p>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-4 gap-6">
                <StatCard title="Tenants" value=count(|_| true) />
                <StatCard title="Active" value=count(|t| t.active) color="green" icon="check-circle" />
                <StatCard
                    title="Savings groups"
                    value=count(|t| t.kind == TenantKind::SavingsGroup)
                    color="purple"
                    icon="users"
                />
                <StatCard
                    title="Lenders"
                    value=count(|t| t.kind == TenantKind::Lender)
                    color="yellow"
                    icon="card"
                />
            </div>

            <Table>
                <TableHeader columns=vec!["Tenant", "Type", "Contact", "Status", "Updated", ""] />
                <tbody class="divide-y divide-gray-700">
                    {move || match tenants.get() {
                        None => view! { <TableLoading colspan=6 /> }.into_view(),
                        Some(Err(e)) => view! {
                            <TableEmpty message=format!("Failed to load tenants: {}", e) colspan=6 />
                        }.into_view(),
                        Some(Ok(list)) if list.is_empty() => view! {
                            <TableEmpty message="No tenants registered yet" colspan=6 />
                        }.into_view(),
                        Some(Ok(list)) => list.into_iter().map(|tenant| view! { <TenantRow tenant=tenant /> }).collect_view(),
                    }}
                </tbody>
            </Table>
        </div>
    }
}

#[component]
fn TenantRow(tenant: TenantProfile) -> impl IntoView {
    let swatch = format!("background-color: {}", tenant.branding.primary_color);
    let logo = match tenant.branding.logo_url.clone() {
        Some(url) => view! {
            <img src=url alt="" class="w-10 h-10 rounded-lg object-cover" />
        }.into_view(),
        None => view! {
            <div class="w-10 h-10 rounded-lg flex items-center justify-center" style=swatch>
                <span class="text-white font-medium">{tenant.branding.initials()}</span>
            </div>
        }.into_view(),
    };

    view! {
        <tr class="hover:bg-gray-750 transition-colors">
            <td class="px-4 py-3">
                <div class="flex items-center space-x-3">
                    {logo}
                    <div>
                        <p class="text-white font-medium">{tenant.name.clone()}</p>
                        <p class="text-sm text-gray-400 font-mono">{tenant.id.clone()}</p>
                    </div>
                </div>
            </td>
            <td class="px-4 py-3 text-gray-300">{tenant.kind.label()}</td>
            <td class="px-4 py-3 text-sm text-gray-400">
                {tenant.contact_email.clone().unwrap_or_default()}
            </td>
            <td class="px-4 py-3">
                {if tenant.active {
                    view! { <span class="px-2 py-1 text-xs bg-green-600/20 text-green-400 rounded">"Active"</span> }
                } else {
                    view! { <span class="px-2 py-1 text-xs bg-red-600/20 text-red-400 rounded">"Inactive"</span> }
                }}
            </td>
            <td class="px-4 py-3 text-sm text-gray-400">
                {tenant.updated_at.as_ref().map(format_date).unwrap_or_default()}
            </td>
            <td class="px-4 py-3 text-right space-x-3">
                <a href=format!("/tenants/{}/settings", tenant.id) class="text-sm text-blue-400 hover:text-blue-300">
                    "Settings"
                </a>
                <a href=format!("/users?tenant={}", urlencoding::encode(&tenant.id)) class="text-sm text-blue-400 hover:text-blue-300">
                    "Users"
                </a>
            </td>
        </tr>
    }
}
