//! tenant command - inspect and update business settings

use super::{pick_logo, yes_no, CommandContext};
use crate::progress;
use crate::utils::{format_optional_datetime, truncate};
use crate::TenantAction as Action;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tenantry_core::console::{BusinessSettingsPage, ConsoleContext};
use tenantry_core::forms::{BrandingAction, TenantAction};
use tenantry_core::types::{TenantKind, TenantProfile};

/// Field edits requested on the command line
#[derive(Debug, Default, Args)]
pub struct TenantUpdate {
    /// Business name
    #[arg(long)]
    pub name: Option<String>,

    /// Tenant kind (retail, savingsGroup, lender)
    #[arg(long)]
    pub kind: Option<String>,

    /// Contact email, empty to clear
    #[arg(long)]
    pub contact_email: Option<String>,

    /// Phone number, empty to clear
    #[arg(long)]
    pub phone: Option<String>,

    /// Postal address, empty to clear
    #[arg(long)]
    pub address: Option<String>,

    /// ISO currency code
    #[arg(long)]
    pub currency: Option<String>,

    /// Enable or disable the tenant
    #[arg(long)]
    pub active: Option<bool>,

    /// Name shown in the console header
    #[arg(long)]
    pub display_name: Option<String>,

    /// Primary brand color (#rrggbb)
    #[arg(long)]
    pub primary_color: Option<String>,

    /// Secondary brand color (#rrggbb)
    #[arg(long)]
    pub secondary_color: Option<String>,

    /// Slogan, empty to clear
    #[arg(long)]
    pub slogan: Option<String>,
}

impl TenantUpdate {
    /// Form actions in field order. Unknown tenant kinds are rejected.
    pub fn into_actions(self) -> Result<Vec<TenantAction>> {
        let mut actions = Vec::new();
        if let Some(name) = self.name {
            actions.push(TenantAction::SetName(name));
        }
        if let Some(kind) = self.kind {
            let parsed = TenantKind::parse(&kind)
                .with_context(|| format!("Unknown tenant kind: {}", kind))?;
            actions.push(TenantAction::SetKind(parsed));
        }
        if let Some(email) = self.contact_email {
            actions.push(TenantAction::SetContactEmail(email));
        }
        if let Some(phone) = self.phone {
            actions.push(TenantAction::SetPhone(phone));
        }
        if let Some(address) = self.address {
            actions.push(TenantAction::SetAddress(address));
        }
        if let Some(currency) = self.currency {
            actions.push(TenantAction::SetCurrency(currency));
        }
        if let Some(active) = self.active {
            actions.push(TenantAction::SetActive(active));
        }

        let branding = [
            self.display_name.map(BrandingAction::SetDisplayName),
            self.primary_color.map(BrandingAction::SetPrimaryColor),
            self.secondary_color.map(BrandingAction::SetSecondaryColor),
            self.slogan.map(BrandingAction::SetSlogan),
        ];
        actions.extend(branding.into_iter().flatten().map(TenantAction::Branding));
        Ok(actions)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TenantSummary<'a> {
    id: &'a str,
    name: &'a str,
    kind: &'a str,
    active: bool,
    logo_url: Option<&'a str>,
}

pub async fn execute(ctx: &CommandContext, action: Action) -> Result<()> {
    let console = ctx.connect().await?;
    match action {
        Action::List => list(ctx, &console).await,
        Action::Show { id } => show(ctx, console, &id).await,
        Action::Update { id, fields } => update(ctx, console, &id, fields).await,
        Action::SetLogo { id, file } => set_logo(ctx, console, &id, file.as_deref()).await,
    }
}

async fn list(ctx: &CommandContext, console: &ConsoleContext) -> Result<()> {
    console.require_super_admin()?;
    let pb = ctx.spinner("Loading tenants...");
    let mut tenants = console.store.list_tenants().await?;
    pb.finish_and_clear();
    tenants.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    if ctx.is_json() {
        let summaries: Vec<TenantSummary> = tenants
            .iter()
            .map(|t| TenantSummary {
                id: &t.id,
                name: &t.name,
                kind: t.kind.as_str(),
                active: t.active,
                logo_url: t.branding.logo_url.as_deref(),
            })
            .collect();
        return ctx.print_json(&summaries);
    }

    for tenant in &tenants {
        let status = if tenant.active {
            "active".green()
        } else {
            "inactive".red()
        };
        println!(
            "{:<24} {:<32} {:<14} {}",
            tenant.id.cyan(),
            truncate(&tenant.name, 32),
            tenant.kind.label(),
            status
        );
    }

    if !ctx.quiet {
        let active = tenants.iter().filter(|t| t.active).count();
        println!("\nTotal: {} tenant(s), {} active", tenants.len(), active);
    }
    Ok(())
}

async fn load(ctx: &CommandContext, console: ConsoleContext, id: &str) -> Result<BusinessSettingsPage> {
    let pb = ctx.spinner(&format!("Loading tenant {}...", id));
    let page = BusinessSettingsPage::load(console, id).await;
    pb.finish_and_clear();
    Ok(page?)
}

async fn show(ctx: &CommandContext, console: ConsoleContext, id: &str) -> Result<()> {
    let page = load(ctx, console, id).await?;
    print_tenant(ctx, page.form().original())
}

async fn update(
    ctx: &CommandContext,
    console: ConsoleContext,
    id: &str,
    fields: TenantUpdate,
) -> Result<()> {
    let actions = fields.into_actions()?;
    if actions.is_empty() {
        anyhow::bail!("Nothing to update. Pass at least one field option.");
    }

    let mut page = load(ctx, console, id).await?;
    for action in actions {
        page.dispatch(action);
    }
    if !page.form().is_dirty() {
        ctx.info("No changes");
        return Ok(());
    }

    let pb = ctx.spinner("Saving business settings...");
    let saved = page.save(None).await;
    progress::finish(&pb, "Saved");
    print_tenant(ctx, &saved?)
}

async fn set_logo(
    ctx: &CommandContext,
    console: ConsoleContext,
    id: &str,
    file: Option<&str>,
) -> Result<()> {
    let mut page = load(ctx, console, id).await?;

    let pending = match file {
        Some(path) => {
            let existing = page.form().draft().branding.logo_url.clone();
            Some(pick_logo(page.context(), existing, path).await?)
        }
        None => {
            page.dispatch(TenantAction::Branding(BrandingAction::SetLogoUrl(None)));
            None
        }
    };

    let pb = ctx.spinner(if pending.is_some() {
        "Uploading logo..."
    } else {
        "Removing logo..."
    });
    let saved = page.save(pending).await;
    progress::finish(&pb, "Saved");
    print_tenant(ctx, &saved?)
}

fn print_tenant(ctx: &CommandContext, tenant: &TenantProfile) -> Result<()> {
    if ctx.is_json() {
        return ctx.print_json(tenant);
    }
    if ctx.quiet {
        return Ok(());
    }

    let none = || "(not set)".dimmed().to_string();
    let branding = &tenant.branding;

    println!("{}", tenant.name.bold());
    println!("  {:<16} {}", "ID:", tenant.id.cyan());
    println!("  {:<16} {}", "Kind:", tenant.kind.label());
    println!("  {:<16} {}", "Active:", yes_no(tenant.active));
    println!(
        "  {:<16} {}",
        "Contact email:",
        tenant.contact_email.clone().unwrap_or_else(none)
    );
    println!("  {:<16} {}", "Phone:", tenant.phone.clone().unwrap_or_else(none));
    println!("  {:<16} {}", "Address:", tenant.address.clone().unwrap_or_else(none));
    println!("  {:<16} {}", "Currency:", tenant.currency);
    println!(
        "  {:<16} {}",
        "Updated:",
        format_optional_datetime(tenant.updated_at.as_ref())
    );
    println!();
    println!("{}", "Branding".bold());
    println!("  {:<16} {}", "Display name:", branding.display_name);
    println!("  {:<16} {}", "Primary color:", branding.primary_color);
    println!("  {:<16} {}", "Secondary color:", branding.secondary_color);
    println!("  {:<16} {}", "Slogan:", branding.slogan.clone().unwrap_or_else(none));
    println!("  {:<16} {}", "Logo:", branding.logo_url.clone().unwrap_or_else(none));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_into_actions() {
        let update = TenantUpdate {
            name: Some("Acme Markets".into()),
            kind: Some("savingsgroup".into()),
            active: Some(false),
            primary_color: Some("#ff0000".into()),
            slogan: Some("Fresh daily".into()),
            ..TenantUpdate::default()
        };
        let actions = update.into_actions().unwrap();
        assert_eq!(
            actions,
            vec![
                TenantAction::SetName("Acme Markets".into()),
                TenantAction::SetKind(TenantKind::SavingsGroup),
                TenantAction::SetActive(false),
                TenantAction::Branding(BrandingAction::SetPrimaryColor("#ff0000".into())),
                TenantAction::Branding(BrandingAction::SetSlogan("Fresh daily".into())),
            ]
        );
    }

    #[test]
    fn test_update_rejects_unknown_kind() {
        let update = TenantUpdate {
            kind: Some("castle".into()),
            ..TenantUpdate::default()
        };
        assert!(update.into_actions().is_err());
        assert!(TenantUpdate::default().into_actions().unwrap().is_empty());
    }
}
