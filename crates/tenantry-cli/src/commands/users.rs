//! users command - manage admin users and bulk CSV imports

use super::{yes_no, CommandContext};
use crate::progress;
use crate::utils::{confirm, format_datetime};
use crate::UsersAction as Action;
use anyhow::{Context, Result};
use colored::Colorize;
use tenantry_core::console::{ImportReport, UsersPage};
use tenantry_core::forms::NewUser;
use tenantry_core::types::{AdminUser, UserRole};

pub async fn execute(ctx: &CommandContext, tenant: Option<String>, action: Action) -> Result<()> {
    let console = ctx.connect().await?;
    let pb = ctx.spinner("Loading users...");
    let page = UsersPage::load(console, tenant.as_deref()).await;
    pb.finish_and_clear();
    let mut page = page?;
    ctx.debug(&format!(
        "Scope: {}",
        page.scope().unwrap_or("all tenants")
    ));

    match action {
        Action::List => print_users(ctx, page.users()),
        Action::Create { email, name, role } => {
            let role = parse_role(&role)?;
            let mut new_user = NewUser::new(email, name.unwrap_or_default(), role);
            new_user.tenant_id = page.scope().map(str::to_string);
            let user = page.create(new_user).await?;
            print_users(ctx, std::slice::from_ref(&user))
        }
        Action::Import { file, dry_run } => import(ctx, &mut page, &file, dry_run).await,
        Action::SetRole { user, role } => {
            let id = resolve(&page, &user)?;
            let updated = page.set_role(&id, parse_role(&role)?).await?;
            print_users(ctx, std::slice::from_ref(&updated))
        }
        Action::Enable { user } => {
            let id = resolve(&page, &user)?;
            let updated = page.set_active(&id, true).await?;
            print_users(ctx, std::slice::from_ref(&updated))
        }
        Action::Disable { user } => {
            let id = resolve(&page, &user)?;
            let updated = page.set_active(&id, false).await?;
            print_users(ctx, std::slice::from_ref(&updated))
        }
        Action::Delete { user, yes } => {
            let id = resolve(&page, &user)?;
            if !yes && !confirm(&format!("Delete user {}?", user)) {
                ctx.info("Aborted");
                return Ok(());
            }
            page.delete(&id).await?;
            Ok(())
        }
    }
}

async fn import(ctx: &CommandContext, page: &mut UsersPage, file: &str, dry_run: bool) -> Result<()> {
    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file))?;

    if dry_run {
        let table = tenantry_core::utils::parse_csv(&text);
        if !table.has_column("email") {
            anyhow::bail!("CSV must have an email column");
        }
        ctx.info(&format!(
            "{} row(s) would be imported into {}",
            table.rows.len(),
            page.scope().unwrap_or("no tenant")
        ));
        return Ok(());
    }

    let pb = ctx.spinner(&format!("Importing users from {}...", file));
    let report = page.import_csv(&text, None).await;
    progress::finish(&pb, "Import finished");
    print_report(ctx, &report?)
}

/// Find a user of the page by id or email.
fn resolve(page: &UsersPage, user: &str) -> Result<String> {
    page.users()
        .iter()
        .find(|u| u.id == user || u.email.eq_ignore_ascii_case(user))
        .map(|u| u.id.clone())
        .with_context(|| format!("No user {} in scope", user))
}

fn parse_role(role: &str) -> Result<UserRole> {
    UserRole::parse(role).with_context(|| format!("Unknown role: {}", role))
}

fn print_users(ctx: &CommandContext, users: &[AdminUser]) -> Result<()> {
    if ctx.is_json() {
        return ctx.print_json(&users);
    }

    for user in users {
        println!(
            "{:<32} {:<24} {:<13} {:<16} {:<4} {}",
            user.email.cyan(),
            user.display_name,
            user.role.label(),
            user.tenant_id.as_deref().unwrap_or("-"),
            yes_no(user.active),
            format_datetime(&user.created_at).dimmed()
        );
    }

    if !ctx.quiet && users.len() != 1 {
        println!("\nTotal: {} user(s)", users.len());
    }
    Ok(())
}

fn print_report(ctx: &CommandContext, report: &ImportReport) -> Result<()> {
    if ctx.is_json() {
        return ctx.print_json(report);
    }
    if ctx.quiet {
        return Ok(());
    }

    for user in &report.created {
        println!("{} {}", "+".green(), user.email);
    }
    for skipped in &report.skipped {
        let email = if skipped.email.is_empty() {
            "(no email)"
        } else {
            skipped.email.as_str()
        };
        println!(
            "{} row {}: {} ({})",
            "-".yellow(),
            skipped.row,
            email,
            skipped.reason.dimmed()
        );
    }
    println!("\n{}", report.summary().bold());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role("admin").unwrap(), UserRole::TenantAdmin);
        assert_eq!(parse_role("super_admin").unwrap(), UserRole::SuperAdmin);
        assert!(parse_role("owner").is_err());
    }
}
