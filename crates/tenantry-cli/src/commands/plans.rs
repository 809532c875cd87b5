//! plans command - billing plans and invoices

use super::{yes_no, CommandContext};
use crate::utils::{confirm, format_datetime, truncate};
use crate::PlansAction as Action;
use anyhow::{Context, Result};
use colored::Colorize;
use tenantry_core::console::BillingPage;
use tenantry_core::forms::{Editable, PlanAction};
use tenantry_core::types::{format_cents, parse_cents, BillingInterval, BillingPlan, Invoice};

pub async fn execute(ctx: &CommandContext, action: Action) -> Result<()> {
    let console = ctx.connect().await?;
    let pb = ctx.spinner("Loading plans...");
    let page = BillingPage::load(console).await;
    pb.finish_and_clear();
    let mut page = page?;

    match action {
        Action::List => print_plans(ctx, page.plans()),
        Action::Create {
            name,
            price,
            interval,
            currency,
            features,
            max_users,
        } => {
            let plan = build_plan(&name, &price, &interval, currency, features, max_users)?;
            let created = page.create_plan(plan).await?;
            print_plans(ctx, std::slice::from_ref(&created))
        }
        Action::Activate { id } => {
            let plan = page.set_plan_active(&id, true).await?;
            print_plans(ctx, std::slice::from_ref(&plan))
        }
        Action::Deactivate { id } => {
            let plan = page.set_plan_active(&id, false).await?;
            print_plans(ctx, std::slice::from_ref(&plan))
        }
        Action::Delete { id, yes } => {
            let name = page
                .plan(&id)
                .map(|p| p.name.clone())
                .with_context(|| format!("No plan {}", id))?;
            if !yes && !confirm(&format!("Delete plan {}?", name)) {
                ctx.info("Aborted");
                return Ok(());
            }
            page.delete_plan(&id).await?;
            Ok(())
        }
        Action::Invoices { tenant } => {
            let invoices = page.invoices(tenant.as_deref()).await?;
            print_invoices(ctx, &invoices)
        }
    }
}

/// A new plan from command-line values, validated like the plan editor.
fn build_plan(
    name: &str,
    price: &str,
    interval: &str,
    currency: Option<String>,
    features: Vec<String>,
    max_users: Option<u32>,
) -> Result<BillingPlan> {
    let cents = parse_cents(price).with_context(|| format!("Invalid price: {}", price))?;
    let interval = BillingInterval::parse(interval)
        .with_context(|| format!("Unknown billing interval: {}", interval))?;

    let mut plan = BillingPlan::new(name.trim(), cents, interval);
    if let Some(currency) = currency {
        plan.apply(PlanAction::SetCurrency(currency));
    }
    for feature in features {
        plan.apply(PlanAction::AddFeature(feature));
    }
    plan.apply(PlanAction::SetMaxUsers(max_users));

    let errors = plan.validate();
    if !errors.is_empty() {
        return Err(tenantry_core::Error::Validation(errors).into());
    }
    Ok(plan)
}

fn print_plans(ctx: &CommandContext, plans: &[BillingPlan]) -> Result<()> {
    if ctx.is_json() {
        return ctx.print_json(&plans);
    }

    for plan in plans {
        let users = plan
            .max_users
            .map(|n| n.to_string())
            .unwrap_or_else(|| "unlimited".to_string());
        println!(
            "{:<36} {:<20} {:<24} {:<10} {:<4} {}",
            plan.id.dimmed(),
            truncate(&plan.name, 20).bold(),
            plan.display_price(),
            users,
            yes_no(plan.active),
            truncate(&plan.features.join(", "), 40)
        );
    }

    if !ctx.quiet && plans.len() != 1 {
        let active = plans.iter().filter(|p| p.active).count();
        println!("\nTotal: {} plan(s), {} active", plans.len(), active);
    }
    Ok(())
}

fn print_invoices(ctx: &CommandContext, invoices: &[Invoice]) -> Result<()> {
    if ctx.is_json() {
        return ctx.print_json(&invoices);
    }

    for invoice in invoices {
        let status = match invoice.status.as_str() {
            "paid" => "paid".green(),
            "open" => "open".yellow(),
            other => other.normal(),
        };
        println!(
            "{:<19} {:<16} {:>4} {:>12} {}",
            format_datetime(&invoice.issued_at),
            invoice.tenant_id.cyan(),
            invoice.currency,
            format_cents(invoice.amount_cents),
            status
        );
    }

    if !ctx.quiet {
        let total: i64 = invoices.iter().map(|i| i.amount_cents).sum();
        println!(
            "\nTotal: {} invoice(s), {} billed",
            invoices.len(),
            format_cents(total)
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_plan() {
        let plan = build_plan(
            "Growth",
            "19.99",
            "monthly",
            Some("kes".into()),
            vec!["Reports".into(), "  ".into()],
            Some(10),
        )
        .unwrap();
        assert_eq!(plan.price_cents, 1999);
        assert_eq!(plan.currency, "KES");
        assert_eq!(plan.features, vec!["Reports".to_string()]);
        assert_eq!(plan.max_users, Some(10));
        assert!(plan.active);
    }

    #[test]
    fn test_build_plan_rejects_bad_input() {
        assert!(build_plan("Growth", "19.999", "monthly", None, vec![], None).is_err());
        assert!(build_plan("Growth", "5", "weekly", None, vec![], None).is_err());
        assert!(build_plan("  ", "5", "monthly", None, vec![], None).is_err());
    }
}
