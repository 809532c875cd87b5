//! settings command - platform-wide settings (super admins)

use super::{pick_logo, yes_no, CommandContext};
use crate::progress;
use crate::utils::format_size;
use crate::SettingsAction as Action;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tenantry_core::console::{ConsoleContext, GlobalSettingsPage};
use tenantry_core::forms::{BrandingAction, GlobalSettingsAction};
use tenantry_core::types::GlobalSettings;

#[derive(Debug, Default, Args)]
pub struct SettingsUpdate {
    /// Support contact shown to tenants, empty to clear
    #[arg(long)]
    pub support_email: Option<String>,

    /// Default ISO currency for new tenants
    #[arg(long)]
    pub default_currency: Option<String>,

    /// Put the platform in maintenance mode
    #[arg(long)]
    pub maintenance_mode: Option<bool>,

    /// Allow businesses to sign up on their own
    #[arg(long)]
    pub allow_self_signup: Option<bool>,

    /// Largest upload accepted anywhere on the platform, in bytes
    #[arg(long)]
    pub max_upload_bytes: Option<u64>,

    /// Platform display name
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

impl SettingsUpdate {
    pub fn into_actions(self) -> Vec<GlobalSettingsAction> {
        let branding = [
            self.display_name.map(BrandingAction::SetDisplayName),
            self.primary_color.map(BrandingAction::SetPrimaryColor),
            self.secondary_color.map(BrandingAction::SetSecondaryColor),
            self.slogan.map(BrandingAction::SetSlogan),
        ];

        [
            self.support_email.map(GlobalSettingsAction::SetSupportEmail),
            self.default_currency
                .map(GlobalSettingsAction::SetDefaultCurrency),
            self.maintenance_mode
                .map(GlobalSettingsAction::SetMaintenanceMode),
            self.allow_self_signup
                .map(GlobalSettingsAction::SetAllowSelfSignup),
            self.max_upload_bytes
                .map(GlobalSettingsAction::SetMaxUploadBytes),
        ]
        .into_iter()
        .flatten()
        .chain(
            branding
                .into_iter()
                .flatten()
                .map(GlobalSettingsAction::Branding),
        )
        .collect()
    }
}

pub async fn execute(ctx: &CommandContext, action: Action) -> Result<()> {
    let console = ctx.connect().await?;
    let mut page = load(ctx, console).await?;

    match action {
        Action::Show => print_settings(ctx, page.form().original()),
        Action::Update(fields) => {
            let actions = fields.into_actions();
            if actions.is_empty() {
                anyhow::bail!("Nothing to update. Pass at least one field option.");
            }
            for action in actions {
                page.dispatch(action);
            }
            if !page.form().is_dirty() {
                ctx.info("No changes");
                return Ok(());
            }
            save(ctx, &mut page, None, "Saving platform settings...").await
        }
        Action::SetLogo { file } => match file {
            Some(path) => {
                let existing = page.form().draft().branding.logo_url.clone();
                let logo = pick_logo(page.context(), existing, &path).await?;
                save(ctx, &mut page, Some(logo), "Uploading logo...").await
            }
            None => {
                page.dispatch(GlobalSettingsAction::Branding(BrandingAction::SetLogoUrl(
                    None,
                )));
                save(ctx, &mut page, None, "Removing logo...").await
            }
        },
    }
}

async fn load(ctx: &CommandContext, console: ConsoleContext) -> Result<GlobalSettingsPage> {
    let pb = ctx.spinner("Loading platform settings...");
    let page = GlobalSettingsPage::load(console).await;
    pb.finish_and_clear();
    Ok(page?)
}

async fn save(
    ctx: &CommandContext,
    page: &mut GlobalSettingsPage,
    logo: Option<tenantry_core::types::FilePayload>,
    message: &str,
) -> Result<()> {
    let pb = ctx.spinner(message);
    let saved = page.save(logo).await;
    progress::finish(&pb, "Saved");
    print_settings(ctx, &saved?)
}

fn print_settings(ctx: &CommandContext, settings: &GlobalSettings) -> Result<()> {
    if ctx.is_json() {
        return ctx.print_json(settings);
    }
    if ctx.quiet {
        return Ok(());
    }

    let none = || "(not set)".dimmed().to_string();
    let branding = &settings.branding;

    println!("{}", "Platform settings".bold());
    println!(
        "  {:<20} {}",
        "Support email:",
        settings.support_email.clone().unwrap_or_else(none)
    );
    println!("  {:<20} {}", "Default currency:", settings.default_currency);
    println!("  {:<20} {}", "Maintenance mode:", yes_no(settings.maintenance_mode));
    println!("  {:<20} {}", "Self sign-up:", yes_no(settings.allow_self_signup));
    println!(
        "  {:<20} {}",
        "Max upload size:",
        format_size(settings.max_upload_bytes, true)
    );
    println!();
    println!("{}", "Branding".bold());
    println!("  {:<20} {}", "Display name:", branding.display_name);
    println!("  {:<20} {}", "Primary color:", branding.primary_color);
    println!("  {:<20} {}", "Secondary color:", branding.secondary_color);
    println!("  {:<20} {}", "Slogan:", branding.slogan.clone().unwrap_or_else(none));
    println!("  {:<20} {}", "Logo:", branding.logo_url.clone().unwrap_or_else(none));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_into_actions() {
        let update = SettingsUpdate {
            maintenance_mode: Some(true),
            max_upload_bytes: Some(1024),
            display_name: Some("Tenantry".into()),
            ..SettingsUpdate::default()
        };
        assert_eq!(
            update.into_actions(),
            vec![
                GlobalSettingsAction::SetMaintenanceMode(true),
                GlobalSettingsAction::SetMaxUploadBytes(1024),
                GlobalSettingsAction::Branding(BrandingAction::SetDisplayName("Tenantry".into())),
            ]
        );
        assert!(SettingsUpdate::default().into_actions().is_empty());
    }
}
