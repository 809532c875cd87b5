//! configure command - manage connection profiles

use crate::config::Config;
use crate::ConfigureAction;
use anyhow::Result;
use colored::Colorize;
use std::io::{self, Write};

pub async fn execute(profile: Option<&str>, action: Option<ConfigureAction>) -> Result<()> {
    match action {
        Some(ConfigureAction::Set { key, value }) => set_config(profile, &key, &value),
        Some(ConfigureAction::Get { key }) => get_config(profile, &key),
        Some(ConfigureAction::List) => list_config(profile),
        Some(ConfigureAction::AddProfile { name }) => add_profile(&name),
        Some(ConfigureAction::RemoveProfile { name }) => remove_profile(&name),
        None => interactive_configure(profile),
    }
}

fn set_config(profile: Option<&str>, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load(profile)?;
    config.set_value(key, value)?;
    config.save(profile)?;
    let shown = config.get_value(key).unwrap_or_default();
    println!("Set {} = {}", key.cyan(), shown);
    Ok(())
}

fn get_config(profile: Option<&str>, key: &str) -> Result<()> {
    let config = Config::load(profile)?;
    match config.get_value(key) {
        Some(value) => println!("{}", value),
        None => println!("(not set)"),
    }
    Ok(())
}

fn list_config(profile: Option<&str>) -> Result<()> {
    let config = Config::load(profile)?;

    println!(
        "{} {}",
        "Current configuration:".bold(),
        format!("[{}]", profile.unwrap_or("default")).dimmed()
    );
    println!();

    for key in Config::keys() {
        let value = config.get_value(key).unwrap_or_else(|| "(not set)".to_string());
        println!("  {}: {}", key.cyan(), value);
    }

    println!();
    println!("{}", "Available profiles:".bold());

    let profiles = Config::list_profiles()?;
    if profiles.is_empty() {
        println!("  (none)");
    } else {
        for profile in profiles {
            println!("  - {}", profile);
        }
    }

    println!();
    println!(
        "Config file: {}",
        Config::config_path()?.display().to_string().dimmed()
    );

    Ok(())
}

fn add_profile(name: &str) -> Result<()> {
    let config = Config::default();
    config.save(Some(name))?;
    println!("Created profile: {}", name.green());
    println!(
        "Use 'tenantry --profile {} configure set <key> <value>' to configure it.",
        name
    );
    Ok(())
}

fn remove_profile(name: &str) -> Result<()> {
    Config::delete_profile(name)?;
    println!("Removed profile: {}", name.red());
    Ok(())
}

/// Read one line, keeping `current` when the answer is empty.
fn prompt(label: &str, current: Option<&str>) -> Result<Option<String>> {
    print!("{} [{}]: ", label, current.unwrap_or(""));
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();
    Ok(if input.is_empty() {
        current.map(str::to_string)
    } else {
        Some(input.to_string())
    })
}

fn interactive_configure(profile: Option<&str>) -> Result<()> {
    println!("{}", "Tenantry CLI Configuration".bold());
    println!("Press Enter to keep current value.\n");

    let mut config = Config::load(profile).unwrap_or_default();

    config.api_url = prompt("API URL", config.api_url.as_deref())?;
    config.storage_url = prompt("Storage URL (optional)", config.storage_url.as_deref())?;

    let masked = config.token.as_ref().map(|_| "***");
    if let Some(token) = prompt("API token", masked)? {
        if token != "***" {
            config.token = Some(token);
        }
    }

    config.save(profile)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        "✓".green(),
        Config::config_path()?.display()
    );

    if let Err(err) = config.validate() {
        println!("{} {}", "!".yellow(), err.to_string().yellow());
    }

    Ok(())
}
