//! Tenantry CLI
//!
//! Operator tooling for the Tenantry admin console: preview CSV imports,
//! encode files as data URLs, and manage tenants, users, platform settings
//! and billing plans against the REST backend.

mod commands;
mod config;
mod progress;
mod remote;
mod utils;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use commands::settings::SettingsUpdate;
use commands::tenant::TenantUpdate;
use commands::CommandContext;
use tenantry_core::ConsoleConfig;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "tenantry")]
#[command(author = "Tenantry Team")]
#[command(version = tenantry_core::VERSION)]
#[command(about = "Multi-tenant admin console tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Console configuration file (TOML), replaces the profile
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Connection profile from ~/.tenantry/config.toml
    #[arg(short, long, global = true, env = "TENANTRY_PROFILE")]
    profile: Option<String>,

    /// REST API base URL
    #[arg(long, global = true, env = "TENANTRY_API_URL")]
    api_url: Option<String>,

    /// Bearer token
    #[arg(long, global = true, env = "TENANTRY_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "TENANTRY_LOG_LEVEL")]
    log_level: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Print debug details
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only print errors and requested data
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage connection profiles
    Configure {
        #[command(subcommand)]
        action: Option<ConfigureAction>,
    },

    /// Preview how a CSV file is split into records
    Csv {
        /// CSV file
        file: String,

        /// Show at most this many rows
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Encode a file as a base64 data URL
    DataUrl {
        /// File to encode
        file: String,
    },

    /// Business settings of tenants
    Tenant {
        #[command(subcommand)]
        action: TenantAction,
    },

    /// Platform-wide settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Admin users
    Users {
        /// Tenant to work in (super admins only, others use their own)
        #[arg(short, long, global = true)]
        tenant: Option<String>,

        #[command(subcommand)]
        action: UsersAction,
    },

    /// Billing plans and invoices
    Plans {
        #[command(subcommand)]
        action: PlansAction,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigureAction {
    /// Set a value in the profile
    Set { key: String, value: String },
    /// Print a value from the profile
    Get { key: String },
    /// Show the profile and all profile names
    List,
    /// Create an empty profile
    AddProfile { name: String },
    /// Delete a profile
    RemoveProfile { name: String },
}

#[derive(Subcommand)]
pub enum TenantAction {
    /// List all tenants
    List,
    /// Show a tenant's business settings
    Show { id: String },
    /// Edit business settings fields
    Update {
        id: String,
        #[command(flatten)]
        fields: TenantUpdate,
    },
    /// Upload a new logo, or remove it when no file is given
    SetLogo { id: String, file: Option<String> },
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show platform settings
    Show,
    /// Edit platform settings fields
    Update(SettingsUpdate),
    /// Upload a new platform logo, or remove it when no file is given
    SetLogo { file: Option<String> },
}

#[derive(Subcommand)]
pub enum UsersAction {
    /// List users in scope
    List,
    /// Create a user
    Create {
        email: String,
        /// Display name, defaults to the email's local part
        #[arg(long)]
        name: Option<String>,
        /// superAdmin, tenantAdmin or staff
        #[arg(long, default_value = "staff")]
        role: String,
    },
    /// Import users from a CSV file with email, name and role columns
    Import {
        file: String,
        /// Only check the file
        #[arg(long)]
        dry_run: bool,
    },
    /// Change a user's role
    SetRole { user: String, role: String },
    /// Re-enable a user
    Enable { user: String },
    /// Disable a user without deleting it
    Disable { user: String },
    /// Delete a user
    Delete {
        user: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum PlansAction {
    /// List billing plans
    List,
    /// Create a plan
    Create {
        name: String,
        /// Price in currency units, e.g. 19.99
        #[arg(long)]
        price: String,
        /// monthly or yearly
        #[arg(long, default_value = "monthly")]
        interval: String,
        /// ISO currency code
        #[arg(long)]
        currency: Option<String>,
        /// Feature line, repeatable
        #[arg(long = "feature")]
        features: Vec<String>,
        /// User limit, unlimited when absent
        #[arg(long)]
        max_users: Option<u32>,
    },
    /// Make a plan available
    Activate { id: String },
    /// Withdraw a plan
    Deactivate { id: String },
    /// Delete a plan
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List invoices
    Invoices {
        /// Tenant to list invoices for
        #[arg(short, long)]
        tenant: Option<String>,
    },
}

/// File or profile configuration, then command-line overrides.
fn load_config(cli: &Cli) -> anyhow::Result<ConsoleConfig> {
    let mut config = match &cli.config {
        Some(path) => ConsoleConfig::from_file(path)?,
        None => {
            let profile = config::Config::load(cli.profile.as_deref())?;
            let mut config = profile.to_console_config();
            config.logging = ConsoleConfig::from_env().logging;
            config
        }
    };

    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(token) = &cli.token {
        config.api.token = Some(token.clone());
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }

    config.validate()?;
    Ok(config)
}

fn init_tracing(config: &ConsoleConfig, verbose: bool) {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (json, pretty) = if config.logging.is_json() {
        (Some(fmt::layer().json().with_writer(std::io::stderr)), None)
    } else {
        (
            None,
            Some(fmt::layer().with_target(true).with_writer(std::io::stderr)),
        )
    };

    tracing_subscriber::registry()
        .with(json)
        .with(pretty)
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = load_config(&cli)?;
    init_tracing(&config, cli.verbose);
    debug!(api = %config.api.base_url, "Configuration loaded");

    let ctx = CommandContext {
        config,
        output_format: cli.output,
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Commands::Configure { action } => {
            commands::configure::execute(cli.profile.as_deref(), action).await
        }
        Commands::Csv { file, limit } => commands::csv::execute(&ctx, &file, limit).await,
        Commands::DataUrl { file } => commands::data_url::execute(&ctx, &file).await,
        Commands::Tenant { action } => commands::tenant::execute(&ctx, action).await,
        Commands::Settings { action } => commands::settings::execute(&ctx, action).await,
        Commands::Users { tenant, action } => commands::users::execute(&ctx, tenant, action).await,
        Commands::Plans { action } => commands::plans::execute(&ctx, action).await,
        Commands::Version => {
            println!("tenantry {}", tenantry_core::VERSION);
            Ok(())
        }
    };

    if let Err(err) = result {
        ctx.error(&format!("{} {:#}", "error:".red().bold(), err));
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_tenant_update() {
        let cli = Cli::parse_from([
            "tenantry",
            "-o",
            "json",
            "tenant",
            "update",
            "acme",
            "--primary-color",
            "#ff0000",
            "--active",
            "false",
        ]);
        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Commands::Tenant {
                action: TenantAction::Update { id, fields },
            } => {
                assert_eq!(id, "acme");
                assert_eq!(fields.primary_color.as_deref(), Some("#ff0000"));
                assert_eq!(fields.active, Some(false));
            }
            _ => panic!("expected tenant update"),
        }
    }

    #[test]
    fn test_load_config_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tenantry.toml");
        std::fs::write(&path, "[uploads]\nmax_logo_bytes = 1024\n").unwrap();

        let cli = Cli::parse_from([
            "tenantry",
            "--config",
            path.to_str().unwrap(),
            "--api-url",
            "https://console.example.com/api/v1",
            "--log-level",
            "warn",
            "plans",
            "list",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.api.base_url, "https://console.example.com/api/v1");
        assert_eq!(config.uploads.max_logo_bytes, 1024);
        assert_eq!(config.logging.level, "warn");
    }
}
