//! Status command implementation

use colored::Colorize;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "ztprov Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    if config_path.exists() {
        println!("Config file: {}", config_path.display().to_string().cyan());
    } else {
        println!("{} Config file not found ({})", "○".dimmed(), config_path.display());
    }
    println!();

    let ctx = CommandContext::new(opts)?;
    let config = &ctx.config;

    // API token status
    if config.require_token().is_ok() {
        let source = if opts.api_token.is_some() {
            "flag or CLOUDFLARE_API_TOKEN"
        } else {
            "config file"
        };
        println!("{} API token configured ({})", "✓".green(), source.dimmed());
    } else {
        println!("{} API token not configured", "✗".red());
        println!("  → Run 'ztprov init' or set CLOUDFLARE_API_TOKEN");
    }

    // Default account status
    if let Some(account) = ctx.default_account() {
        println!("{} Default account: {}", "✓".green(), account);
    } else {
        println!("{} No default account set", "○".dimmed());
        println!("  → Resource configurations must name account_id or zone_id");
    }

    // API host status (only show if custom)
    if let Some(ref host) = config.api_host {
        println!("{} Custom API host: {}", "○".dimmed(), host.cyan());
    }

    println!("{} Output format: {:?}", "○".dimmed(), ctx.format);
    println!();

    Ok(())
}
