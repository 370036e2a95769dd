//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;
use crate::secret::SecretString;

/// Run the init command
///
/// Prompts for the API token and an optional default account, then writes
/// the config file. Existing preferences and API host are kept.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to ztprov!".bold().green());
    println!("Let's set up your Cloudflare configuration.\n");

    let mut config = Config::load_or_default(opts.config_ref())?;

    let api_token: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter your Cloudflare API token")
        .interact()?;

    let current = config.account_id.clone().unwrap_or_default();
    let account_id: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Default account ID (leave empty for none)")
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;

    config.api_token = Some(SecretString::new(api_token));
    config.account_id = Some(account_id.trim().to_string()).filter(|a| !a.is_empty());
    if opts.api_host.is_some() {
        config.api_host = opts.api_host.clone();
    }

    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    if let Some(account) = &config.account_id {
        println!("  Default account: {}", account.bold());
    }

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "ztprov status".cyan());
    println!("  {} - List supported resources", "ztprov resources".cyan());

    Ok(())
}
