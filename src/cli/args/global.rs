//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};
use crate::config::Overrides;

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// The precedence is: CLI flag > environment variable > config file > default.
/// This struct captures the CLI/env layer; the config file is layered
/// underneath in `CommandContext`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (pretty, table, json); `None` defers to the config file
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.ztprov/config.yaml)
    pub config: Option<String>,

    /// API token override
    pub api_token: Option<String>,

    /// Default account override
    pub account_id: Option<String>,

    /// Custom API host for development/testing
    pub api_host: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_token: cli.api_token.clone(),
            account_id: cli.account_id.clone(),
            api_host: cli.api_host.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Get API host override as `Option<&str>`.
    #[cfg(test)]
    pub fn api_host_ref(&self) -> Option<&str> {
        self.api_host.as_deref()
    }

    /// The values that override the config file.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            api_token: self.api_token.clone(),
            account_id: self.account_id.clone(),
            api_host: self.api_host.clone(),
        }
    }
}
