//! Command execution context
//!
//! Provides a unified context for command execution: the config file with
//! command-line and environment overrides layered on top, the resolved output
//! format, and on demand an API client.

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::CloudflareClient;
use crate::config::Config;
use crate::error::Result;

/// Context for command execution containing config and runtime options.
pub struct CommandContext {
    /// Configuration with overrides applied
    pub config: Config,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// A missing config file is not an error here: the token may come from
    /// `--api-token` or `CLOUDFLARE_API_TOKEN` alone. Commands that talk to the
    /// API fail in [`CommandContext::client`] when no token is known.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load_or_default(opts.config_ref())?;
        config.apply(&opts.overrides());

        let format = opts
            .format
            .or_else(|| {
                config
                    .preferences
                    .format
                    .as_deref()
                    .and_then(OutputFormat::from_preference)
            })
            .unwrap_or_default();

        Ok(Self { config, format })
    }

    /// Build an authenticated API client.
    pub fn client(&self) -> Result<CloudflareClient> {
        let token = self.config.require_token()?;
        CloudflareClient::with_host(token.clone(), self.config.api_host.clone())
    }

    /// Account used when a configuration names neither account nor zone.
    pub fn default_account(&self) -> Option<&str> {
        self.config.account_id.as_deref().filter(|a| !a.is_empty())
    }
}
