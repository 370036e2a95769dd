//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod args;
pub mod context;
pub mod init;
pub mod resource;
pub mod schema;
pub mod status;

pub use args::{ConfigArgs, OutputFormat, StateArgs};
pub use context::CommandContext;

/// ztprov - drive Cloudflare Zero Trust resources from local configuration
#[derive(Parser, Debug)]
#[command(name = "ztprov")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "ZTPROV_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "ZTPROV_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "ZTPROV_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Cloudflare API token
    #[arg(
        long,
        global = true,
        env = "CLOUDFLARE_API_TOKEN",
        hide_env_values = true
    )]
    pub api_token: Option<String>,

    /// Default account for resources that name neither account nor zone
    #[arg(long, global = true, env = "CLOUDFLARE_ACCOUNT_ID", hide_env = true)]
    pub account_id: Option<String>,

    /// Custom API host (development/testing)
    #[arg(long, global = true, env = "ZTPROV_API_HOST", hide = true)]
    pub api_host: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize ztprov configuration
    Init,

    /// Show configuration status
    Status,

    /// Display version information
    Version,

    /// List the supported resource types
    Resources,

    /// Describe the attributes of a resource type
    Schema {
        /// Resource type, e.g. cloudflare_access_application
        resource: String,
    },

    /// Check a resource configuration without contacting the API
    Validate {
        /// Resource type
        resource: String,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Show which attributes an apply would change
    Plan {
        /// Resource type
        resource: String,

        #[command(flatten)]
        config: ConfigArgs,

        #[command(flatten)]
        state: StateArgs,
    },

    /// Create or update the remote object to match the configuration
    #[command(after_help = "\
Examples:
  ztprov apply cloudflare_zero_trust_dns_location -f office.yaml
  ztprov apply cloudflare_access_application -f wiki.yaml -s wiki.state.json")]
    Apply {
        /// Resource type
        resource: String,

        #[command(flatten)]
        config: ConfigArgs,

        #[command(flatten)]
        state: StateArgs,
    },

    /// Re-read the remote object into the state file
    Refresh {
        #[command(flatten)]
        state: StateArgs,
    },

    /// Delete the remote object recorded in the state file
    Destroy {
        #[command(flatten)]
        state: StateArgs,
    },

    /// Adopt an existing remote object into a state file
    #[command(after_help = "\
Import ids:
  cloudflare_access_application       account/<account_id>/<app_id>
                                      zone/<zone_id>/<app_id>
  cloudflare_zero_trust_dns_location  <account_id>/<location_id>")]
    Import {
        /// Resource type
        resource: String,

        /// Compound import id
        id: String,

        #[command(flatten)]
        state: StateArgs,
    },
}
