//! Arguments naming a resource configuration and its state file

use std::path::PathBuf;

use clap::Args;

/// Default location of the state document
pub const DEFAULT_STATE_PATH: &str = "ztprov.state.json";

/// Resource configuration file (YAML mapping of attributes)
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Path to the resource configuration
    #[arg(long, short = 'f')]
    pub file: PathBuf,
}

/// State document read and written by the command
#[derive(Debug, Clone, Args)]
pub struct StateArgs {
    /// Path to the state file
    #[arg(long, short = 's', default_value = DEFAULT_STATE_PATH)]
    pub state: PathBuf,
}
