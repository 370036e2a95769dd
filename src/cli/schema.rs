//! Resource type listing and schema description commands

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::models::display::{FieldDisplay, ResourceDisplay};
use crate::output::Formattable;
use crate::resources::{lookup, registry};

/// Run the resources command
pub fn resources(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let rows: Vec<ResourceDisplay> = registry().iter().map(ResourceDisplay::from).collect();
    rows.print(ctx.format)
}

/// Run the schema command
pub fn describe(opts: &GlobalOptions, resource: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let def = lookup(resource)?;

    if ctx.format != OutputFormat::Json {
        println!("{}", def.name.bold());
        println!("{}\n", def.description);
        if let Some(message) = def.deprecation_message {
            println!("{} {}\n", "⚠".yellow(), message.yellow());
        }
    }

    FieldDisplay::rows(&(def.schema)()).print(ctx.format)
}
