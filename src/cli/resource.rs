//! Resource lifecycle commands: validate, plan, apply, refresh, destroy, import
//!
//! Each command works on one resource configuration (a YAML mapping of
//! attributes) and one state file, and hands the attribute tree to the
//! registered resource handler.

use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::CloudflareApi;
use crate::error::{Error, Result, SchemaError};
use crate::models::display::{AttributeDisplay, PlanAction, PlanDisplay};
use crate::output::{Formattable, json};
use crate::resources::{ResourceDefinition, lookup};
use crate::schema::Schema;
use crate::state::{ResourceData, StateFile, is_set};

/// What an apply did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Updated,
    Replaced,
}

impl Outcome {
    fn verb(self) -> &'static str {
        match self {
            Outcome::Created => "Created",
            Outcome::Updated => "Updated",
            Outcome::Replaced => "Replaced",
        }
    }
}

/// Read a resource configuration file into an attribute map.
pub fn load_config(path: &Path) -> Result<Map<String, Value>> {
    let contents = std::fs::read_to_string(path)?;
    match serde_yaml::from_str::<Value>(&contents)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        _ => Err(SchemaError::Invalid(format!(
            "{}: resource configuration must be a mapping of attributes",
            path.display()
        ))
        .into()),
    }
}

/// Fill `account_id` from the default account when the configuration names
/// neither an account nor a zone.
pub fn inject_default_account(
    schema: &Schema,
    config: &mut Map<String, Value>,
    account: Option<&str>,
) {
    let Some(account) = account else {
        return;
    };
    if schema.get("account_id").is_none() {
        return;
    }
    let named = |key: &str| config.get(key).is_some_and(is_set);
    if named("account_id") || named("zone_id") {
        return;
    }
    log::debug!("Using default account {}", account);
    config.insert("account_id".to_string(), Value::String(account.to_string()));
}

/// Validate and default a configuration; returns the warnings.
pub fn prepare(
    def: &ResourceDefinition,
    schema: &Schema,
    config: &mut Map<String, Value>,
) -> Result<Vec<String>> {
    let mut warnings = schema.validate(config).into_result()?;
    if let Some(message) = def.deprecation_message {
        warnings.insert(0, message.to_string());
    }
    schema.apply_defaults(config);
    Ok(warnings)
}

fn report_warnings(warnings: &[String]) {
    for warning in warnings {
        log::warn!("{}", warning);
        eprintln!("{} {}", "Warning:".yellow().bold(), warning);
    }
}

/// State of `path`, checked against the expected resource type.
fn load_state(path: &Path, resource: &str) -> Result<Option<StateFile>> {
    match StateFile::load(path)? {
        Some(state) if state.resource != resource => Err(Error::Other(format!(
            "{} holds a {} resource, not {}",
            path.display(),
            state.resource,
            resource
        ))),
        other => Ok(other),
    }
}

fn require_state(path: &Path) -> Result<StateFile> {
    StateFile::load(path)?.ok_or_else(|| {
        Error::Other(format!(
            "no state found at {}; run `ztprov apply` or `ztprov import` first",
            path.display()
        ))
    })
}

/// Conceal sensitive values and persist.
fn save_state(def: &ResourceDefinition, mut d: ResourceData, path: &Path) -> Result<StateFile> {
    (def.schema)().conceal(d.attributes_mut());
    let state = StateFile::new(def.name, d);
    state.save(path)?;
    log::debug!("Wrote state to {}", path.display());
    Ok(state)
}

/// Attribute-level changes an apply would make against `prior`.
pub fn compute_plan(
    schema: &Schema,
    config: &Map<String, Value>,
    prior: Option<&ResourceData>,
) -> Vec<PlanDisplay> {
    let Some(prior) = prior.filter(|p| !p.is_gone()) else {
        return config
            .iter()
            .filter(|(_, v)| is_set(v))
            .map(|(name, _)| PlanDisplay::new(name.clone(), PlanAction::Create))
            .collect();
    };

    let mut merged = config.clone();
    schema.merge_computed(&mut merged, prior.attributes());

    let mut rows: Vec<PlanDisplay> = schema
        .replacement_paths(prior.attributes(), &merged)
        .into_iter()
        .map(|path| PlanDisplay::new(path, PlanAction::Replace))
        .collect();
    for name in schema.changed_fields(prior.attributes(), &merged) {
        let nested = format!("{name}.");
        let covered = rows
            .iter()
            .any(|r| r.attribute == name || r.attribute.starts_with(&nested));
        if !covered {
            rows.push(PlanDisplay::new(name, PlanAction::Update));
        }
    }
    rows
}

/// Create, update or replace the remote object so it matches `config`.
///
/// Computed attributes the configuration leaves unset are carried over from
/// `prior`. A changed force-new attribute deletes the old object first.
pub async fn apply_resource(
    def: &ResourceDefinition,
    config: Map<String, Value>,
    prior: Option<&ResourceData>,
    client: &dyn CloudflareApi,
) -> Result<(ResourceData, Outcome)> {
    let schema = (def.schema)();
    let handler = def.handler;

    let Some(prior) = prior.filter(|p| !p.is_gone()) else {
        let mut d = ResourceData::new(config);
        handler.create(&mut d, client).await?;
        return Ok((d, Outcome::Created));
    };

    let mut merged = config.clone();
    schema.merge_computed(&mut merged, prior.attributes());

    let replace = schema.replacement_paths(prior.attributes(), &merged);
    if !replace.is_empty() {
        log::info!(
            "Replacing {} {}: {} changed",
            def.name,
            prior.id(),
            replace.join(", ")
        );
        let mut old = prior.clone();
        handler.delete(&mut old, client).await?;
        let mut d = ResourceData::new(config);
        handler.create(&mut d, client).await?;
        return Ok((d, Outcome::Replaced));
    }

    let mut d = ResourceData::new(merged);
    d.set_id(prior.id());
    handler.update(&mut d, client).await?;
    Ok((d, Outcome::Updated))
}

/// Adopt the remote object named by a compound import id.
pub async fn import_resource(
    def: &ResourceDefinition,
    id: &str,
    client: &dyn CloudflareApi,
) -> Result<ResourceData> {
    log::info!("Importing {} {}", def.name, id);
    let imported = def
        .handler
        .import(ResourceData::with_id(id), client)
        .await?;
    imported
        .into_iter()
        .find(|d| !d.is_gone())
        .ok_or_else(|| {
            Error::Other(format!(
                "cannot import non-existent remote object {} \"{}\"",
                def.name, id
            ))
        })
}

fn print_state(format: OutputFormat, headline: &str, state: &StateFile) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", json::format_json(state)?),
        OutputFormat::Pretty => {
            println!("{} {}", "✓".green(), headline);
            for row in AttributeDisplay::rows(&state.data) {
                println!("  {} = {}", row.name.bold(), row.value);
            }
        }
        OutputFormat::Table => {
            println!("{} {}", "✓".green(), headline);
            AttributeDisplay::rows(&state.data).print(format)?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct ValidationReport<'a> {
    resource: &'a str,
    valid: bool,
    warnings: &'a [String],
}

/// Run the validate command
pub fn validate(opts: &GlobalOptions, resource: &str, file: &Path) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let def = lookup(resource)?;
    let schema = (def.schema)();

    let mut config = load_config(file)?;
    inject_default_account(&schema, &mut config, ctx.default_account());
    let warnings = prepare(def, &schema, &mut config)?;

    match ctx.format {
        OutputFormat::Json => {
            let report = ValidationReport {
                resource: def.name,
                valid: true,
                warnings: &warnings,
            };
            println!("{}", json::format_json(&report)?);
        }
        _ => {
            report_warnings(&warnings);
            println!("{} {} configuration is valid", "✓".green(), def.name);
        }
    }
    Ok(())
}

/// Run the plan command
pub fn plan(opts: &GlobalOptions, resource: &str, file: &Path, state: &Path) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let def = lookup(resource)?;
    let schema = (def.schema)();

    let mut config = load_config(file)?;
    inject_default_account(&schema, &mut config, ctx.default_account());
    let warnings = prepare(def, &schema, &mut config)?;
    report_warnings(&warnings);

    let prior = load_state(state, def.name)?;
    let rows = compute_plan(&schema, &config, prior.as_ref().map(|s| &s.data));

    match ctx.format {
        OutputFormat::Pretty => {
            if rows.is_empty() {
                println!("{} No changes.", "✓".green());
            }
            for row in &rows {
                let line = match row.action {
                    PlanAction::Create => format!("  + {}", row.attribute).green(),
                    PlanAction::Update => format!("  ~ {}", row.attribute).yellow(),
                    PlanAction::Replace => {
                        format!("  -/+ {} ({})", row.attribute, row.action).red()
                    }
                };
                println!("{}", line);
            }
        }
        _ if rows.is_empty() && ctx.format == OutputFormat::Table => println!("No changes."),
        format => rows.print(format)?,
    }
    Ok(())
}

/// Run the apply command
pub async fn apply(opts: &GlobalOptions, resource: &str, file: &Path, state: &Path) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let def = lookup(resource)?;
    let schema = (def.schema)();

    let mut config = load_config(file)?;
    inject_default_account(&schema, &mut config, ctx.default_account());
    let warnings = prepare(def, &schema, &mut config)?;
    report_warnings(&warnings);

    let prior = load_state(state, def.name)?;
    let client = ctx.client()?;
    let (d, outcome) = apply_resource(def, config, prior.as_ref().map(|s| &s.data), &client).await?;

    let headline = format!("{} {} {}", outcome.verb(), def.name, d.id());
    let saved = save_state(def, d, state)?;
    print_state(ctx.format, &headline, &saved)
}

/// Run the refresh command
pub async fn refresh(opts: &GlobalOptions, state: &Path) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let StateFile { resource, data } = require_state(state)?;
    let def = lookup(&resource)?;

    if data.is_gone() {
        println!("{} nothing to refresh", def.name);
        return Ok(());
    }

    let client = ctx.client()?;
    let id = data.id().to_string();
    let mut d = data;
    def.handler.read(&mut d, &client).await?;

    let headline = if d.is_gone() {
        format!("{} {} no longer exists", def.name, id)
    } else {
        format!("Refreshed {} {}", def.name, id)
    };
    let saved = save_state(def, d, state)?;
    print_state(ctx.format, &headline, &saved)
}

/// Run the destroy command
pub async fn destroy(opts: &GlobalOptions, state: &Path) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let StateFile { resource, data } = require_state(state)?;
    let def = lookup(&resource)?;

    if data.is_gone() {
        println!("{} nothing to destroy", def.name);
        return Ok(());
    }

    let client = ctx.client()?;
    let id = data.id().to_string();
    let mut d = data;
    def.handler.delete(&mut d, &client).await?;
    save_state(def, d, state)?;

    match ctx.format {
        OutputFormat::Json => {
            let report = serde_json::json!({ "resource": def.name, "id": id, "destroyed": true });
            println!("{}", json::format_json(&report)?);
        }
        _ => println!("{} Destroyed {} {}", "✓".green(), def.name, id),
    }
    Ok(())
}

/// Run the import command
pub async fn import(opts: &GlobalOptions, resource: &str, id: &str, state: &Path) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let def = lookup(resource)?;

    if let Some(existing) = load_state(state, def.name)? {
        if !existing.data.is_gone() {
            return Err(Error::Other(format!(
                "{} already manages {} {}",
                state.display(),
                def.name,
                existing.data.id()
            )));
        }
    }

    let client = ctx.client()?;
    let d = import_resource(def, id, &client).await?;

    let headline = format!("Imported {} {}", def.name, d.id());
    let saved = save_state(def, d, state)?;
    print_state(ctx.format, &headline, &saved)
}
