//! Field-level value validators

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{LazyLock, Mutex};

use regex::Regex;
use serde_json::Value;

/// Duration grammar accepted by the remote API: a sequence of decimal
/// numbers each followed by a unit, e.g. `24h`, `1h30m` or `1.5s`.
const DURATION_PATTERN: &str =
    r"^[-+]?(0|(([0-9]+(\.[0-9]*)?|\.[0-9]+)(ns|us|µs|μs|ms|s|m|h))+)$";

static DURATION: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(DURATION_PATTERN));

/// Compiled `Validator::Matches` patterns.
static PATTERNS: LazyLock<Mutex<HashMap<&'static str, Regex>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// A check applied to a single configured value.
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    /// String must be one of the listed values (case-sensitive)
    OneOf(&'static [&'static str]),
    /// Integer within an inclusive range
    IntBetween(i64, i64),
    /// Duration string such as `24h` or `2h45m`
    Duration,
    /// String must match a regular expression
    Matches {
        pattern: &'static str,
        message: &'static str,
    },
}

impl Validator {
    /// Check `value` configured at `key`, returning the error message on failure.
    pub fn check(&self, key: &str, value: &Value) -> Result<(), String> {
        match self {
            Validator::OneOf(allowed) => {
                let v = value.as_str().unwrap_or_default();
                if allowed.contains(&v) {
                    Ok(())
                } else {
                    let quoted: Vec<String> = allowed.iter().map(|a| format!("{a:?}")).collect();
                    Err(format!(
                        "expected {key} to be one of [{}], got {v}",
                        quoted.join(" ")
                    ))
                }
            }
            Validator::IntBetween(min, max) => match value.as_i64() {
                Some(v) if v >= *min && v <= *max => Ok(()),
                _ => Err(format!(
                    "expected {key} to be in the range ({min} - {max}), got {value}"
                )),
            },
            Validator::Duration => {
                let v = value.as_str().unwrap_or_default();
                let re = DURATION
                    .as_ref()
                    .map_err(|e| format!("invalid validation pattern: {e}"))?;
                if re.is_match(v) {
                    Ok(())
                } else {
                    Err(format!(
                        "{key:?} only supports \"ns\", \"us\" (or \"µs\"), \"ms\", \"s\", \"m\", or \"h\" as valid units"
                    ))
                }
            }
            Validator::Matches { pattern, message } => {
                let v = value.as_str().unwrap_or_default();
                if matches(*pattern, v)? {
                    Ok(())
                } else {
                    Err(format!("invalid value for {key} ({message})"))
                }
            }
        }
    }
}

fn matches(pattern: &'static str, value: &str) -> Result<bool, String> {
    let mut patterns = PATTERNS
        .lock()
        .map_err(|_| "validation pattern cache is poisoned".to_string())?;
    let re = match patterns.entry(pattern) {
        Entry::Occupied(entry) => entry.into_mut(),
        Entry::Vacant(entry) => entry.insert(
            Regex::new(pattern).map_err(|e| format!("invalid validation pattern: {e}"))?,
        ),
    };
    Ok(re.is_match(value))
}
