//! Shared CLI argument types
//!
//! This module contains reusable argument structs that can be flattened
//! into commands using `#[command(flatten)]`.

mod common;
mod global;
mod resource;

pub use common::OutputFormat;
pub use global::GlobalOptions;
pub use resource::{ConfigArgs, StateArgs};

#[cfg(test)]
pub use resource::DEFAULT_STATE_PATH;
