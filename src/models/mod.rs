//! Display models for CLI output
//!
//! This module converts registry entries, schemas, plans and resource state
//! into CLI-friendly rows.

pub mod display;
