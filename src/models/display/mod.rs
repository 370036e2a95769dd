//! Display model implementations for table and JSON output
//!
//! Display models transform internal types into CLI-friendly formats
//! with appropriate column names and serialization.

mod common;
mod plan;
mod resource;
mod schema;
mod state;

pub use plan::{PlanAction, PlanDisplay};
pub use resource::ResourceDisplay;
pub use schema::FieldDisplay;
pub use state::AttributeDisplay;
