//! API trait definitions split by resource family
//!
//! - [`AccessApplicationApi`] - Access application CRUD
//! - [`TeamsLocationApi`] - Gateway DNS location CRUD
//!
//! The [`CloudflareApi`](super::CloudflareApi) super-trait combines both.

mod access_application;
mod teams_location;

pub use access_application::AccessApplicationApi;
pub use teams_location::TeamsLocationApi;
