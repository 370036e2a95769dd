//! Cloudflare Zero Trust API client

pub mod api;
pub mod cloudflare;
#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use api::{AccessApplicationApi, TeamsLocationApi};
pub use cloudflare::CloudflareClient;
#[cfg(test)]
pub use mock::MockCloudflareClient;

/// Every API surface the resource handlers need.
///
/// Implemented for anything that implements the per-family traits, so
/// handlers can take a single `&dyn CloudflareApi`.
pub trait CloudflareApi: AccessApplicationApi + TeamsLocationApi {}

impl<T> CloudflareApi for T where T: AccessApplicationApi + TeamsLocationApi {}
