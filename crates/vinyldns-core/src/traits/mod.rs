//! Core traits for the VinylDNS provider
//!
//! This module defines the abstract interfaces at the seams of the crate.
//!
//! - [`VinylDnsApi`]: The remote DNS-management API
//! - [`Resource`]: Lifecycle hooks of a declarative resource
//! - [`DataSource`]: Read-only lookups exposed to configurations

pub mod resource;
pub mod vinyldns_api;

pub use resource::{DataSource, Resource};
pub use vinyldns_api::VinylDnsApi;
