// # vinyldns-core
//
// Core library of the VinylDNS provider.
//
// ## Architecture Overview
//
// - **VinylDnsApi**: Trait for the remote VinylDNS API (HTTP client, in-memory)
// - **Resource / DataSource**: Lifecycle hooks driven by the declarative-resource framework
// - **ChangePoller**: Waits for asynchronous zone and record set changes
// - **mapper**: Converts typed resource attributes to and from API payloads
// - **id**: Composite `zone_id:record_set_id` identifiers
// - **ProviderRegistry**: Resource type name to implementation
//
// ## Design Principles
//
// 1. **No Shared Mutable State**: All state lives in the caller's `ResourceData` or in VinylDNS
// 2. **One Poller**: Every change kind is awaited by the same state machine
// 3. **Typed Attributes**: The attribute bag is decoded once at the boundary
// 4. **Library-First**: The binary is a thin shell around this crate

pub mod api;
pub mod config;
pub mod data_sources;
pub mod error;
pub mod id;
pub mod mapper;
pub mod migrate;
pub mod model;
pub mod poller;
pub mod provider;
pub mod registry;
pub mod resource_data;
pub mod resources;
pub mod traits;

// Re-export core types for convenience
pub use api::MemoryVinylDns;
pub use config::{PollSettings, ProviderConfig};
pub use error::{Error, Result};
pub use poller::{Awaited, ChangePoller};
pub use registry::ProviderRegistry;
pub use resource_data::ResourceData;
pub use traits::{DataSource, Resource, VinylDnsApi};
