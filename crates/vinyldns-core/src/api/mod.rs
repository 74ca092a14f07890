//! Implementations of [`crate::VinylDnsApi`] that live in the core crate
//!
//! The HTTP implementation lives in the `vinyldns-client` crate.

pub mod memory;

pub use memory::{ChangeBehavior, ChangeOutcome, MemoryVinylDns};
