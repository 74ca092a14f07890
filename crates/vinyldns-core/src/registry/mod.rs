//! Resource and data source registry
//!
//! Maps the type names used in configurations (`vinyldns_zone`, ...) to
//! the objects that implement them, so callers dispatch by name instead of
//! matching on strings.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use vinyldns_core::api::MemoryVinylDns;
//! use vinyldns_core::resources::GroupResource;
//! use vinyldns_core::registry::ProviderRegistry;
//!
//! let registry = ProviderRegistry::new();
//! registry.register_resource(Arc::new(GroupResource::new(Arc::new(MemoryVinylDns::new()))));
//!
//! assert!(registry.has_resource("vinyldns_group"));
//! ```
//!
//! [`crate::provider::build_registry`] registers the full set.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{Error, Result};
use crate::traits::{DataSource, Resource};

/// Name-to-implementation registry
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes. Lookups hand out `Arc` clones so no lock is
/// held while a hook runs.
#[derive(Default)]
pub struct ProviderRegistry {
    resources: RwLock<HashMap<String, Arc<dyn Resource>>>,
    data_sources: RwLock<HashMap<String, Arc<dyn DataSource>>>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource under its [`Resource::type_name`]
    ///
    /// Registering the same name twice replaces the earlier entry.
    pub fn register_resource(&self, resource: Arc<dyn Resource>) {
        let name = resource.type_name().to_string();
        self.resources
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, resource);
    }

    /// Register a data source under its [`DataSource::type_name`]
    pub fn register_data_source(&self, data_source: Arc<dyn DataSource>) {
        let name = data_source.type_name().to_string();
        self.data_sources
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, data_source);
    }

    /// Look up a resource
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownResource`] if `name` is not registered.
    pub fn resource(&self, name: &str) -> Result<Arc<dyn Resource>> {
        self.resources
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownResource(name.to_string()))
    }

    /// Look up a data source
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownResource`] if `name` is not registered.
    pub fn data_source(&self, name: &str) -> Result<Arc<dyn DataSource>> {
        self.data_sources
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownResource(name.to_string()))
    }

    /// Registered resource names, sorted
    pub fn resource_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .resources
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Registered data source names, sorted
    pub fn data_source_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .data_sources
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Check if a resource type is registered
    pub fn has_resource(&self, name: &str) -> bool {
        self.resources
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }
}
