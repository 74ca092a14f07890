//! Provider assembly
//!
//! Wires one remote API handle and one set of poll settings into every
//! resource and data source, and implements the operations that sit above
//! a single lifecycle hook (import).

use std::sync::Arc;
use tracing::info;

use crate::config::PollSettings;
use crate::data_sources::{GroupDataSource, RecordSetDataSource, ZoneDataSource};
use crate::error::{Error, Result};
use crate::poller::ChangePoller;
use crate::registry::ProviderRegistry;
use crate::resource_data::ResourceData;
use crate::resources::{GroupResource, RecordSetResource, ZoneResource};
use crate::traits::VinylDnsApi;

/// Build a registry holding every VinylDNS resource and data source
///
/// # Parameters
///
/// - `api`: Remote API shared by all registered objects
/// - `poll`: Timing of the change poller used by zones and record sets
pub fn build_registry(api: Arc<dyn VinylDnsApi>, poll: PollSettings) -> ProviderRegistry {
    let poller = ChangePoller::new(poll);
    let registry = ProviderRegistry::new();

    registry.register_resource(Arc::new(GroupResource::new(api.clone())));
    registry.register_resource(Arc::new(ZoneResource::new(api.clone(), poller.clone())));
    registry.register_resource(Arc::new(RecordSetResource::new(api.clone(), poller)));

    registry.register_data_source(Arc::new(GroupDataSource::new(api.clone())));
    registry.register_data_source(Arc::new(ZoneDataSource::new(api.clone())));
    registry.register_data_source(Arc::new(RecordSetDataSource::new(api)));

    registry
}

/// Adopt an existing remote object
///
/// The id is taken as is (composite for record sets) and the resource is
/// read to fill in its attributes.
///
/// # Errors
///
/// - [`Error::UnknownResource`] for an unregistered type
/// - [`Error::NotFound`] when nothing exists under `id`
/// - Any error of the resource's read
pub async fn import(
    registry: &ProviderRegistry,
    type_name: &str,
    id: &str,
) -> Result<ResourceData> {
    let resource = registry.resource(type_name)?;
    info!("importing {} {}", type_name, id);

    let mut data = ResourceData::with_id(id);
    resource.read(&mut data).await?;

    if !data.has_id() {
        return Err(Error::not_found(format!(
            "cannot import non-existent remote object {type_name} {id}"
        )));
    }
    Ok(data)
}
