// # Resource and Data Source Traits
//
// The declarative-resource framework drives these hooks. Each hook runs to
// completion on its own call stack and keeps no state between calls: all
// state lives in the caller's `ResourceData` or in the remote service.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::resource_data::ResourceData;

/// Lifecycle hooks of a managed resource
///
/// # Identity Contract
///
/// - `create` sets the identity as soon as the remote object exists, before
///   waiting for asynchronous processing, so a failed wait still leaves the
///   framework pointing at the remote object.
/// - `read` clears the identity when the remote object is gone and returns
///   `Ok(())`.
/// - `delete` treats an already-absent object as success and clears the
///   identity.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Registered type name (e.g. "vinyldns_zone")
    fn type_name(&self) -> &'static str;

    /// Current version of the stored state layout
    fn schema_version(&self) -> u32 {
        1
    }

    /// Create the remote object from the bag's attributes
    async fn create(&self, data: &mut ResourceData) -> Result<()>;

    /// Refresh the bag from the remote object
    async fn read(&self, data: &mut ResourceData) -> Result<()>;

    /// Push the bag's attributes to the remote object
    async fn update(&self, data: &mut ResourceData) -> Result<()>;

    /// Delete the remote object
    async fn delete(&self, data: &mut ResourceData) -> Result<()>;

    /// Upgrade state stored at an older schema version
    ///
    /// # Errors
    ///
    /// The default accepts only the current version.
    fn upgrade_state(&self, version: u32, data: ResourceData) -> Result<ResourceData> {
        if version == self.schema_version() {
            Ok(data)
        } else {
            Err(Error::state_migration(format!(
                "Unexpected schema version: {version}"
            )))
        }
    }
}

/// Read-only lookup exposed to configurations
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Registered type name (e.g. "vinyldns_zone")
    fn type_name(&self) -> &'static str;

    /// Resolve the lookup keys in the bag and fill in the computed attributes
    async fn read(&self, data: &mut ResourceData) -> Result<()>;
}
