// # VinylDNS API Trait
//
// Defines the interface of the remote DNS-management service.
//
// ## Implementations
//
// - HTTP: `vinyldns-client` crate
// - In-memory: [`crate::api::MemoryVinylDns`] (tests, demos)
//
// ## Usage
//
// ```rust,ignore
// use vinyldns_core::VinylDnsApi;
//
// async fn show(api: &dyn VinylDnsApi) -> vinyldns_core::Result<()> {
//     let zone = api.zone("9cbdd3ac-9752-4d56-9ca0-6a1a14fc5562").await?;
//     println!("{} is {:?}", zone.name, zone.status);
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::model::{Group, RecordSet, RecordSetChange, RecordSetUpdateResponse, Zone, ZoneChange};

/// Trait for the remote VinylDNS API
///
/// Every method performs a single remote call. Mutating zone and record set
/// calls return a change envelope whose ID is the change token to poll.
///
/// # Errors
///
/// Implementations must map "resource does not exist" (HTTP 404) to
/// [`crate::Error::NotFound`] and every other failure to
/// [`crate::Error::Remote`] (or a transport error). Callers depend on that
/// distinction for read and delete recovery.
///
/// # Trust Level: Untrusted
///
/// - ✅ Perform HTTP/HTTPS calls to the configured host only
/// - ✅ Parse API responses into [`crate::model`] types
/// - ❌ Retry or poll (owned by the change poller)
/// - ❌ Cache anything beyond a single request
#[async_trait]
pub trait VinylDnsApi: Send + Sync {
    /// Create a group; groups are applied synchronously
    async fn group_create(&self, group: &Group) -> Result<Group, crate::Error>;

    /// Fetch a group by ID
    async fn group(&self, group_id: &str) -> Result<Group, crate::Error>;

    /// Replace a group
    async fn group_update(&self, group_id: &str, group: &Group) -> Result<Group, crate::Error>;

    /// Delete a group
    async fn group_delete(&self, group_id: &str) -> Result<Group, crate::Error>;

    /// Queue a zone creation
    async fn zone_create(&self, zone: &Zone) -> Result<ZoneChange, crate::Error>;

    /// Fetch a zone by ID
    async fn zone(&self, zone_id: &str) -> Result<Zone, crate::Error>;

    /// Fetch a zone by its DNS name
    async fn zone_by_name(&self, name: &str) -> Result<Zone, crate::Error>;

    /// Whether a zone with the given ID currently exists
    async fn zone_exists(&self, zone_id: &str) -> Result<bool, crate::Error>;

    /// Queue a zone update
    async fn zone_update(&self, zone_id: &str, zone: &Zone) -> Result<ZoneChange, crate::Error>;

    /// Queue a zone deletion
    async fn zone_delete(&self, zone_id: &str) -> Result<ZoneChange, crate::Error>;

    /// Look up a zone change by its token
    async fn zone_change(&self, zone_id: &str, change_id: &str)
    -> Result<ZoneChange, crate::Error>;

    /// Queue a record set creation
    async fn record_set_create(
        &self,
        record_set: &RecordSet,
    ) -> Result<RecordSetUpdateResponse, crate::Error>;

    /// Fetch a record set
    async fn record_set(
        &self,
        zone_id: &str,
        record_set_id: &str,
    ) -> Result<RecordSet, crate::Error>;

    /// Queue a record set update
    async fn record_set_update(
        &self,
        record_set: &RecordSet,
    ) -> Result<RecordSetUpdateResponse, crate::Error>;

    /// Queue a record set deletion
    async fn record_set_delete(
        &self,
        zone_id: &str,
        record_set_id: &str,
    ) -> Result<RecordSetUpdateResponse, crate::Error>;

    /// Look up a record set change by its token
    async fn record_set_change(
        &self,
        zone_id: &str,
        record_set_id: &str,
        change_id: &str,
    ) -> Result<RecordSetChange, crate::Error>;
}
