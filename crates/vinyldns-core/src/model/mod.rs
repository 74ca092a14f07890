//! Typed request and response structures of the VinylDNS REST API
//!
//! These mirror the JSON documents exchanged with the remote service
//! (camelCase field names). The payload mapper converts between these and
//! the framework-facing attribute structs in [`crate::mapper`].

pub mod group;
pub mod record_set;
pub mod zone;

pub use group::{Group, User};
pub use record_set::{
    Record, RecordSet, RecordSetChange, RecordSetResponse, RecordSetUpdateResponse,
};
pub use zone::{AclRule, Zone, ZoneAcl, ZoneChange, ZoneChanges, ZoneConnection, ZoneResponse};

/// Server-reported change status strings
pub mod status {
    /// Non-terminal status, also assumed while a change is not yet visible
    pub const PENDING: &str = "Pending";
    /// Terminal success for record set changes
    pub const COMPLETE: &str = "Complete";
    /// Terminal success for zone changes
    pub const SYNCED: &str = "Synced";
    /// Terminal failure for every change kind
    pub const FAILED: &str = "Failed";
    /// Zone existence target after a create
    pub const CREATED: &str = "Created";
    /// Zone existence target after a delete
    pub const DELETED: &str = "Deleted";
}
