//! Lifecycle controllers
//!
//! One [`Resource`](crate::traits::Resource) implementation per managed
//! object kind. Every controller holds a shared handle to the remote API;
//! the zone and record set controllers also hold the [`ChangePoller`]
//! that turns their change tokens into terminal results.
//!
//! ## Shared Failure Semantics
//!
//! | Operation | Remote "not found"            | Other remote errors       |
//! |-----------|-------------------------------|---------------------------|
//! | create    | error                         | wrapped with context      |
//! | read      | identity cleared, `Ok(())`    | wrapped with context      |
//! | update    | error                         | wrapped with context      |
//! | delete    | identity cleared, `Ok(())`    | wrapped with context      |
//!
//! [`ChangePoller`]: crate::poller::ChangePoller

pub mod group;
pub mod record_set;
pub mod zone;

pub use group::GroupResource;
pub use record_set::RecordSetResource;
pub use zone::ZoneResource;

/// Registered type name of the group resource and data source
pub const GROUP: &str = "vinyldns_group";

/// Registered type name of the zone resource and data source
pub const ZONE: &str = "vinyldns_zone";

/// Registered type name of the record set resource and data source
pub const RECORD_SET: &str = "vinyldns_record_set";
