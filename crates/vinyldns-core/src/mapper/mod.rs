//! Payload mapper
//!
//! Bidirectional translation between the framework-facing attribute structs
//! (decoded from a [`crate::ResourceData`]) and the API structures in
//! [`crate::model`]. Every domain rule that must hold before a request is
//! sent is checked here, so validation failures never reach the network.

pub mod group;
pub mod record_set;
pub mod zone;

pub use group::GroupAttributes;
pub use record_set::{RecordData, RecordSetAttributes, RecordType, remove_brackets};
pub use zone::{AclRuleBlock, ConnectionBlock, ZoneAttributes};

/// Description applied when the configuration does not set one
pub const DEFAULT_DESCRIPTION: &str = "Managed by Terraform";

pub(crate) fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

/// Empty strings in configuration mean "unset"
pub(crate) fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}
