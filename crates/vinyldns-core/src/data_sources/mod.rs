//! Read-only lookups
//!
//! Unlike resources, data sources treat a remote "not found" as an error:
//! a configuration referencing a missing object cannot be planned.

pub mod group;
pub mod record_set;
pub mod zone;

pub use group::GroupDataSource;
pub use record_set::RecordSetDataSource;
pub use zone::ZoneDataSource;

use crate::error::{Error, Result};
use crate::resource_data::ResourceData;

/// Required, non-empty lookup key
fn lookup_key(data: &ResourceData, key: &str) -> Result<String> {
    data.get_str(key)
        .map(str::to_string)
        .ok_or_else(|| Error::validation(format!("{key} is required")))
}
