//! Stored-state upgrades
//!
//! Only the record set resource has ever changed its state layout.

use serde_json::Value;
use tracing::info;

use crate::error::{Error, Result};
use crate::id;
use crate::resource_data::ResourceData;

/// Upgrade record set state from schema version 0 to 1
///
/// Version 0 stored the bare record set id and a single `record_text`.
/// Version 1 stores the composite `zone_id:record_set_id` and a
/// `record_texts` set.
///
/// # Errors
///
/// Returns [`Error::StateMigration`] when a non-empty version 0 state has no
/// `zone_id` to build the composite id from.
pub fn record_set_v0_to_v1(mut data: ResourceData) -> Result<ResourceData> {
    if !data.has_id() && data.attributes.is_empty() {
        return Ok(data);
    }

    if data.has_id() && id::decode(data.id()).is_err() {
        let zone_id = data
            .get_str("zone_id")
            .ok_or_else(|| Error::state_migration("version 0 record set state has no zone_id"))?
            .to_string();
        let composite = id::encode(&zone_id, data.id());
        info!("migrating record set id {} to {}", data.id(), composite);
        data.set_id(composite);
    }

    if let Some(text) = data.attributes.remove("record_text") {
        match text {
            Value::String(s) if !s.is_empty() => {
                data.set("record_texts", Value::Array(vec![Value::String(s)]));
            }
            _ => {}
        }
    }

    Ok(data)
}
