//! Composite record set identifiers
//!
//! A record set ID is only unique within its zone, so the identifier
//! persisted for a record set resource is `<zone_id>:<record_set_id>`.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Separator between the zone ID and the record set ID
pub const SEPARATOR: char = ':';

/// A record set address that is unique across all zones
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordSetId {
    /// ID of the owning zone
    pub zone_id: String,
    /// ID of the record set within the zone
    pub record_set_id: String,
}

impl RecordSetId {
    /// Pair a zone ID with a record set ID
    pub fn new(zone_id: impl Into<String>, record_set_id: impl Into<String>) -> Self {
        Self {
            zone_id: zone_id.into(),
            record_set_id: record_set_id.into(),
        }
    }
}

impl fmt::Display for RecordSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.zone_id, SEPARATOR, self.record_set_id)
    }
}

impl FromStr for RecordSetId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (zone_id, record_set_id) = decode(s)?;
        Ok(Self::new(zone_id, record_set_id))
    }
}

/// Build the composite identifier for a record set
///
/// Both halves come from API responses, so no validation is done here.
pub fn encode(zone_id: &str, record_set_id: &str) -> String {
    format!("{zone_id}{SEPARATOR}{record_set_id}")
}

/// Split a composite identifier into `(zone_id, record_set_id)`
///
/// # Errors
///
/// Returns [`Error::MalformedIdentifier`] unless the input contains exactly
/// one separator with a non-empty part on each side.
pub fn decode(id: &str) -> Result<(&str, &str)> {
    let mut parts = id.split(SEPARATOR);

    match (parts.next(), parts.next(), parts.next()) {
        (Some(zone_id), Some(record_set_id), None)
            if !zone_id.is_empty() && !record_set_id.is_empty() =>
        {
            Ok((zone_id, record_set_id))
        }
        _ => Err(Error::MalformedIdentifier(id.to_string())),
    }
}
