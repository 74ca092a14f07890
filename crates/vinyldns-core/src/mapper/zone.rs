use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{default_description, non_empty};
use crate::error::{Error, Result};
use crate::model::{AclRule, Zone, ZoneAcl, ZoneConnection};

/// Attributes of a `vinyldns_zone` resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneAttributes {
    pub name: String,
    pub email: String,
    pub admin_group_id: String,

    /// Computed
    #[serde(default)]
    pub status: Option<String>,

    /// Computed
    #[serde(default)]
    pub shared: bool,

    /// Computed (RFC 3339)
    #[serde(default)]
    pub created: Option<String>,

    #[serde(default)]
    pub zone_connection: Vec<ConnectionBlock>,

    #[serde(default)]
    pub transfer_connection: Vec<ConnectionBlock>,

    #[serde(default)]
    pub acl_rule: BTreeSet<AclRuleBlock>,
}

/// `zone_connection` / `transfer_connection` block; all fields are required together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionBlock {
    pub name: String,
    pub key: String,
    pub key_name: String,
    pub primary_server: String,
}

/// `acl_rule` block
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AclRuleBlock {
    pub access_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_mask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub record_types: BTreeSet<String>,
}

impl ConnectionBlock {
    fn to_request(&self) -> ZoneConnection {
        ZoneConnection {
            name: self.name.clone(),
            key_name: self.key_name.clone(),
            key: self.key.clone(),
            primary_server: self.primary_server.clone(),
        }
    }

    fn from_response(connection: &ZoneConnection) -> Self {
        Self {
            name: connection.name.clone(),
            key: connection.key.clone(),
            key_name: connection.key_name.clone(),
            primary_server: connection.primary_server.clone(),
        }
    }
}

impl AclRuleBlock {
    fn to_request(&self) -> AclRule {
        AclRule {
            access_level: self.access_level.clone(),
            description: Some(self.description.clone()),
            user_id: non_empty(&self.user_id),
            group_id: non_empty(&self.group_id),
            record_mask: non_empty(&self.record_mask),
            record_types: self.record_types.iter().cloned().collect(),
        }
    }

    fn from_response(rule: &AclRule) -> Self {
        Self {
            access_level: rule.access_level.clone(),
            record_mask: rule.record_mask.clone(),
            user_id: rule.user_id.clone(),
            group_id: rule.group_id.clone(),
            description: rule.description.clone().unwrap_or_default(),
            record_types: rule.record_types.iter().cloned().collect(),
        }
    }
}

/// A connection block is a list in configuration syntax but holds at most one entry
fn single_connection(
    blocks: &[ConnectionBlock],
    attribute: &str,
) -> Result<Option<ZoneConnection>> {
    match blocks {
        [] => Ok(None),
        [block] if block.name.is_empty() => Ok(None),
        [block] => Ok(Some(block.to_request())),
        _ => Err(Error::validation(format!(
            "{attribute} accepts at most one block, got {}",
            blocks.len()
        ))),
    }
}

impl ZoneAttributes {
    /// Build the API request; `id` is set for updates
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when a connection attribute holds more
    /// than one block.
    pub fn to_request(&self, id: Option<&str>) -> Result<Zone> {
        Ok(Zone {
            id: id.unwrap_or_default().to_string(),
            name: self.name.clone(),
            email: self.email.clone(),
            admin_group_id: self.admin_group_id.clone(),
            shared: self.shared,
            connection: single_connection(&self.zone_connection, "zone_connection")?,
            transfer_connection: single_connection(
                &self.transfer_connection,
                "transfer_connection",
            )?,
            acl: Some(ZoneAcl {
                rules: self.acl_rule.iter().map(AclRuleBlock::to_request).collect(),
            }),
            ..Zone::default()
        })
    }

    /// Project an API response onto resource attributes
    pub fn from_response(zone: &Zone) -> Self {
        Self {
            name: zone.name.clone(),
            email: zone.email.clone(),
            admin_group_id: zone.admin_group_id.clone(),
            status: zone.status.clone(),
            shared: zone.shared,
            created: zone.created.map(|c| c.to_rfc3339()),
            zone_connection: zone
                .connection
                .iter()
                .map(ConnectionBlock::from_response)
                .collect(),
            transfer_connection: zone
                .transfer_connection
                .iter()
                .map(ConnectionBlock::from_response)
                .collect(),
            acl_rule: zone
                .acl
                .iter()
                .flat_map(|acl| acl.rules.iter())
                .map(AclRuleBlock::from_response)
                .collect(),
        }
    }
}
