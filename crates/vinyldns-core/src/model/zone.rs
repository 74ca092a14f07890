use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A VinylDNS zone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub admin_group_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub shared: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<ZoneConnection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_connection: Option<ZoneConnection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acl: Option<ZoneAcl>,
}

/// DNS server connection used for zone updates or transfers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneConnection {
    pub name: String,
    pub key_name: String,
    pub key: String,
    pub primary_server: String,
}

/// Access control list attached to a zone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneAcl {
    #[serde(default)]
    pub rules: Vec<AclRule>,
}

/// A single zone access rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AclRule {
    pub access_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_mask: Option<String>,
    #[serde(default)]
    pub record_types: Vec<String>,
}

/// Envelope returned by `GET /zones/{id}` and `GET /zones/name/{name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneResponse {
    pub zone: Zone,
}

/// A queued zone change; returned by zone create, update and delete
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneChange {
    /// Change token
    pub id: String,
    pub zone: Zone,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub change_type: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

/// Page of a zone's change history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneChanges {
    #[serde(default)]
    pub zone_id: String,
    #[serde(default)]
    pub zone_changes: Vec<ZoneChange>,
}
