use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::default_description;
use crate::model::{Group, User};

/// Attributes of a `vinyldns_group` resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAttributes {
    pub name: String,
    pub email: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub member_ids: BTreeSet<String>,
    #[serde(default)]
    pub admin_ids: BTreeSet<String>,
}

impl GroupAttributes {
    /// Build the API request; `id` is set for updates
    pub fn to_request(&self, id: Option<&str>) -> Group {
        Group {
            id: id.unwrap_or_default().to_string(),
            name: self.name.clone(),
            email: self.email.clone(),
            description: self.description.clone(),
            members: self.member_ids.iter().map(User::with_id).collect(),
            admins: self.admin_ids.iter().map(User::with_id).collect(),
            ..Group::default()
        }
    }

    /// Project an API response onto resource attributes
    pub fn from_response(group: &Group) -> Self {
        Self {
            name: group.name.clone(),
            email: group.email.clone(),
            description: group.description.clone(),
            member_ids: group.members.iter().map(|u| u.id.clone()).collect(),
            admin_ids: group.admins.iter().map(|u| u.id.clone()).collect(),
        }
    }
}
