use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use super::lookup_key;
use crate::error::Result;
use crate::resource_data::ResourceData;
use crate::traits::{DataSource, VinylDnsApi};

/// `vinyldns_group` data source: look a group up by id
#[derive(Clone)]
pub struct GroupDataSource {
    api: Arc<dyn VinylDnsApi>,
}

#[derive(Serialize)]
struct GroupLookup<'a> {
    name: &'a str,
    email: &'a str,
    description: &'a str,
}

impl GroupDataSource {
    pub fn new(api: Arc<dyn VinylDnsApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DataSource for GroupDataSource {
    fn type_name(&self) -> &'static str {
        crate::resources::GROUP
    }

    async fn read(&self, data: &mut ResourceData) -> Result<()> {
        let id = lookup_key(data, "id")?;
        info!("looking up group {}", id);

        let group = self
            .api
            .group(&id)
            .await
            .map_err(|e| e.in_operation("reading", "group", id.as_str()))?;

        data.set_id(group.id.as_str());
        data.merge(&GroupLookup {
            name: &group.name,
            email: &group.email,
            description: &group.description,
        })
    }
}
