use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use super::lookup_key;
use crate::error::Result;
use crate::resource_data::ResourceData;
use crate::traits::{DataSource, VinylDnsApi};

/// `vinyldns_zone` data source: look a zone up by name
#[derive(Clone)]
pub struct ZoneDataSource {
    api: Arc<dyn VinylDnsApi>,
}

#[derive(Serialize)]
struct ZoneLookup<'a> {
    name: &'a str,
    email: &'a str,
    admin_group_id: &'a str,
}

impl ZoneDataSource {
    pub fn new(api: Arc<dyn VinylDnsApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DataSource for ZoneDataSource {
    fn type_name(&self) -> &'static str {
        crate::resources::ZONE
    }

    async fn read(&self, data: &mut ResourceData) -> Result<()> {
        let name = lookup_key(data, "name")?;
        info!("looking up zone {}", name);

        let zone = self
            .api
            .zone_by_name(&name)
            .await
            .map_err(|e| e.in_operation("reading", "zone", name.as_str()))?;

        data.set_id(zone.id.as_str());
        data.merge(&ZoneLookup {
            name: &zone.name,
            email: &zone.email,
            admin_group_id: &zone.admin_group_id,
        })
    }
}
