use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use super::lookup_key;
use crate::error::Result;
use crate::id;
use crate::model::Record;
use crate::resource_data::ResourceData;
use crate::traits::{DataSource, VinylDnsApi};

/// `vinyldns_record_set` data source: look a record set up by zone and id
///
/// Exposes the raw record list instead of the per-type value attributes, so
/// it works for every record type, SOA included.
#[derive(Clone)]
pub struct RecordSetDataSource {
    api: Arc<dyn VinylDnsApi>,
}

#[derive(Serialize)]
struct RecordSetLookup<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    record_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zone_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    owner_group_id: Option<&'a str>,
    is_shared: bool,
    records: &'a [Record],
}

impl RecordSetDataSource {
    pub fn new(api: Arc<dyn VinylDnsApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DataSource for RecordSetDataSource {
    fn type_name(&self) -> &'static str {
        crate::resources::RECORD_SET
    }

    async fn read(&self, data: &mut ResourceData) -> Result<()> {
        let zone_id = lookup_key(data, "zone_id")?;
        let record_id = lookup_key(data, "record_id")?;
        let composite = id::encode(&zone_id, &record_id);
        info!("looking up record set {}", composite);

        let record_set = self
            .api
            .record_set(&zone_id, &record_id)
            .await
            .map_err(|e| e.in_operation("reading", "recordset", composite.as_str()))?;

        data.set_id(composite.as_str());
        data.merge(&RecordSetLookup {
            name: &record_set.name,
            record_type: &record_set.record_type,
            ttl: record_set.ttl,
            zone_name: record_set.zone_name.as_deref(),
            owner_group_id: record_set.owner_group_id.as_deref(),
            is_shared: record_set.is_shared,
            records: &record_set.records,
        })
    }
}
