use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::id;
use crate::mapper::RecordSetAttributes;
use crate::migrate;
use crate::poller::{Awaited, ChangePoller};
use crate::resource_data::ResourceData;
use crate::traits::{Resource, VinylDnsApi};

const KIND: &str = "recordset";

/// `vinyldns_record_set`
///
/// Identified by the composite `zone_id:record_set_id`. Every mutation
/// waits for its change to become `Complete`.
///
/// ## State Versions
///
/// - **0**: plain record set id, single `record_text`
/// - **1**: composite id, `record_texts` set (current)
#[derive(Clone)]
pub struct RecordSetResource {
    api: Arc<dyn VinylDnsApi>,
    poller: ChangePoller,
}

impl RecordSetResource {
    pub fn new(api: Arc<dyn VinylDnsApi>, poller: ChangePoller) -> Self {
        Self { api, poller }
    }

    async fn wait_for_change(
        &self,
        zone_id: &str,
        record_set_id: &str,
        change_id: &str,
    ) -> Result<String> {
        let awaited = Awaited::record_set_change(&id::encode(zone_id, record_set_id), change_id);
        let api = &self.api;

        self.poller
            .wait(&awaited, move || async move {
                api.record_set_change(zone_id, record_set_id, change_id)
                    .await
                    .map(|c| c.status)
            })
            .await
    }
}

#[async_trait]
impl Resource for RecordSetResource {
    fn type_name(&self) -> &'static str {
        super::RECORD_SET
    }

    fn upgrade_state(&self, version: u32, data: ResourceData) -> Result<ResourceData> {
        match version {
            0 => migrate::record_set_v0_to_v1(data),
            _ if version == self.schema_version() => Ok(data),
            _ => Err(Error::state_migration(format!(
                "Unexpected schema version: {version}"
            ))),
        }
    }

    async fn create(&self, data: &mut ResourceData) -> Result<()> {
        let attrs: RecordSetAttributes = data.decode()?;
        let request = attrs.to_request(None)?;
        info!("creating record set {} in zone {}", attrs.name, attrs.zone_id);

        let response = self
            .api
            .record_set_create(&request)
            .await
            .map_err(|e| e.in_operation("creating", KIND, &attrs.name))?;

        let created = &response.record_set;
        let composite = id::encode(&created.zone_id, &created.id);
        data.set_id(composite.as_str());

        self.wait_for_change(&created.zone_id, &created.id, &response.change_id)
            .await
            .map_err(|e| e.in_operation("creating", KIND, &composite))?;

        self.read(data).await
    }

    async fn read(&self, data: &mut ResourceData) -> Result<()> {
        let composite = data.id().to_string();
        let (zone_id, record_set_id) = id::decode(&composite)?;
        info!("reading record set {}", composite);

        match self.api.record_set(zone_id, record_set_id).await {
            Ok(record_set) => data.merge(&RecordSetAttributes::from_response(&record_set)?),
            Err(e) if e.is_not_found() => {
                warn!("record set {} not found; removing it from state", composite);
                data.clear_id();
                Ok(())
            }
            Err(e) => Err(e.in_operation("reading", KIND, composite.as_str())),
        }
    }

    async fn update(&self, data: &mut ResourceData) -> Result<()> {
        let composite = data.id().to_string();
        let (zone_id, record_set_id) = id::decode(&composite)?;
        let attrs: RecordSetAttributes = data.decode()?;
        let mut request = attrs.to_request(Some(record_set_id))?;
        request.zone_id = zone_id.to_string();
        info!("updating record set {}", composite);

        let response = self
            .api
            .record_set_update(&request)
            .await
            .map_err(|e| e.in_operation("updating", KIND, composite.as_str()))?;

        self.wait_for_change(zone_id, record_set_id, &response.change_id)
            .await
            .map_err(|e| e.in_operation("updating", KIND, composite.as_str()))?;

        self.read(data).await
    }

    async fn delete(&self, data: &mut ResourceData) -> Result<()> {
        let composite = data.id().to_string();
        let (zone_id, record_set_id) = id::decode(&composite)?;
        info!("deleting record set {}", composite);

        match self.api.record_set_delete(zone_id, record_set_id).await {
            Ok(response) => {
                self.wait_for_change(zone_id, record_set_id, &response.change_id)
                    .await
                    .map_err(|e| e.in_operation("deleting", KIND, composite.as_str()))?;
            }
            Err(e) if e.is_not_found() => warn!("record set {} already deleted", composite),
            Err(e) => return Err(e.in_operation("deleting", KIND, composite.as_str())),
        }

        data.clear_id();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ChangeBehavior, ChangeOutcome, MemoryVinylDns};
    use crate::config::PollSettings;
    use crate::model::Zone;
    use serde_json::json;

    fn quick() -> ChangePoller {
        ChangePoller::new(PollSettings {
            delay_ms: 0,
            poll_interval_ms: 10,
            timeout_secs: 5,
            ..PollSettings::default()
        })
    }

    async fn zone(api: &MemoryVinylDns) -> String {
        api.zone_create(&Zone {
            name: "example.com.".to_string(),
            email: "admin@example.com".to_string(),
            admin_group_id: "g1".to_string(),
            ..Zone::default()
        })
        .await
        .unwrap()
        .zone
        .id
    }

    #[tokio::test(start_paused = true)]
    async fn test_cname_without_trailing_dot_never_reaches_api() {
        let api = MemoryVinylDns::new();
        let zone_id = zone(&api).await;
        let resource = RecordSetResource::new(Arc::new(api.clone()), quick());
        let mut data = ResourceData::from_value(json!({
            "name": "alias",
            "zone_id": zone_id,
            "type": "CNAME",
            "record_cname": "target.example.com",
        }))
        .unwrap();

        let err = resource.create(&mut data).await.unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(api.calls("record_set_create").await, 0);
        assert!(!data.has_id());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_change_keeps_identity() {
        let api = MemoryVinylDns::with_behavior(ChangeBehavior {
            outcome: ChangeOutcome::Fail,
            ..ChangeBehavior::default()
        });
        let zone_id = zone(&api).await;
        let resource = RecordSetResource::new(Arc::new(api), quick());
        let mut data = ResourceData::from_value(json!({
            "name": "txt",
            "zone_id": zone_id,
            "type": "TXT",
            "record_texts": ["hello"],
        }))
        .unwrap();

        let err = resource.create(&mut data).await.unwrap_err();

        assert!(err.is_change_failed());
        assert!(data.id().starts_with(&format!("{zone_id}:")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_change_times_out() {
        let api = MemoryVinylDns::with_behavior(ChangeBehavior {
            outcome: ChangeOutcome::Stall,
            ..ChangeBehavior::default()
        });
        let zone_id = zone(&api).await;
        let resource = RecordSetResource::new(Arc::new(api), quick());
        let mut data = ResourceData::from_value(json!({
            "name": "ns",
            "zone_id": zone_id,
            "type": "NS",
            "record_nsdnames": ["ns1.example.com."],
        }))
        .unwrap();

        let err = resource.create(&mut data).await.unwrap_err();

        assert!(err.is_timeout());
        assert!(!err.is_change_failed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_changes_ttl() {
        let api = MemoryVinylDns::new();
        let zone_id = zone(&api).await;
        let resource = RecordSetResource::new(Arc::new(api), quick());
        let mut data = ResourceData::from_value(json!({
            "name": "www",
            "zone_id": zone_id,
            "type": "AAAA",
            "ttl": 300,
            "record_addresses": ["[2001:db8::1]"],
        }))
        .unwrap();
        resource.create(&mut data).await.unwrap();

        data.set("ttl", 600);
        resource.update(&mut data).await.unwrap();

        assert_eq!(data.get("ttl"), Some(&json!(600)));
        assert_eq!(data.get("record_addresses"), Some(&json!(["2001:db8::1"])));
    }

    #[tokio::test]
    async fn test_malformed_identifier_is_reported() {
        let resource = RecordSetResource::new(Arc::new(MemoryVinylDns::new()), quick());
        let mut data = ResourceData::with_id("no-separator");

        let err = resource.read(&mut data).await.unwrap_err();

        assert!(matches!(err, Error::MalformedIdentifier(_)));
    }

    #[test]
    fn test_upgrade_rejects_future_versions() {
        let resource = RecordSetResource::new(Arc::new(MemoryVinylDns::new()), quick());

        assert!(matches!(
            resource.upgrade_state(7, ResourceData::default()),
            Err(Error::StateMigration(_))
        ));
    }
}
