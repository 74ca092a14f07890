use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::Result;
use crate::mapper::ZoneAttributes;
use crate::model::status;
use crate::poller::{Awaited, ChangePoller, presence};
use crate::resource_data::ResourceData;
use crate::traits::{Resource, VinylDnsApi};

const KIND: &str = "zone";

/// `vinyldns_zone`
///
/// Create and delete wait for the zone to appear or disappear; update waits
/// for the change it submitted to become `Synced`.
#[derive(Clone)]
pub struct ZoneResource {
    api: Arc<dyn VinylDnsApi>,
    poller: ChangePoller,
}

impl ZoneResource {
    pub fn new(api: Arc<dyn VinylDnsApi>, poller: ChangePoller) -> Self {
        Self { api, poller }
    }

    async fn wait_for_presence(&self, zone_id: &str, wanted: bool) -> Result<String> {
        let awaited = if wanted {
            Awaited::zone_created(zone_id)
        } else {
            Awaited::zone_deleted(zone_id)
        };
        let api = &self.api;
        let target = awaited.target.as_str();

        self.poller
            .wait(&awaited, move || async move {
                api.zone_exists(zone_id)
                    .await
                    .map(|exists| presence(exists, wanted, target))
            })
            .await
    }
}

#[async_trait]
impl Resource for ZoneResource {
    fn type_name(&self) -> &'static str {
        super::ZONE
    }

    async fn create(&self, data: &mut ResourceData) -> Result<()> {
        let attrs: ZoneAttributes = data.decode()?;
        let request = attrs.to_request(None)?;
        info!("creating zone {}", attrs.name);

        let change = self
            .api
            .zone_create(&request)
            .await
            .map_err(|e| e.in_operation("creating", KIND, &attrs.name))?;

        let zone_id = change.zone.id;
        data.set_id(zone_id.as_str());

        self.wait_for_presence(&zone_id, true)
            .await
            .map_err(|e| e.in_operation("creating", KIND, &zone_id))?;

        self.read(data).await
    }

    async fn read(&self, data: &mut ResourceData) -> Result<()> {
        let id = data.id().to_string();
        info!("reading zone {}", id);

        match self.api.zone(&id).await {
            Ok(zone) => data.merge(&ZoneAttributes::from_response(&zone)),
            Err(e) if e.is_not_found() => {
                warn!("zone {} not found; removing it from state", id);
                data.clear_id();
                Ok(())
            }
            Err(e) => Err(e.in_operation("reading", KIND, id)),
        }
    }

    async fn update(&self, data: &mut ResourceData) -> Result<()> {
        let id = data.id().to_string();
        let attrs: ZoneAttributes = data.decode()?;
        let request = attrs.to_request(Some(&id))?;
        info!("updating zone {}", id);

        let change = self
            .api
            .zone_update(&id, &request)
            .await
            .map_err(|e| e.in_operation("updating", KIND, &id))?;

        let awaited = Awaited::zone_change(&id, &change.id);
        let api = &self.api;
        let (zone_id, change_id) = (id.as_str(), change.id.as_str());
        self.poller
            .wait(&awaited, move || async move {
                api.zone_change(zone_id, change_id).await.map(|c| c.status)
            })
            .await
            .map_err(|e| e.in_operation("updating", KIND, &id))?;

        self.read(data).await
    }

    async fn delete(&self, data: &mut ResourceData) -> Result<()> {
        let id = data.id().to_string();
        info!("deleting zone {}", id);

        match self.api.zone_delete(&id).await {
            Ok(_) => {
                self.wait_for_presence(&id, false)
                    .await
                    .map_err(|e| e.in_operation("deleting", KIND, &id))?;
            }
            Err(e) if e.is_not_found() => warn!("zone {} already deleted", id),
            Err(e) => return Err(e.in_operation("deleting", KIND, id)),
        }

        data.clear_id();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryVinylDns;
    use crate::config::PollSettings;
    use serde_json::json;

    fn quick() -> ChangePoller {
        ChangePoller::new(PollSettings {
            delay_ms: 0,
            poll_interval_ms: 10,
            ..PollSettings::default()
        })
    }

    fn bag() -> ResourceData {
        ResourceData::from_value(json!({
            "name": "example.com.",
            "email": "admin@example.com",
            "admin_group_id": "g1",
            "acl_rule": [{ "access_level": "Read", "group_id": "g2", "record_types": ["A"] }],
        }))
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_populates_computed_attributes() {
        let resource = ZoneResource::new(Arc::new(MemoryVinylDns::new()), quick());
        let mut data = bag();

        resource.create(&mut data).await.unwrap();

        assert!(data.has_id());
        assert_eq!(data.get_str("status"), Some("Active"));
        assert!(data.get_str("created").is_some());
        assert_eq!(
            data.get("acl_rule").unwrap()[0]["description"],
            json!("Managed by Terraform")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_polls_the_submitted_change() {
        let api = MemoryVinylDns::new();
        let resource = ZoneResource::new(Arc::new(api.clone()), quick());
        let mut data = bag();
        resource.create(&mut data).await.unwrap();

        data.set("email", "dns@example.com");
        resource.update(&mut data).await.unwrap();

        assert_eq!(data.get_str("email"), Some("dns@example.com"));
        // one Pending lookup, then Synced
        assert_eq!(api.calls("zone_change").await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_waits_until_gone() {
        let api = MemoryVinylDns::new();
        let resource = ZoneResource::new(Arc::new(api.clone()), quick());
        let mut data = bag();
        resource.create(&mut data).await.unwrap();
        let zone_id = data.id().to_string();

        resource.delete(&mut data).await.unwrap();

        assert!(!data.has_id());
        assert!(!api.zone_exists(&zone_id).await.unwrap());
    }
}
