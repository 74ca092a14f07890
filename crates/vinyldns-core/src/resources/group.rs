use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::Result;
use crate::mapper::GroupAttributes;
use crate::resource_data::ResourceData;
use crate::traits::{Resource, VinylDnsApi};

const KIND: &str = "group";

/// `vinyldns_group`: group changes are applied synchronously, nothing to poll
#[derive(Clone)]
pub struct GroupResource {
    api: Arc<dyn VinylDnsApi>,
}

impl GroupResource {
    pub fn new(api: Arc<dyn VinylDnsApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Resource for GroupResource {
    fn type_name(&self) -> &'static str {
        super::GROUP
    }

    async fn create(&self, data: &mut ResourceData) -> Result<()> {
        let attrs: GroupAttributes = data.decode()?;
        info!("creating group {}", attrs.name);

        let created = self
            .api
            .group_create(&attrs.to_request(None))
            .await
            .map_err(|e| e.in_operation("creating", KIND, &attrs.name))?;

        data.set_id(created.id);
        self.read(data).await
    }

    async fn read(&self, data: &mut ResourceData) -> Result<()> {
        let id = data.id().to_string();
        info!("reading group {}", id);

        match self.api.group(&id).await {
            Ok(group) => data.merge(&GroupAttributes::from_response(&group)),
            Err(e) if e.is_not_found() => {
                warn!("group {} not found; removing it from state", id);
                data.clear_id();
                Ok(())
            }
            Err(e) => Err(e.in_operation("reading", KIND, id)),
        }
    }

    async fn update(&self, data: &mut ResourceData) -> Result<()> {
        let id = data.id().to_string();
        let attrs: GroupAttributes = data.decode()?;
        info!("updating group {}", id);

        self.api
            .group_update(&id, &attrs.to_request(Some(&id)))
            .await
            .map_err(|e| e.in_operation("updating", KIND, &id))?;

        self.read(data).await
    }

    async fn delete(&self, data: &mut ResourceData) -> Result<()> {
        let id = data.id().to_string();
        info!("deleting group {}", id);

        match self.api.group_delete(&id).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => warn!("group {} already deleted", id),
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
    use serde_json::json;

    fn bag() -> ResourceData {
        ResourceData::from_value(json!({
            "name": "ops",
            "email": "ops@example.com",
            "member_ids": ["u1"],
            "admin_ids": ["u1"],
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_fills_default_description() {
        let resource = GroupResource::new(Arc::new(MemoryVinylDns::new()));
        let mut data = bag();

        resource.create(&mut data).await.unwrap();

        assert!(data.has_id());
        assert_eq!(data.get_str("description"), Some("Managed by Terraform"));
    }

    #[tokio::test]
    async fn test_update_changes_email() {
        let resource = GroupResource::new(Arc::new(MemoryVinylDns::new()));
        let mut data = bag();
        resource.create(&mut data).await.unwrap();

        data.set("email", "team@example.com");
        resource.update(&mut data).await.unwrap();

        assert_eq!(data.get_str("email"), Some("team@example.com"));
    }

    #[tokio::test]
    async fn test_remote_error_carries_context() {
        let api = MemoryVinylDns::new();
        api.inject_failure("group", 500).await;
        let resource = GroupResource::new(Arc::new(api));
        let mut data = ResourceData::with_id("g1");

        let err = resource.read(&mut data).await.unwrap_err();

        assert!(err.to_string().starts_with("error reading group (g1)"));
        assert!(data.has_id());
    }
}
