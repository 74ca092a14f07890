// # VinylDNS Real Environment Validation Tool
//
// Creates a throwaway group, zone and record set against a real VinylDNS
// deployment (for example the docker quickstart), then deletes them again.
//
// ## Usage
//
// ```bash
// VINYLDNS_ACCESS_KEY=okAccessKey \
// VINYLDNS_SECRET_KEY=okSecretKey \
// VINYLDNS_HOST=http://localhost:9000 \
// VINYLDNS_ZONE=ok. \
// cargo run -p vinyldns-demos --bin live_validation
// ```
//
// ## Environment Variables
//
// Required:
// - `VINYLDNS_ACCESS_KEY`, `VINYLDNS_SECRET_KEY`, `VINYLDNS_HOST`
//
// Optional:
// - `VINYLDNS_ZONE`: Zone to create (default: "ok."; must be served by the
//   DNS backend VinylDNS is connected to)

use serde_json::json;
use std::env;
use std::sync::Arc;
use vinyldns_client::VinylDnsClient;
use vinyldns_core::provider::build_registry;
use vinyldns_core::{ProviderConfig, ResourceData};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("=== VinylDNS Real Environment Validation ===");

    let config = ProviderConfig::new(
        env::var("VINYLDNS_ACCESS_KEY").unwrap_or_default(),
        env::var("VINYLDNS_SECRET_KEY").unwrap_or_default(),
        env::var("VINYLDNS_HOST").ok(),
    );
    let zone_name = env::var("VINYLDNS_ZONE").unwrap_or_else(|_| "ok.".to_string());

    let client = VinylDnsClient::from_config(&config)?;
    tracing::info!("Target: {}", client.base_url());
    let registry = build_registry(Arc::new(client), config.poll.clone());

    let groups = registry.resource("vinyldns_group")?;
    let zones = registry.resource("vinyldns_zone")?;
    let record_sets = registry.resource("vinyldns_record_set")?;

    let mut group = ResourceData::from_value(json!({
        "name": "live-validation",
        "email": "live-validation@example.com",
        "member_ids": ["ok"],
        "admin_ids": ["ok"],
    }))?;
    groups.create(&mut group).await?;
    tracing::info!("Created group {}", group.id());

    let mut zone = ResourceData::from_value(json!({
        "name": zone_name,
        "email": "live-validation@example.com",
        "admin_group_id": group.id(),
    }))?;
    zones.create(&mut zone).await?;
    tracing::info!("Created zone {}", zone.id());

    let mut record_set = ResourceData::from_value(json!({
        "name": "live-validation",
        "zone_id": zone.id(),
        "type": "TXT",
        "ttl": 60,
        "record_texts": ["created by live_validation"],
    }))?;
    record_sets.create(&mut record_set).await?;
    tracing::info!("Created record set {}", record_set.id());

    record_sets.delete(&mut record_set).await?;
    zones.delete(&mut zone).await?;
    groups.delete(&mut group).await?;

    tracing::info!("=== Validation passed ===");
    Ok(())
}
