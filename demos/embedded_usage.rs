//! Minimal embedding example for vinyldns-core
//!
//! Drives a group, a zone and a record set through their full lifecycle
//! against the in-memory API, the same way the declarative-resource
//! framework would.

use serde_json::json;
use std::sync::Arc;
use vinyldns_core::api::{ChangeBehavior, ChangeOutcome, MemoryVinylDns};
use vinyldns_core::provider::build_registry;
use vinyldns_core::{PollSettings, ResourceData, Result};

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Embedded vinyldns-core Example ===\n");

    // Changes stay invisible for one lookup and Pending for two more
    let api = MemoryVinylDns::with_behavior(ChangeBehavior {
        invisible_lookups: 1,
        pending_lookups: 2,
        outcome: ChangeOutcome::Succeed,
    });
    let poll = PollSettings {
        delay_ms: 50,
        poll_interval_ms: 50,
        ..PollSettings::default()
    };
    let registry = build_registry(Arc::new(api.clone()), poll);

    let groups = registry.resource("vinyldns_group")?;
    let zones = registry.resource("vinyldns_zone")?;
    let record_sets = registry.resource("vinyldns_record_set")?;

    let mut group = ResourceData::from_value(json!({
        "name": "ops",
        "email": "ops@example.com",
        "member_ids": ["u1"],
        "admin_ids": ["u1"],
    }))?;
    groups.create(&mut group).await?;
    println!("group     {} -> {}", group.id(), serde_json::to_string(&group.attributes)?);

    let mut zone = ResourceData::from_value(json!({
        "name": "example.com.",
        "email": "dns@example.com",
        "admin_group_id": group.id(),
    }))?;
    zones.create(&mut zone).await?;
    println!("zone      {} -> status {:?}", zone.id(), zone.get_str("status"));

    let mut www = ResourceData::from_value(json!({
        "name": "www",
        "zone_id": zone.id(),
        "type": "A",
        "ttl": 300,
        "record_addresses": ["192.0.2.10", "192.0.2.11"],
    }))?;
    record_sets.create(&mut www).await?;
    println!("recordset {} -> {}", www.id(), serde_json::to_string(&www.attributes)?);

    www.set("record_addresses", json!(["192.0.2.12"]));
    record_sets.update(&mut www).await?;
    println!("updated   {} -> {:?}", www.id(), www.get("record_addresses"));

    record_sets.delete(&mut www).await?;
    zones.delete(&mut zone).await?;
    groups.delete(&mut group).await?;

    println!(
        "\nchange lookups: {} record set, {} zone existence",
        api.calls("record_set_change").await,
        api.calls("zone_exists").await
    );
    println!("=== Done ===");

    Ok(())
}
