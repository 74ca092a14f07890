//! Contract Test: Record Set Lifecycle
//!
//! Constraints verified:
//! - Create returns the composite `zone_id:record_set_id` identity
//! - Read projects the type-specific value attribute
//! - A remote "not found" clears identity on read and is success on delete
//! - Validation failures never reach the remote API

mod common;

use common::*;
use serde_json::json;
use vinyldns_core::api::{ChangeBehavior, ChangeOutcome};
use vinyldns_core::error::Error;
use vinyldns_core::{ResourceData, VinylDnsApi, id};

const RECORD_SET: &str = "vinyldns_record_set";

#[tokio::test(start_paused = true)]
async fn a_record_round_trips_through_create_and_read() {
    let (api, registry) = provider();
    let zone_id = seed_zone(&api, "example.com.").await;
    let resource = registry.resource(RECORD_SET).unwrap();

    let mut data = bag(json!({
        "name": "www",
        "zone_id": zone_id,
        "type": "A",
        "ttl": 6000,
        "record_addresses": ["10.1.1.2", "10.1.1.1"],
    }));
    resource.create(&mut data).await.unwrap();

    let (zone_part, record_set_part) = id::decode(data.id()).unwrap();
    assert_eq!(zone_part, zone_id);
    assert!(!record_set_part.is_empty());

    // Fresh bag carrying only the identity
    let mut fresh = ResourceData::with_id(data.id());
    resource.read(&mut fresh).await.unwrap();

    assert_eq!(fresh.get_str("type"), Some("A"));
    assert_eq!(fresh.get_str("name"), Some("www"));
    assert_eq!(
        fresh.get("record_addresses"),
        Some(&string_set(&["10.1.1.1", "10.1.1.2"]))
    );
}

#[tokio::test(start_paused = true)]
async fn create_survives_read_after_write_lag() {
    let (api, registry) = provider();
    api.set_behavior(ChangeBehavior {
        invisible_lookups: 3,
        pending_lookups: 2,
        outcome: ChangeOutcome::Succeed,
    })
    .await;
    let zone_id = seed_zone(&api, "lag.example.com.").await;
    let resource = registry.resource(RECORD_SET).unwrap();

    let mut data = bag(json!({
        "name": "alias",
        "zone_id": zone_id,
        "type": "CNAME",
        "record_cname": "www.example.com.",
    }));
    resource.create(&mut data).await.unwrap();

    assert_eq!(data.get_str("record_cname"), Some("www.example.com."));
    assert_eq!(api.calls("record_set_change").await, 6);
}

#[tokio::test(start_paused = true)]
async fn each_type_projects_its_own_attribute() {
    let (api, registry) = provider();
    let zone_id = seed_zone(&api, "types.example.com.").await;
    let resource = registry.resource(RECORD_SET).unwrap();

    let cases = [
        ("TXT", "record_texts", json!(["hello world"])),
        ("NS", "record_nsdnames", json!(["ns1.example.com."])),
        ("PTR", "record_ptrdnames", json!(["host.example.com."])),
        ("AAAA", "record_addresses", json!(["2001:db8::1"])),
    ];

    for (record_type, attribute, values) in cases {
        let mut data = bag(json!({
            "name": format!("rs-{}", record_type.to_lowercase()),
            "zone_id": zone_id,
            "type": record_type,
            "owner_group_id": "owners",
            attribute: values,
        }));
        resource.create(&mut data).await.unwrap();

        assert_eq!(data.get(attribute), Some(&values), "{record_type}");
        assert_eq!(data.get_str("owner_group_id"), Some("owners"), "{record_type}");
    }
}

#[tokio::test(start_paused = true)]
async fn read_clears_attributes_removed_out_of_band() {
    let (api, registry) = provider();
    let zone_id = seed_zone(&api, "drift.example.com.").await;
    let resource = registry.resource(RECORD_SET).unwrap();

    let mut data = bag(json!({
        "name": "www",
        "zone_id": zone_id,
        "type": "A",
        "ttl": 300,
        "owner_group_id": "owners",
        "record_addresses": ["10.0.0.1"],
    }));
    resource.create(&mut data).await.unwrap();
    assert_eq!(data.get_str("owner_group_id"), Some("owners"));

    // Someone drops the owner group and the TTL directly on the server
    let (zone_part, record_set_part) = id::decode(data.id()).unwrap();
    let mut stored = VinylDnsApi::record_set(&api, zone_part, record_set_part)
        .await
        .unwrap();
    stored.owner_group_id = None;
    stored.ttl = None;
    VinylDnsApi::record_set_update(&api, &stored).await.unwrap();

    resource.read(&mut data).await.unwrap();

    assert!(data.has_id());
    assert_eq!(data.get("owner_group_id"), Some(&json!(null)));
    assert_eq!(data.get("ttl"), Some(&json!(null)));
    assert_eq!(
        data.get("record_addresses"),
        Some(&string_set(&["10.0.0.1"]))
    );
}

#[tokio::test(start_paused = true)]
async fn bracketed_ipv6_is_sent_without_brackets() {
    let (api, registry) = provider();
    let zone_id = seed_zone(&api, "v6.example.com.").await;
    let resource = registry.resource(RECORD_SET).unwrap();

    let mut data = bag(json!({
        "name": "v6",
        "zone_id": zone_id,
        "type": "AAAA",
        "record_addresses": ["[2001:db8::1]"],
    }));
    resource.create(&mut data).await.unwrap();

    let (zone_part, record_set_part) = id::decode(data.id()).unwrap();
    let stored = VinylDnsApi::record_set(&api, zone_part, record_set_part)
        .await
        .unwrap();
    assert_eq!(stored.records[0].address.as_deref(), Some("2001:db8::1"));
}

#[tokio::test(start_paused = true)]
async fn read_of_vanished_record_set_clears_identity() {
    let (api, registry) = provider();
    let zone_id = seed_zone(&api, "gone.example.com.").await;
    let resource = registry.resource(RECORD_SET).unwrap();
    let mut data = bag(json!({
        "name": "www",
        "zone_id": zone_id,
        "type": "A",
        "record_addresses": ["10.0.0.1"],
    }));
    resource.create(&mut data).await.unwrap();
    let (zone_part, record_set_part) = id::decode(data.id()).unwrap();
    api.forget_record_set(zone_part, record_set_part).await;

    resource.read(&mut data).await.unwrap();

    assert!(!data.has_id());
}

#[tokio::test(start_paused = true)]
async fn delete_of_absent_record_set_succeeds() {
    let (api, registry) = provider();
    let zone_id = seed_zone(&api, "absent.example.com.").await;
    let resource = registry.resource(RECORD_SET).unwrap();
    let mut data = ResourceData::with_id(id::encode(&zone_id, "never-existed"));

    resource.delete(&mut data).await.unwrap();

    assert!(!data.has_id());
    assert_eq!(api.calls("record_set_change").await, 0);
}

#[tokio::test(start_paused = true)]
async fn delete_waits_for_the_change() {
    let (api, registry) = provider();
    let zone_id = seed_zone(&api, "delete.example.com.").await;
    let resource = registry.resource(RECORD_SET).unwrap();
    let mut data = bag(json!({
        "name": "www",
        "zone_id": zone_id,
        "type": "A",
        "record_addresses": ["10.0.0.1"],
    }));
    resource.create(&mut data).await.unwrap();
    let before = api.calls("record_set_change").await;

    resource.delete(&mut data).await.unwrap();

    assert!(!data.has_id());
    assert_eq!(api.calls("record_set_change").await - before, 2);
}

#[tokio::test(start_paused = true)]
async fn remote_errors_are_wrapped_with_context() {
    let (api, registry) = provider();
    let resource = registry.resource(RECORD_SET).unwrap();
    api.inject_failure("record_set", 503).await;
    let mut data = ResourceData::with_id("z1:r1");

    let err = resource.read(&mut data).await.unwrap_err();

    assert!(matches!(
        err.root(),
        Error::Remote {
            status: Some(503),
            ..
        }
    ));
    assert!(err.to_string().contains("error reading recordset (z1:r1)"));
    assert!(data.has_id());
}

#[tokio::test(start_paused = true)]
async fn invalid_payloads_never_reach_the_api() {
    let (api, registry) = provider();
    let zone_id = seed_zone(&api, "invalid.example.com.").await;
    let resource = registry.resource(RECORD_SET).unwrap();

    let invalid = [
        json!({ "name": "a", "zone_id": zone_id, "type": "CNAME", "record_cname": "relative" }),
        json!({ "name": "b", "zone_id": zone_id, "type": "PTR", "record_ptrdnames": ["relative"] }),
        json!({ "name": "c", "zone_id": zone_id, "type": "SOA" }),
    ];

    for attributes in invalid {
        let mut data = bag(attributes);
        let err = resource.create(&mut data).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "{err}");
    }
    assert_eq!(api.calls("record_set_create").await, 0);
}

#[tokio::test]
async fn version_zero_state_is_upgraded() {
    let (_api, registry) = provider();
    let resource = registry.resource(RECORD_SET).unwrap();
    let mut v0 = bag(json!({ "zone_id": "z1", "type": "TXT", "record_text": "hi" }));
    v0.set_id("r1");

    let upgraded = resource.upgrade_state(0, v0).unwrap();

    assert_eq!(upgraded.id(), "z1:r1");
    assert_eq!(upgraded.get("record_texts"), Some(&json!(["hi"])));
}
