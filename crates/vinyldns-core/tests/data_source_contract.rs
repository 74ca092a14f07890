//! Contract Test: Data Sources
//!
//! Constraints verified:
//! - Lookups fill in identity and computed attributes
//! - A missing remote object is an error, not an empty result
//! - Missing lookup keys are rejected before any remote call

mod common;

use common::*;
use serde_json::json;
use vinyldns_core::error::Error;

#[tokio::test]
async fn zone_by_name() {
    let (api, registry) = provider();
    let zone_id = seed_zone(&api, "lookup.example.com.").await;
    let source = registry.data_source("vinyldns_zone").unwrap();

    let mut data = bag(json!({ "name": "lookup.example.com." }));
    source.read(&mut data).await.unwrap();

    assert_eq!(data.id(), zone_id);
    assert_eq!(data.get_str("admin_group_id"), Some("admins"));
    assert_eq!(data.get_str("email"), Some("admin@example.com"));
}

#[tokio::test]
async fn group_by_id() {
    let (api, registry) = provider();
    let group_id = seed_group(&api, "lookup").await;
    let source = registry.data_source("vinyldns_group").unwrap();

    let mut data = bag(json!({ "id": group_id }));
    source.read(&mut data).await.unwrap();

    assert_eq!(data.get_str("name"), Some("lookup"));
    assert_eq!(data.get_str("email"), Some("lookup@example.com"));
}

#[tokio::test]
async fn missing_zone_is_an_error() {
    let (_api, registry) = provider();
    let source = registry.data_source("vinyldns_zone").unwrap();

    let mut data = bag(json!({ "name": "nowhere." }));
    let err = source.read(&mut data).await.unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn lookup_keys_are_required() {
    let (api, registry) = provider();
    let source = registry.data_source("vinyldns_group").unwrap();

    let mut data = bag(json!({ "id": "" }));
    let err = source.read(&mut data).await.unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(api.calls("group").await, 0);
}
