//! Test doubles and common utilities for contract tests

#![allow(dead_code)]

use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use vinyldns_core::api::MemoryVinylDns;
use vinyldns_core::config::PollSettings;
use vinyldns_core::error::{Error, Result};
use vinyldns_core::model::{Group, Zone};
use vinyldns_core::provider::build_registry;
use vinyldns_core::{ProviderRegistry, ResourceData, VinylDnsApi};

/// One answer of a scripted status lookup
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Status(&'static str),
    NotFound,
    Fails(u16),
}

/// A status-fetch collaborator that replays a fixed script
///
/// Once the script is exhausted every further lookup answers `then`.
pub struct ScriptedChange {
    replies: Mutex<VecDeque<Reply>>,
    then: Reply,
    /// Call counter for fetch()
    calls: Arc<AtomicUsize>,
}

impl ScriptedChange {
    pub fn new(replies: Vec<Reply>, then: Reply) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            then,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// `n` times `Pending`, then `then`
    pub fn pending_then(n: usize, then: &'static str) -> Self {
        Self::new(vec![Reply::Status("Pending"); n], Reply::Status(then))
    }

    /// Get the number of times fetch() was called
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn fetch(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.then);

        match reply {
            Reply::Status(status) => Ok(status.to_string()),
            Reply::NotFound => Err(Error::not_found("change not visible yet")),
            Reply::Fails(code) => Err(Error::remote(Some(code), "scripted failure")),
        }
    }
}

/// Poll settings with no initial delay and a 10 ms cadence
pub fn quick_poll() -> PollSettings {
    PollSettings {
        timeout_secs: 30,
        delay_ms: 0,
        min_interval_ms: 10,
        poll_interval_ms: 10,
    }
}

/// Memory API plus a registry wired to it
pub fn provider() -> (MemoryVinylDns, ProviderRegistry) {
    let api = MemoryVinylDns::new();
    let registry = build_registry(Arc::new(api.clone()), quick_poll());
    (api, registry)
}

/// Create a zone directly through the API and return its id
pub async fn seed_zone(api: &MemoryVinylDns, name: &str) -> String {
    api.zone_create(&Zone {
        name: name.to_string(),
        email: "admin@example.com".to_string(),
        admin_group_id: "admins".to_string(),
        ..Zone::default()
    })
    .await
    .unwrap()
    .zone
    .id
}

/// Create a group directly through the API and return its id
pub async fn seed_group(api: &MemoryVinylDns, name: &str) -> String {
    api.group_create(&Group {
        name: name.to_string(),
        email: format!("{name}@example.com"),
        ..Group::default()
    })
    .await
    .unwrap()
    .id
}

pub fn bag(attributes: Value) -> ResourceData {
    ResourceData::from_value(attributes).unwrap()
}

pub fn string_set(values: &[&str]) -> Value {
    let mut sorted: Vec<&str> = values.to_vec();
    sorted.sort();
    json!(sorted)
}
