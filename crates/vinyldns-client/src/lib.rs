// # VinylDNS HTTP Client
//
// Implementation of `VinylDnsApi` over the VinylDNS REST API.
//
// ## Implementation Status
//
// - ✅ One HTTP request per trait call (zone change lookup scans one history page)
// - ✅ AWS Signature V4 on every request (service "VinylDNS")
// - ✅ HTTP timeout configured (30 seconds)
// - ✅ 404 mapped to `Error::NotFound`, every other failure to `Error::Remote`
// - ❌ NO retry logic (the change poller owns waiting, everything else fails fast)
// - ❌ NO caching (state lives in VinylDNS and in the caller's attribute bag)
// - ❌ NO background tasks
//
// ## Security Requirements
//
// - The secret key and request signatures NEVER appear in logs
// - The client refuses to build without both keys and a host
//
// ## API Reference
//
// - Groups: `POST /groups`, `GET|PUT|DELETE /groups/{id}`
// - Zones: `POST /zones`, `GET|PUT|DELETE /zones/{id}`, `GET /zones/name/{name}`,
//   `GET /zones/{id}/changes`
// - Record sets: `POST /zones/{z}/recordsets`, `GET|PUT|DELETE /zones/{z}/recordsets/{r}`,
//   `GET /zones/{z}/recordsets/{r}/changes/{c}`

pub mod signing;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use vinyldns_core::config::ProviderConfig;
use vinyldns_core::model::{
    Group, RecordSet, RecordSetChange, RecordSetResponse, RecordSetUpdateResponse, Zone,
    ZoneChange, ZoneChanges, ZoneResponse,
};
use vinyldns_core::{Error, Result, VinylDnsApi};

use signing::SignableRequest;

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// VinylDNS API client
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the secret key.
#[derive(Clone)]
pub struct VinylDnsClient {
    /// API base URL without trailing slash
    base_url: String,

    access_key: String,

    /// ⚠️ NEVER log this value
    secret_key: String,

    user_agent: String,

    client: reqwest::Client,
}

// Custom Debug implementation that hides the secret key
impl std::fmt::Debug for VinylDnsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VinylDnsClient")
            .field("base_url", &self.base_url)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<REDACTED>")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl VinylDnsClient {
    /// Create a client
    ///
    /// # Parameters
    ///
    /// - `host`: API base URL, e.g. "http://localhost:9000"
    /// - `access_key`, `secret_key`: VinylDNS credentials
    /// - `user_agent`: Value of the `User-Agent` header
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for empty credentials or a host that is
    /// not an HTTP(S) URL, and [`Error::Http`] if the HTTP client cannot be
    /// built.
    pub fn new(
        host: &str,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Result<Self> {
        let access_key = access_key.into();
        let secret_key = secret_key.into();

        if access_key.is_empty() || secret_key.is_empty() {
            return Err(Error::config("VinylDNS access key and secret key are required"));
        }

        let parsed = Url::parse(host)
            .map_err(|e| Error::config(format!("invalid VinylDNS host {host:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "host must use HTTP or HTTPS scheme. Got: {host}"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: host.trim_end_matches('/').to_string(),
            access_key,
            secret_key,
            user_agent: user_agent.into(),
            client,
        })
    }

    /// Create a client from provider configuration
    ///
    /// # Errors
    ///
    /// Fails when the configuration is invalid or has no host.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        config.validate()?;
        let host = config
            .host
            .as_deref()
            .ok_or_else(|| Error::config("VinylDNS host is required"))?;

        Self::new(
            host,
            config.access_key.as_str(),
            config.secret_key.as_str(),
            config.user_agent.as_str(),
        )
    }

    /// API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::GET, path, None).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::DELETE, path, None).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.send(Method::POST, path, Some(serde_json::to_vec(body)?))
            .await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.send(Method::PUT, path, Some(serde_json::to_vec(body)?))
            .await
    }

    /// Sign and send one request, mapping the response status to an error
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<T> {
        let url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| Error::http(format!("invalid request URL for {path}: {e}")))?;
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => return Err(Error::config(format!("host missing in {}", self.base_url))),
        };
        let payload = body.unwrap_or_default();

        let signature = signing::sign(
            &SignableRequest {
                method: method.as_str(),
                path: url.path(),
                query: url.query().unwrap_or_default(),
                host: &host,
                payload: &payload,
            },
            &self.access_key,
            &self.secret_key,
            Utc::now(),
        );

        debug!("VinylDNS API request: {} {}", method, url.path());

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header("User-Agent", &self.user_agent)
            .header("X-Amz-Date", &signature.amz_date)
            .header("Authorization", &signature.authorization);
        if !payload.is_empty() {
            request = request
                .header("Content-Type", "application/json")
                .body(payload);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::http(format!("{method} {path} failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::http(format!("failed to read response of {method} {path}: {e}")))?;

        debug!("VinylDNS API response: {} {} -> {}", method, url.path(), status);

        match status.as_u16() {
            200..=299 => Ok(serde_json::from_str(&text)?),
            404 => Err(Error::not_found(if text.is_empty() {
                format!("{method} {path}")
            } else {
                text
            })),
            code => Err(Error::remote(Some(code), text)),
        }
    }
}

#[async_trait]
impl VinylDnsApi for VinylDnsClient {
    async fn group_create(&self, group: &Group) -> Result<Group> {
        self.post("/groups", group).await
    }

    async fn group(&self, group_id: &str) -> Result<Group> {
        self.get(&format!("/groups/{group_id}")).await
    }

    async fn group_update(&self, group_id: &str, group: &Group) -> Result<Group> {
        self.put(&format!("/groups/{group_id}"), group).await
    }

    async fn group_delete(&self, group_id: &str) -> Result<Group> {
        self.delete(&format!("/groups/{group_id}")).await
    }

    async fn zone_create(&self, zone: &Zone) -> Result<ZoneChange> {
        self.post("/zones", zone).await
    }

    async fn zone(&self, zone_id: &str) -> Result<Zone> {
        let response: ZoneResponse = self.get(&format!("/zones/{zone_id}")).await?;
        Ok(response.zone)
    }

    async fn zone_by_name(&self, name: &str) -> Result<Zone> {
        let response: ZoneResponse = self.get(&format!("/zones/name/{name}")).await?;
        Ok(response.zone)
    }

    async fn zone_exists(&self, zone_id: &str) -> Result<bool> {
        match self.zone(zone_id).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn zone_update(&self, zone_id: &str, zone: &Zone) -> Result<ZoneChange> {
        self.put(&format!("/zones/{zone_id}"), zone).await
    }

    async fn zone_delete(&self, zone_id: &str) -> Result<ZoneChange> {
        self.delete(&format!("/zones/{zone_id}")).await
    }

    async fn zone_change(&self, zone_id: &str, change_id: &str) -> Result<ZoneChange> {
        let history: ZoneChanges = self.get(&format!("/zones/{zone_id}/changes")).await?;

        history
            .zone_changes
            .into_iter()
            .find(|change| change.id == change_id)
            .ok_or_else(|| Error::not_found(format!("zone change {change_id} in zone {zone_id}")))
    }

    async fn record_set_create(&self, record_set: &RecordSet) -> Result<RecordSetUpdateResponse> {
        self.post(&format!("/zones/{}/recordsets", record_set.zone_id), record_set)
            .await
    }

    async fn record_set(&self, zone_id: &str, record_set_id: &str) -> Result<RecordSet> {
        let response: RecordSetResponse = self
            .get(&format!("/zones/{zone_id}/recordsets/{record_set_id}"))
            .await?;
        Ok(response.record_set)
    }

    async fn record_set_update(&self, record_set: &RecordSet) -> Result<RecordSetUpdateResponse> {
        self.put(
            &format!("/zones/{}/recordsets/{}", record_set.zone_id, record_set.id),
            record_set,
        )
        .await
    }

    async fn record_set_delete(
        &self,
        zone_id: &str,
        record_set_id: &str,
    ) -> Result<RecordSetUpdateResponse> {
        self.delete(&format!("/zones/{zone_id}/recordsets/{record_set_id}"))
            .await
    }

    async fn record_set_change(
        &self,
        zone_id: &str,
        record_set_id: &str,
        change_id: &str,
    ) -> Result<RecordSetChange> {
        self.get(&format!(
            "/zones/{zone_id}/recordsets/{record_set_id}/changes/{change_id}"
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_missing_credentials() {
        let err = VinylDnsClient::new("http://localhost:9000", "", "sk", "ua").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rejects_non_http_host() {
        assert!(VinylDnsClient::new("ftp://localhost", "ak", "sk", "ua").is_err());
        assert!(VinylDnsClient::new("localhost:9000", "ak", "sk", "ua").is_err());
    }

    #[test]
    fn test_from_config_requires_host() {
        let config = ProviderConfig::new("ak", "sk", None);
        assert!(matches!(VinylDnsClient::from_config(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = VinylDnsClient::new("http://localhost:9000/", "ak", "sk", "ua").unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000");
    }

    #[test]
    fn test_secret_not_exposed_in_debug() {
        let client =
            VinylDnsClient::new("http://localhost:9000", "ak", "super-secret-value", "ua").unwrap();
        let debug_str = format!("{:?}", client);
        assert!(!debug_str.contains("super-secret-value"));
        assert!(debug_str.contains("<REDACTED>"));
    }
}
