//! Configuration types for the VinylDNS provider
//!
//! Credentials and host are normally supplied through environment variables
//! by the provider binary; poll timing has defaults matching the behavior
//! users expect from the provider (30 minute ceiling, half-second cadence).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Provider configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// VinylDNS access key
    pub access_key: String,

    /// VinylDNS secret key
    /// ⚠️ NEVER log this value
    pub secret_key: String,

    /// API base URL (e.g. "https://vinyldns.example.com:9000")
    #[serde(default)]
    pub host: Option<String>,

    /// Value of the `User-Agent` header on every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Change polling settings
    #[serde(default)]
    pub poll: PollSettings,
}

/// Product token sent as the user agent
pub const USER_AGENT_PRODUCT: &str = "terraform-provider-vinyldns";

/// `terraform-provider-vinyldns/<version>`, or the bare product token when
/// no version is known
pub fn user_agent(version: &str) -> String {
    if version.is_empty() {
        USER_AGENT_PRODUCT.to_string()
    } else {
        format!("{USER_AGENT_PRODUCT}/{version}")
    }
}

fn default_user_agent() -> String {
    user_agent(env!("CARGO_PKG_VERSION"))
}

// Custom Debug implementation that hides the secret key
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<REDACTED>")
            .field("host", &self.host)
            .field("user_agent", &self.user_agent)
            .field("poll", &self.poll)
            .finish()
    }
}

impl ProviderConfig {
    /// Create a configuration with default poll settings
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        host: Option<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            host,
            user_agent: default_user_agent(),
            poll: PollSettings::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.access_key.is_empty() {
            return Err(crate::Error::config("access_key is required"));
        }
        if self.secret_key.is_empty() {
            return Err(crate::Error::config("secret_key is required"));
        }
        if let Some(host) = &self.host
            && !host.starts_with("http://")
            && !host.starts_with("https://")
        {
            return Err(crate::Error::config(format!(
                "host must use HTTP or HTTPS scheme. Got: {host}"
            )));
        }

        self.poll.validate()
    }
}

/// Timing of the change poller
///
/// `poll_interval` is the operative cadence. When it is zero the poller
/// backs off exponentially instead, starting at `min_interval`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollSettings {
    /// Overall deadline for one change to reach a terminal state (in seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Delay before the first status query (in milliseconds)
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Starting wait between queries when backing off (in milliseconds)
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,

    /// Fixed wait between queries (in milliseconds); 0 selects backoff
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl PollSettings {
    /// Overall deadline
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Initial delay
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Backoff starting point
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// Poll cadence
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.timeout_secs == 0 {
            return Err(crate::Error::config("poll timeout must be > 0"));
        }
        if self.poll_interval_ms == 0 && self.min_interval_ms == 0 {
            return Err(crate::Error::config(
                "either poll_interval_ms or min_interval_ms must be > 0",
            ));
        }
        Ok(())
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            delay_ms: default_delay_ms(),
            min_interval_ms: default_min_interval_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30 * 60
}

fn default_delay_ms() -> u64 {
    500
}

fn default_min_interval_ms() -> u64 {
    15_000
}

fn default_poll_interval_ms() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_defaults() {
        let poll = PollSettings::default();
        assert_eq!(poll.timeout(), Duration::from_secs(1800));
        assert_eq!(poll.delay(), Duration::from_millis(500));
        assert_eq!(poll.min_interval(), Duration::from_secs(15));
        assert_eq!(poll.poll_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_poll_settings_deserialize() {
        let poll: PollSettings = serde_json::from_str(r#"{"timeout_secs": 60}"#).unwrap();
        assert_eq!(poll.timeout_secs, 60);
        assert_eq!(poll.poll_interval_ms, 500);
    }

    #[test]
    fn test_validate() {
        let config = ProviderConfig::new("ak", "sk", Some("http://localhost:9000".to_string()));
        assert!(config.validate().is_ok());

        let missing_key = ProviderConfig::new("", "sk", None);
        assert!(missing_key.validate().is_err());

        let bad_host = ProviderConfig::new("ak", "sk", Some("localhost:9000".to_string()));
        assert!(bad_host.validate().is_err());

        let mut no_cadence = ProviderConfig::new("ak", "sk", None);
        no_cadence.poll.poll_interval_ms = 0;
        no_cadence.poll.min_interval_ms = 0;
        assert!(no_cadence.validate().is_err());
    }

    #[test]
    fn test_user_agent() {
        assert_eq!(user_agent(""), "terraform-provider-vinyldns");
        assert_eq!(user_agent("1.2.3"), "terraform-provider-vinyldns/1.2.3");

        let config = ProviderConfig::new("ak", "sk", None);
        assert!(config.user_agent.starts_with("terraform-provider-vinyldns/"));
    }

    #[test]
    fn test_secret_not_exposed_in_debug() {
        let config = ProviderConfig::new("ak", "super-secret-value", None);
        let debug_str = format!("{:?}", config);
        assert!(!debug_str.contains("super-secret-value"));
        assert!(debug_str.contains("ProviderConfig"));
    }
}
