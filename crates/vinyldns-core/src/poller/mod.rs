//! Change poller
//!
//! The remote API accepts zone and record set mutations onto a backend
//! queue and answers with a change token. The poller turns that token into
//! a terminal result by querying the change status until it reaches the
//! target, reports the failure sentinel, or the deadline passes.
//!
//! ## State Machine
//!
//! ```text
//!                 fetch() == target
//!   ┌─────────┐ ───────────────────▶ ┌──────────┐
//!   │ Pending │                      │ <Target> │
//!   └─────────┘ ───────────┐         └──────────┘
//!     ▲     │               │ fetch() == failure
//!     │     │ other status  ▼
//!     └─────┘ or NotFound  ┌────────┐
//!                          │ Failed │
//!                          └────────┘
//! ```
//!
//! Any fetch error other than "not found" is fatal and returned as is.
//! Running past the deadline yields [`Error::Timeout`].
//!
//! One poller serves every change kind; callers choose the fetch function
//! and the target per call (see [`Awaited`]).

use std::future::Future;
use std::time::Duration;
use tracing::{debug, error};

use crate::config::PollSettings;
use crate::error::{Error, Result};
use crate::model::status;

/// Upper bound of the exponential backoff used when no fixed cadence is set
const MAX_BACKOFF: Duration = Duration::from_secs(10);

/// What a single wait is waiting for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Awaited {
    /// Description used in logs and errors (e.g. "record set z1:r1")
    pub what: String,
    /// Terminal success status
    pub target: String,
    /// Terminal failure status
    pub failure: String,
}

impl Awaited {
    /// Wait for an arbitrary target with the standard failure sentinel
    pub fn new(what: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            what: what.into(),
            target: target.into(),
            failure: status::FAILED.to_string(),
        }
    }

    /// Record set changes complete with `Complete`
    pub fn record_set_change(record_set: &str, change_id: &str) -> Self {
        Self::new(
            format!("record set {record_set} change {change_id}"),
            status::COMPLETE,
        )
    }

    /// Zone changes complete with `Synced`
    pub fn zone_change(zone_id: &str, change_id: &str) -> Self {
        Self::new(format!("zone {zone_id} change {change_id}"), status::SYNCED)
    }

    /// Zone existence after a create
    pub fn zone_created(zone_id: &str) -> Self {
        Self::new(format!("zone {zone_id} creation"), status::CREATED)
    }

    /// Zone absence after a delete
    pub fn zone_deleted(zone_id: &str) -> Self {
        Self::new(format!("zone {zone_id} deletion"), status::DELETED)
    }
}

/// Result of one transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Not terminal yet; carries the observed status
    Pending(String),
    /// Target reached
    Reached(String),
}

/// Apply one fetch result to the state machine
///
/// # Errors
///
/// - [`Error::ChangeFailed`] when the status is the failure sentinel
/// - the fetch error itself when it is anything but "not found"
pub fn step(fetched: Result<String>, awaited: &Awaited) -> Result<Step> {
    match fetched {
        Ok(observed) if observed == awaited.failure => {
            error!("{} status {}", awaited.what, observed);
            Err(Error::ChangeFailed {
                what: awaited.what.clone(),
            })
        }
        Ok(observed) if observed == awaited.target => Ok(Step::Reached(observed)),
        Ok(observed) if observed.is_empty() => Ok(Step::Pending(status::PENDING.to_string())),
        Ok(observed) => Ok(Step::Pending(observed)),
        // Changes are not always visible right after submission
        Err(e) if e.is_not_found() => Ok(Step::Pending(status::PENDING.to_string())),
        Err(e) => {
            error!("error while waiting for {}: {}", awaited.what, e);
            Err(e)
        }
    }
}

/// Map an existence check onto the status vocabulary
///
/// `target` is reached when `exists` equals `wanted`.
pub fn presence(exists: bool, wanted: bool, target: &str) -> String {
    if exists == wanted {
        target.to_string()
    } else {
        status::PENDING.to_string()
    }
}

/// Bounded sleep-then-repoll driver for [`step`]
#[derive(Debug, Clone, Default)]
pub struct ChangePoller {
    settings: PollSettings,
}

impl ChangePoller {
    /// Create a poller with the given timing
    pub fn new(settings: PollSettings) -> Self {
        Self { settings }
    }

    /// Timing in use
    pub fn settings(&self) -> &PollSettings {
        &self.settings
    }

    /// Block until `fetch` reports the target status
    ///
    /// # Parameters
    ///
    /// - `awaited`: Target, failure sentinel and description of the change
    /// - `fetch`: Queries the current status; called once per poll
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The terminal status that was reached
    /// - `Err(Error::ChangeFailed)`: The failure sentinel was observed
    /// - `Err(Error::Timeout)`: The deadline passed first
    /// - `Err(_)`: `fetch` failed with something other than "not found"
    pub async fn wait<F, Fut>(&self, awaited: &Awaited, mut fetch: F) -> Result<String>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        let mut last_status = status::PENDING.to_string();
        let mut polls: usize = 0;

        let work = async {
            tokio::time::sleep(self.settings.delay()).await;
            let mut backoff = self.settings.min_interval();

            loop {
                polls += 1;
                debug!(
                    "waiting for {} to become {} (poll {})",
                    awaited.what, awaited.target, polls
                );

                match step(fetch().await, awaited)? {
                    Step::Reached(reached) => return Ok::<_, Error>(reached),
                    Step::Pending(observed) => last_status = observed,
                }

                let pause = if self.settings.poll_interval_ms > 0 {
                    self.settings.poll_interval()
                } else {
                    let current = backoff;
                    backoff = (backoff * 2).min(MAX_BACKOFF);
                    current
                };
                tokio::time::sleep(pause).await;
            }
        };

        let outcome = tokio::time::timeout(self.settings.timeout(), work).await;

        match outcome {
            Ok(result) => {
                if let Ok(reached) = &result {
                    debug!("{} reached {} after {} poll(s)", awaited.what, reached, polls);
                }
                result
            }
            Err(_) => {
                error!(
                    "timeout while waiting for {} (last state: {})",
                    awaited.what, last_status
                );
                Err(Error::Timeout {
                    what: awaited.what.clone(),
                    target: awaited.target.clone(),
                    last_status,
                    timeout: self.settings.timeout(),
                })
            }
        }
    }
}
