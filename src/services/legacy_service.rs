use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::candidate::NewCandidate;

/// The reduced record forwarded to the legacy system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCandidatePayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&NewCandidate> for LegacyCandidatePayload {
    fn from(candidate: &NewCandidate) -> Self {
        Self {
            first_name: candidate.first_name.clone(),
            last_name: candidate.last_name.clone(),
            email: candidate.email.clone(),
        }
    }
}

/// Receiver of freshly stored candidates.
///
/// `dispatch` returns immediately; delivery happens (or fails) on its own.
#[cfg_attr(test, mockall::automock)]
pub trait CandidateNotifier: Send + Sync {
    fn dispatch(&self, payload: LegacyCandidatePayload);
}

#[derive(Clone)]
pub struct LegacyNotifier {
    client: Client,
    target_url: Option<String>,
}

impl LegacyNotifier {
    pub fn new(target_url: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        let target_url = target_url.filter(|url| !url.trim().is_empty());
        match &target_url {
            Some(url) => info!("Legacy forwarding enabled, target URL: {}", url),
            None => info!("Legacy forwarding disabled (LEGACY_API_URL empty)"),
        }

        Ok(Self { client, target_url })
    }

    pub fn is_enabled(&self) -> bool {
        self.target_url.is_some()
    }

    /// Single delivery attempt. Transport errors, timeouts and non-2xx
    /// statuses all come back as `Err`.
    pub async fn notify(&self, payload: &LegacyCandidatePayload) -> Result<()> {
        let Some(url) = &self.target_url else {
            return Ok(());
        };

        self.client
            .post(url)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;

        debug!(email = %payload.email, "Candidate forwarded to legacy API");
        Ok(())
    }
}

impl CandidateNotifier for LegacyNotifier {
    fn dispatch(&self, payload: LegacyCandidatePayload) {
        if !self.is_enabled() {
            return;
        }

        let notifier = self.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&payload).await {
                warn!(error = %e, email = %payload.email, "Legacy API not available");
            }
        });
    }
}
