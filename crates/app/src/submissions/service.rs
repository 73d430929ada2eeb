//! Submission service.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use nab_market::listings::Listing;
use tracing::{info, warn};

use crate::{submissions::errors::SubmissionError, uuids::TypedUuid};

/// Id assigned to a published listing.
pub type ListingUuid = TypedUuid<Listing>;

/// Default delay of the simulated service.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(2_000);

/// Stand-in for a listing backend: waits, then accepts or rejects.
#[derive(Debug, Clone)]
pub struct SimulatedSubmissionService {
    delay: Duration,
    reject_with: Option<String>,
}

impl SimulatedSubmissionService {
    /// Accept every listing after `delay`.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            reject_with: None,
        }
    }

    /// Reject every listing after `delay` with `reason`.
    #[must_use]
    pub fn rejecting(delay: Duration, reason: impl Into<String>) -> Self {
        Self {
            delay,
            reject_with: Some(reason.into()),
        }
    }
}

impl Default for SimulatedSubmissionService {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}

#[async_trait]
impl SubmissionService for SimulatedSubmissionService {
    async fn submit(&self, listing: Listing) -> Result<ListingUuid, SubmissionError> {
        tokio::time::sleep(self.delay).await;

        if let Some(reason) = &self.reject_with {
            warn!(title = %listing.title, %reason, "simulated submission rejected");

            return Err(SubmissionError::Rejected(reason.clone()));
        }

        let uuid = ListingUuid::now_v7();

        info!(
            %uuid,
            title = %listing.title,
            images = listing.images.len(),
            "simulated submission accepted"
        );

        Ok(uuid)
    }
}

/// Publishes listings built by the seller wizard.
#[automock]
#[async_trait]
pub trait SubmissionService: Send + Sync {
    /// Publish a listing, returning its new id.
    async fn submit(&self, listing: Listing) -> Result<ListingUuid, SubmissionError>;
}
