//! Seller controller
//!
//! Owns a listing wizard and drives it through submission. The service call is the only
//! suspension point; it is bounded by a timeout and can be abandoned by a cancellation future.

use std::{fmt, future::Future, sync::Arc, time::Duration};

use nab_market::listings::{ListingWizard, PreviewRegistry, WizardError};
use thiserror::Error;
use tracing::{info, warn};

use crate::submissions::{ListingUuid, SubmissionError, SubmissionService};

/// Default bound on a single submission.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors submitting a listing.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The wizard refused to submit.
    #[error(transparent)]
    Wizard(#[from] WizardError),

    /// The service did not answer in time.
    #[error("submission timed out after {0:?}")]
    TimedOut(Duration),

    /// The service refused the listing.
    #[error("submission failed: {0}")]
    Failed(#[source] SubmissionError),

    /// The caller abandoned the submission.
    #[error("submission cancelled")]
    Cancelled,
}

/// Drives a [`ListingWizard`] through submission.
pub struct SellerController {
    wizard: ListingWizard,
    service: Arc<dyn SubmissionService>,
    timeout: Duration,
}

impl fmt::Debug for SellerController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SellerController")
            .field("wizard", &self.wizard)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl SellerController {
    /// Create a controller with a fresh wizard.
    pub fn new(
        previews: Arc<dyn PreviewRegistry>,
        service: Arc<dyn SubmissionService>,
        timeout: Duration,
    ) -> Self {
        Self {
            wizard: ListingWizard::new(previews),
            service,
            timeout,
        }
    }

    /// Wizard state
    pub fn wizard(&self) -> &ListingWizard {
        &self.wizard
    }

    /// Mutable wizard state, for editing and navigation.
    pub fn wizard_mut(&mut self) -> &mut ListingWizard {
        &mut self.wizard
    }

    /// Submit the listing and wait for the outcome.
    ///
    /// # Errors
    ///
    /// See [`SellerController::submit_until`].
    pub async fn submit(&mut self) -> Result<ListingUuid, SubmitError> {
        self.submit_until(std::future::pending::<()>()).await
    }

    /// Submit the listing unless `cancel` completes first.
    ///
    /// On success the wizard starts over with an empty draft. A failure or timeout leaves the
    /// draft on the Review step with the reason recorded; cancelling returns to Review with no
    /// reason.
    ///
    /// # Errors
    ///
    /// Returns an error if the wizard cannot submit, the service fails or times out, or the
    /// submission is cancelled.
    pub async fn submit_until<C>(&mut self, cancel: C) -> Result<ListingUuid, SubmitError>
    where
        C: Future<Output = ()>,
    {
        let listing = self.wizard.begin_submit()?;
        let title = listing.title.clone();

        info!(%title, "submitting listing");

        let outcome = tokio::select! {
            result = tokio::time::timeout(self.timeout, self.service.submit(listing)) => Some(result),
            () = cancel => None,
        };

        match outcome {
            Some(Ok(Ok(uuid))) => {
                self.wizard.complete_submit()?;
                info!(%title, %uuid, "listing published");

                Ok(uuid)
            }
            Some(Ok(Err(source))) => {
                self.wizard.fail_submit(source.to_string())?;
                warn!(%title, error = %source, "listing submission failed");

                Err(SubmitError::Failed(source))
            }
            Some(Err(_elapsed)) => {
                let error = SubmitError::TimedOut(self.timeout);
                self.wizard.fail_submit(error.to_string())?;
                warn!(%title, timeout = ?self.timeout, "listing submission timed out");

                Err(error)
            }
            None => {
                self.wizard.cancel_submit()?;
                info!(%title, "listing submission cancelled");

                Err(SubmitError::Cancelled)
            }
        }
    }
}
