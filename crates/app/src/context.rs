//! App Context

use std::{fmt, fs, path::Path, sync::Arc, time::Duration};

use nab_market::{
    catalog::Catalog,
    fixtures::{Fixture, FixtureError},
    i18n::{I18nError, Translations},
    listings::{InMemoryPreviews, PreviewRegistry},
    preferences::PreferencesError,
};
use thiserror::Error;
use tracing::debug;

use crate::{
    config::MarketConfig,
    preferences::{FileStore, PREFERENCES_FILE},
    seller::SellerController,
    submissions::{SimulatedSubmissionService, SubmissionService},
};

/// Errors building the application context
#[derive(Debug, Error)]
pub enum AppInitError {
    /// Catalog file missing or invalid
    #[error("failed to load product catalog")]
    Catalog(#[source] FixtureError),

    /// Bundled translation table invalid
    #[error("failed to load translations")]
    Translations(#[source] I18nError),

    /// Preference file unreadable
    #[error("failed to open preferences")]
    Preferences(#[source] PreferencesError),
}

/// Shared services for every command.
pub struct AppContext {
    /// Products on sale
    pub catalog: Arc<Catalog>,

    /// UI strings
    pub translations: Arc<Translations>,

    /// Listing backend
    pub submissions: Arc<dyn SubmissionService>,

    /// Image preview registry shared by listing drafts
    pub previews: Arc<dyn PreviewRegistry>,

    /// Saved preferences
    pub store: FileStore,

    submit_timeout: Duration,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("products", &self.catalog.len())
            .field("store", &self.store)
            .field("submit_timeout", &self.submit_timeout)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from market settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog, the translations or the preference file cannot be
    /// loaded.
    pub fn from_config(config: &MarketConfig) -> Result<Self, AppInitError> {
        let catalog = match &config.catalog {
            Some(path) => load_catalog(path),
            None => Catalog::demo(),
        }
        .map_err(AppInitError::Catalog)?;

        let translations = Translations::bundled().map_err(AppInitError::Translations)?;

        let store = FileStore::open(config.data_dir.join(PREFERENCES_FILE))
            .map_err(AppInitError::Preferences)?;

        debug!(products = catalog.len(), store = %store.path().display(), "context ready");

        Ok(Self {
            catalog: Arc::new(catalog),
            translations: Arc::new(translations),
            submissions: Arc::new(SimulatedSubmissionService::new(config.submit_delay())),
            previews: Arc::new(InMemoryPreviews::new()),
            store,
            submit_timeout: config.submit_timeout(),
        })
    }

    /// Controller for a new listing, wired to this context's services.
    pub fn seller(&self) -> SellerController {
        SellerController::new(
            Arc::clone(&self.previews),
            Arc::clone(&self.submissions),
            self.submit_timeout,
        )
    }
}

fn load_catalog(path: &Path) -> Result<Catalog, FixtureError> {
    let contents = fs::read_to_string(path)?;
    let mut fixture = Fixture::new();
    fixture.load_products_str(&contents)?;

    Ok(fixture.into_catalog())
}
