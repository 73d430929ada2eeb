//! NAB Market prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogError, CategorySummary},
    categories::Category,
    conditions::Condition,
    fixtures::{Fixture, FixtureError},
    i18n::{I18nError, Language, Translations},
    listings::{
        ContactMethod, DraftError, ImageKey, ImageUpload, InMemoryPreviews, Listing, ListingDraft,
        ListingStep, ListingWizard, PreviewRegistry, SubmitStatus, WizardError, WizardPhase,
    },
    preferences::{MemoryStore, Preferences, PreferencesError, PreferencesStore, Session},
    products::{Product, ProductId, Seller},
    query::{
        DatePosted, ListingFilters, PriceRange, SortOrder, SortOrderError, compose, compose_now,
    },
    tags::Tags,
    theme::Theme,
    wishlist::{Wishlist, WishlistError},
};
