//! NAB Market
//!
//! Listing query engine and listing submission workflow for the NAB staff marketplace.
//!
//! The engine turns an immutable [`catalog::Catalog`] plus a set of [`query::ListingFilters`]
//! and a [`query::SortOrder`] into the ordered list of products to display. The
//! [`listings::ListingWizard`] validates and assembles a new listing across four steps before it
//! is handed to a submission collaborator.

pub mod catalog;
pub mod categories;
pub mod conditions;
pub mod contact;
pub mod display;
pub mod fixtures;
pub mod i18n;
pub mod limits;
pub mod listings;
pub mod preferences;
pub mod prelude;
pub mod products;
pub mod query;
pub mod tags;
pub mod theme;
pub mod wishlist;
