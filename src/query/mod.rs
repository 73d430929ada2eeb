//! Query Composer
//!
//! Derives the displayed product list from a catalog, a filter selection and a sort order.
//! The result borrows from the catalog: it is always a subset, never contains duplicates and
//! never modifies the catalog.

use jiff::{Zoned, civil::Date};

use crate::{catalog::Catalog, products::Product};

pub mod filters;
pub mod sort;

pub use filters::{DatePosted, DatePostedError, ListingFilters, Matcher, PriceRange};
pub use sort::{SortOrder, SortOrderError};

/// Filter the catalog and sort the matches.
///
/// Products that compare equal keep their catalog order.
pub fn compose<'c>(
    catalog: &'c Catalog,
    filters: &ListingFilters,
    sort: SortOrder,
    today: Date,
) -> Vec<&'c Product> {
    compose_iter(catalog, filters, sort, today)
}

/// [`compose`] over any sequence of products, e.g. a wishlist's saved subset.
pub fn compose_iter<'c>(
    products: impl IntoIterator<Item = &'c Product>,
    filters: &ListingFilters,
    sort: SortOrder,
    today: Date,
) -> Vec<&'c Product> {
    let matcher = filters.matcher(today);

    let mut results: Vec<&Product> = products
        .into_iter()
        .filter(|product| matcher.matches(product))
        .collect();

    results.sort_by(|a, b| sort.compare(a, b));

    results
}

/// [`compose`] evaluated against the local calendar date.
pub fn compose_now<'c>(
    catalog: &'c Catalog,
    filters: &ListingFilters,
    sort: SortOrder,
) -> Vec<&'c Product> {
    compose(catalog, filters, sort, Zoned::now().date())
}
