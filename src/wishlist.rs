//! Wishlist
//!
//! Products a user saved for later, in the order they were saved.

use jiff::civil::Date;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::{
    catalog::Catalog,
    limits::MAX_WISHLIST_ITEMS,
    products::{Product, ProductId},
    query::{ListingFilters, SortOrder, compose_iter},
};

/// Wishlist errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WishlistError {
    /// Capacity reached
    #[error("wishlist is full ({0} items)")]
    Full(usize),
}

/// Saved product ids, insertion ordered and unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Wishlist {
    ids: Vec<ProductId>,
}

impl Wishlist {
    /// Create an empty wishlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a product. Returns `Ok(false)` if it was already saved.
    ///
    /// # Errors
    ///
    /// Returns [`WishlistError::Full`] when the wishlist holds the maximum number of items.
    pub fn add(&mut self, id: ProductId) -> Result<bool, WishlistError> {
        if self.contains(id) {
            return Ok(false);
        }

        if self.ids.len() >= MAX_WISHLIST_ITEMS {
            return Err(WishlistError::Full(MAX_WISHLIST_ITEMS));
        }

        self.ids.push(id);

        Ok(true)
    }

    /// Remove a product. Returns `false` if it was not saved.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| *existing != id);

        self.ids.len() != before
    }

    /// Remove several products at once, returning how many were removed.
    pub fn remove_many(&mut self, ids: &[ProductId]) -> usize {
        let before = self.ids.len();
        self.ids.retain(|existing| !ids.contains(existing));

        before - self.ids.len()
    }

    /// Save the product if it is not saved, otherwise remove it. Returns whether it is now saved.
    ///
    /// # Errors
    ///
    /// Returns [`WishlistError::Full`] when saving would exceed capacity.
    pub fn toggle(&mut self, id: ProductId) -> Result<bool, WishlistError> {
        if self.remove(id) {
            return Ok(false);
        }

        self.add(id)
    }

    /// Check if a product is saved.
    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of saved products
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Saved ids in insertion order.
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// Saved products that still exist in the catalog, filtered and sorted like the listing page.
    ///
    /// [`SortOrder::Newest`] and [`SortOrder::Oldest`] order by when the product was saved, not
    /// when it was posted.
    pub fn products<'c>(
        &self,
        catalog: &'c Catalog,
        filters: &ListingFilters,
        sort: SortOrder,
        today: Date,
    ) -> Vec<&'c Product> {
        let saved = self.ids.iter().filter_map(|id| catalog.get(*id));

        match sort {
            SortOrder::Newest | SortOrder::Oldest => {
                let matcher = filters.matcher(today);
                let mut results: Vec<&Product> =
                    saved.filter(|product| matcher.matches(product)).collect();

                if sort == SortOrder::Newest {
                    results.reverse();
                }

                results
            }
            _ => compose_iter(saved, filters, sort, today),
        }
    }
}

impl FromIterator<ProductId> for Wishlist {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        let mut wishlist = Self::new();

        for id in iter {
            if wishlist.add(id).is_err() {
                break;
            }
        }

        wishlist
    }
}

impl<'de> Deserialize<'de> for Wishlist {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ids = Vec::<ProductId>::deserialize(deserializer)?;

        Ok(ids.into_iter().collect())
    }
}
