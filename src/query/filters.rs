//! Predicate Filters
//!
//! Every predicate is total: a product with a missing or odd field simply fails to match.

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    categories::Category, conditions::Condition, limits::DEFAULT_MAX_PRICE, products::Product,
};

/// Closed price interval, in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    min: i64,
    max: i64,
}

impl PriceRange {
    /// Create a range from minor units. Reversed bounds are swapped.
    pub fn from_minor(min: i64, max: i64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Create a range from whole dollars.
    pub fn dollars(min: i64, max: i64) -> Self {
        Self::from_minor(min.saturating_mul(100), max.saturating_mul(100))
    }

    /// Lower bound, in minor units
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Upper bound, in minor units
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Check if a price (minor units) falls inside the range, bounds included.
    pub fn contains(&self, minor_units: i64) -> bool {
        (self.min..=self.max).contains(&minor_units)
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::dollars(0, DEFAULT_MAX_PRICE)
    }
}

/// Posted-date bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatePosted {
    /// Posted today
    Today,

    /// Posted within the last 7 days
    ThisWeek,

    /// Posted within the last 30 days
    ThisMonth,

    /// No date constraint
    Anytime,
}

/// Unknown date bucket name
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown date bucket: {0}")]
pub struct DatePostedError(pub String);

impl DatePosted {
    /// Every bucket, narrowest first.
    pub const ALL: [DatePosted; 4] = [
        DatePosted::Today,
        DatePosted::ThisWeek,
        DatePosted::ThisMonth,
        DatePosted::Anytime,
    ];

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            DatePosted::Today => "Today",
            DatePosted::ThisWeek => "This Week",
            DatePosted::ThisMonth => "This Month",
            DatePosted::Anytime => "Anytime",
        }
    }

    /// Largest number of days since posting that still falls in the bucket.
    pub fn max_days(self) -> Option<i32> {
        match self {
            DatePosted::Today => Some(0),
            DatePosted::ThisWeek => Some(7),
            DatePosted::ThisMonth => Some(30),
            DatePosted::Anytime => None,
        }
    }
}

impl fmt::Display for DatePosted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DatePosted {
    type Err = DatePostedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase().replace(['-', '_'], " ");

        DatePosted::ALL
            .into_iter()
            .find(|bucket| bucket.label().to_lowercase() == normalised)
            .ok_or_else(|| DatePostedError(s.to_string()))
    }
}

/// Whole days between `posted` and `today`. Future dates clamp to zero.
pub fn days_since(posted: Date, today: Date) -> Option<i32> {
    posted
        .until(today)
        .ok()
        .map(|span| span.get_days().max(0))
}

/// Category predicate. No selection matches everything.
pub fn matches_category(product: &Product, category: Option<Category>) -> bool {
    category.is_none_or(|category| product.category == category)
}

/// Price predicate. No range matches everything.
pub fn matches_price(product: &Product, range: Option<PriceRange>) -> bool {
    range.is_none_or(|range| range.contains(product.price_minor()))
}

/// Condition predicate. An empty set matches everything.
pub fn matches_condition(product: &Product, conditions: &FxHashSet<Condition>) -> bool {
    conditions.is_empty() || conditions.contains(&product.condition)
}

/// Location predicate. An empty set matches everything; a seller without a location never
/// matches a non-empty set.
pub fn matches_location(product: &Product, locations: &FxHashSet<String>) -> bool {
    if locations.is_empty() {
        return true;
    }

    let location = product.seller.location.trim();

    !location.is_empty() && locations.contains(location)
}

/// Date predicate, evaluated against `today`.
pub fn matches_date(product: &Product, bucket: Option<DatePosted>, today: Date) -> bool {
    let Some(max_days) = bucket.and_then(DatePosted::max_days) else {
        return true;
    };

    days_since(product.posted_date, today).is_some_and(|days| days <= max_days)
}

/// Text searched by the free-text predicate, lowercased.
pub fn search_text(product: &Product) -> String {
    let mut parts = vec![
        product.title.as_str(),
        product.description.as_str(),
        product.seller.name.as_str(),
    ];
    parts.extend(product.tags.iter());

    parts.join(" ").to_lowercase()
}

/// Free-text predicate. `needle` must already be trimmed and lowercased; empty matches all.
pub fn matches_search(product: &Product, needle: &str) -> bool {
    needle.is_empty() || search_text(product).contains(needle)
}

/// Filter selection owned by the listing page.
///
/// Groups combine with AND; multi-select groups combine their values with OR. An empty group
/// places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilters {
    /// Price range; `None` means any price
    pub price_range: Option<PriceRange>,

    /// Selected conditions
    pub conditions: FxHashSet<Condition>,

    /// Selected seller locations
    pub locations: FxHashSet<String>,

    /// Posted-date bucket
    pub date_posted: Option<DatePosted>,

    /// Selected category
    pub category: Option<Category>,

    /// Free-text search
    pub search: String,
}

impl ListingFilters {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select or deselect a condition.
    pub fn toggle_condition(&mut self, condition: Condition) {
        if !self.conditions.remove(&condition) {
            self.conditions.insert(condition);
        }
    }

    /// Select or deselect a location.
    pub fn toggle_location(&mut self, location: &str) {
        if !self.locations.remove(location) {
            self.locations.insert(location.to_string());
        }
    }

    /// Select a category; selecting the current category clears it.
    pub fn select_category(&mut self, category: Category) {
        if self.category == Some(category) {
            self.category = None;
        } else {
            self.category = Some(category);
        }
    }

    /// Set the price range.
    pub fn set_price_range(&mut self, range: PriceRange) {
        self.price_range = Some(range);
    }

    /// Set the date bucket.
    pub fn set_date_posted(&mut self, bucket: DatePosted) {
        self.date_posted = Some(bucket);
    }

    /// Set the search text.
    pub fn set_search(&mut self, query: &str) {
        query.clone_into(&mut self.search);
    }

    /// Reset every group.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Number of active selections shown on the filter button.
    ///
    /// Counts each selected condition and location, a price range and a date bucket other than
    /// [`DatePosted::Anytime`]. Category and search are shown elsewhere and not counted.
    pub fn active_count(&self) -> usize {
        let date = self
            .date_posted
            .is_some_and(|bucket| bucket != DatePosted::Anytime);

        self.conditions.len()
            + self.locations.len()
            + usize::from(self.price_range.is_some())
            + usize::from(date)
    }

    /// Check if no group constrains the result.
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0 && self.category.is_none() && self.search_needle().is_empty()
    }

    /// Normalised search text.
    pub fn search_needle(&self) -> String {
        self.search.trim().to_lowercase()
    }

    /// Build a matcher that evaluates the selection against products for `today`.
    pub fn matcher(&self, today: Date) -> Matcher<'_> {
        Matcher {
            filters: self,
            needle: self.search_needle(),
            today,
        }
    }
}

/// Compiled filter selection.
#[derive(Debug)]
pub struct Matcher<'f> {
    filters: &'f ListingFilters,
    needle: String,
    today: Date,
}

impl Matcher<'_> {
    /// Check a product against every group, cheapest predicate first.
    pub fn matches(&self, product: &Product) -> bool {
        matches_category(product, self.filters.category)
            && matches_price(product, self.filters.price_range)
            && matches_condition(product, &self.filters.conditions)
            && matches_location(product, &self.filters.locations)
            && matches_date(product, self.filters.date_posted, self.today)
            && matches_search(product, &self.needle)
    }
}
