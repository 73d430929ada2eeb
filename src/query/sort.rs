//! Comparator Table

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::products::Product;

/// Errors parsing a sort order name
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SortOrderError {
    /// Name not in the comparator table
    #[error("unknown sort order: {0}")]
    Unknown(String),
}

/// Named sort order applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Most recently posted first
    #[default]
    Newest,

    /// Least recently posted first
    Oldest,

    /// Cheapest first
    PriceLow,

    /// Most expensive first
    PriceHigh,

    /// Most viewed first
    Popular,

    /// Title A to Z
    NameAz,

    /// Title Z to A
    NameZa,

    /// Best rated seller first
    Rating,
}

impl SortOrder {
    /// Every sort order, in menu order.
    pub const ALL: [SortOrder; 8] = [
        SortOrder::Newest,
        SortOrder::Oldest,
        SortOrder::PriceLow,
        SortOrder::PriceHigh,
        SortOrder::Popular,
        SortOrder::NameAz,
        SortOrder::NameZa,
        SortOrder::Rating,
    ];

    /// Machine name, as used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::PriceLow => "price-low",
            SortOrder::PriceHigh => "price-high",
            SortOrder::Popular => "popular",
            SortOrder::NameAz => "name-az",
            SortOrder::NameZa => "name-za",
            SortOrder::Rating => "rating",
        }
    }

    /// Menu label
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest First",
            SortOrder::Oldest => "Oldest First",
            SortOrder::PriceLow => "Price: Low to High",
            SortOrder::PriceHigh => "Price: High to Low",
            SortOrder::Popular => "Most Popular",
            SortOrder::NameAz => "Name: A to Z",
            SortOrder::NameZa => "Name: Z to A",
            SortOrder::Rating => "Highest Rated",
        }
    }

    /// Compare two products. `Ordering::Equal` keeps catalog order under a stable sort.
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOrder::Newest => b.posted_date.cmp(&a.posted_date),
            SortOrder::Oldest => a.posted_date.cmp(&b.posted_date),
            SortOrder::PriceLow => a.price_minor().cmp(&b.price_minor()),
            SortOrder::PriceHigh => b.price_minor().cmp(&a.price_minor()),
            SortOrder::Popular => b.views.cmp(&a.views),
            SortOrder::NameAz => compare_titles(a, b),
            SortOrder::NameZa => compare_titles(b, a),
            SortOrder::Rating => b.seller.rating.total_cmp(&a.seller.rating),
        }
    }
}

fn compare_titles(a: &Product, b: &Product) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.title.cmp(&b.title))
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortOrder {
    type Err = SortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();

        SortOrder::ALL
            .into_iter()
            .find(|order| order.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| SortOrderError::Unknown(s.to_string()))
    }
}
