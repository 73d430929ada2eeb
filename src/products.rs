//! Products

use std::fmt;

use jiff::civil::Date;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::{categories::Category, conditions::Condition, tags::Tags};

/// Product identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Seller details embedded in a product.
#[derive(Debug, Clone, PartialEq)]
pub struct Seller {
    /// Seller name
    pub name: String,

    /// Seller department
    pub department: String,

    /// Office location, e.g. "Melbourne"
    pub location: String,

    /// Rating between 0 and 5
    pub rating: f32,

    /// Typical response time, free text
    pub response_time: String,

    /// Teams contact handle
    pub teams_id: String,
}

/// Product listed in the marketplace.
#[derive(Debug, Clone)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Listing title
    pub title: String,

    /// Listing description
    pub description: String,

    /// Asking price
    pub price: Money<'static, Currency>,

    /// Item condition
    pub condition: Condition,

    /// Category
    pub category: Category,

    /// Image URLs, never empty
    pub images: Vec<String>,

    /// Seller
    pub seller: Seller,

    /// Date the listing was posted
    pub posted_date: Date,

    /// Whether the listing is featured on the home page
    pub featured: bool,

    /// Number of views, used for popularity
    pub views: u32,

    /// Tags
    pub tags: Tags,
}

impl Product {
    /// Price in minor units (cents).
    pub fn price_minor(&self) -> i64 {
        self.price.to_minor_units()
    }

    /// First image, used as the listing thumbnail.
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
