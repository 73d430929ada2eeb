//! Product Fixtures

use jiff::civil::Date;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{AUD, Currency, EUR, GBP, NZD, USD},
};
use serde::Deserialize;

use crate::{
    categories::Category,
    conditions::Condition,
    fixtures::FixtureError,
    products::{Product, ProductId, Seller},
    tags::Tags,
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products in catalog order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product identifier
    pub id: u32,

    /// Listing title
    pub title: String,

    /// Listing description
    pub description: String,

    /// Product price (e.g., "350 AUD")
    pub price: String,

    /// Condition label, e.g. "Like New"
    pub condition: Condition,

    /// Category identifier, e.g. "electronics"
    pub category: Category,

    /// Image URLs
    pub images: Vec<String>,

    /// Seller
    pub seller: SellerFixture,

    /// Posted date (e.g., "2025-05-28")
    pub posted_date: String,

    /// Featured flag
    #[serde(default)]
    pub featured: bool,

    /// View count
    #[serde(default)]
    pub views: u32,

    /// Tags
    #[serde(default)]
    pub tags: Tags,
}

/// Seller Fixture
#[derive(Debug, Deserialize)]
pub struct SellerFixture {
    /// Seller name
    pub name: String,

    /// Department
    pub department: String,

    /// Office location
    #[serde(default)]
    pub location: String,

    /// Rating between 0 and 5
    pub rating: f32,

    /// Typical response time
    pub response_time: String,

    /// Teams contact handle
    pub teams_id: String,
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        if minor_units < 0 {
            return Err(FixtureError::InvalidPrice(fixture.price));
        }

        if fixture.images.is_empty() {
            return Err(FixtureError::NoImages(fixture.id));
        }

        if !(0.0..=5.0).contains(&fixture.seller.rating) {
            return Err(FixtureError::InvalidRating(fixture.id));
        }

        let posted_date = fixture
            .posted_date
            .parse::<Date>()
            .map_err(|_err| FixtureError::InvalidDate(fixture.posted_date.clone()))?;

        Ok(Product {
            id: ProductId(fixture.id),
            title: fixture.title,
            description: fixture.description,
            price: Money::from_minor(minor_units, currency),
            condition: fixture.condition,
            category: fixture.category,
            images: fixture.images,
            seller: Seller {
                name: fixture.seller.name,
                department: fixture.seller.department,
                location: fixture.seller.location,
                rating: fixture.seller.rating,
                response_time: fixture.seller.response_time,
                teams_id: fixture.seller.teams_id,
            },
            posted_date,
            featured: fixture.featured,
            views: fixture.views,
            tags: fixture.tags,
        })
    }
}

/// Parse price string (e.g., "2.99 AUD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = to_minor_units(amount).ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "AUD" => AUD,
        "NZD" => NZD,
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

/// Convert a decimal amount into minor units, rounding to the nearest cent.
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
}
