//! Fixtures
//!
//! YAML catalog fixtures. The bundled NAB set is compiled into the binary; other sets are read
//! from `<base_path>/products/<name>.yml`.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::{catalog::Catalog, products::Product};

pub mod products;

/// Bundled product fixture.
pub const NAB_PRODUCTS: &str = include_str!("../../fixtures/products/nab.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Invalid posted date
    #[error("Invalid posted date: {0}")]
    InvalidDate(String),

    /// Product without images
    #[error("Product {0} has no images")]
    NoImages(u32),

    /// Seller rating outside 0..=5
    #[error("Product {0} has a seller rating outside 0 to 5")]
    InvalidRating(u32),

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(u32),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Products loaded so far, in file order
    products: Vec<Product>,

    /// Ids seen so far
    ids: FxHashSet<u32>,

    /// Currency for the fixture set
    currency: Option<&'static rusty_money::iso::Currency>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: Vec::new(),
            ids: FxHashSet::default(),
            currency: None,
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any product is invalid.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        self.load_products_str(&contents)
    }

    /// Load products from YAML source
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed, if a product is invalid, if an id is
    /// repeated, or if products use different currencies.
    pub fn load_products_str(&mut self, contents: &str) -> Result<&mut Self, FixtureError> {
        let fixture: products::ProductsFixture = serde_norway::from_str(contents)?;

        for product_fixture in fixture.products {
            let id = product_fixture.id;

            if self.ids.contains(&id) {
                return Err(FixtureError::DuplicateProduct(id));
            }

            let product: Product = product_fixture.try_into()?;
            let currency = product.price.currency();

            // Validate currency consistency
            if let Some(existing_currency) = self.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            self.ids.insert(id);
            self.products.push(product);
        }

        Ok(self)
    }

    /// Products loaded so far
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Finish loading and build an immutable catalog.
    pub fn into_catalog(self) -> Catalog {
        Catalog::from_products(self.products)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const TWO_CURRENCIES: &str = r#"
products:
  - id: 1
    title: Kettle
    description: Electric kettle
    price: 20 AUD
    condition: Good
    category: home
    images: ["https://example.com/kettle.jpg"]
    seller: { name: A, department: HR, location: Perth, rating: 4.0, response_time: "< 1 hour", teams_id: a@nab.com.au }
    posted_date: "2025-05-01"
  - id: 2
    title: Toaster
    description: Two slice toaster
    price: 15 GBP
    condition: Good
    category: home
    images: ["https://example.com/toaster.jpg"]
    seller: { name: B, department: HR, location: Perth, rating: 4.0, response_time: "< 1 hour", teams_id: b@nab.com.au }
    posted_date: "2025-05-02"
"#;

    #[test]
    fn bundled_fixture_loads() -> TestResult {
        let mut fixture = Fixture::new();
        fixture.load_products_str(NAB_PRODUCTS)?;

        assert_eq!(fixture.products().len(), 8);

        Ok(())
    }

    #[test]
    fn rejects_mixed_currencies() {
        let mut fixture = Fixture::new();
        let result = fixture.load_products_str(TWO_CURRENCIES);

        assert!(matches!(
            result,
            Err(FixtureError::CurrencyMismatch(expected, found)) if expected == "AUD" && found == "GBP"
        ));
    }

    #[test]
    fn rejects_duplicate_ids() -> TestResult {
        let mut fixture = Fixture::new();
        fixture.load_products_str(NAB_PRODUCTS)?;

        let result = fixture.load_products_str(NAB_PRODUCTS);

        assert!(matches!(result, Err(FixtureError::DuplicateProduct(1))));

        Ok(())
    }

    #[test]
    fn rejected_product_does_not_reserve_its_id() -> TestResult {
        let broken = TWO_CURRENCIES.replace("\"2025-05-01\"", "\"2025-13-01\"");
        let mut fixture = Fixture::new();

        assert!(matches!(
            fixture.load_products_str(&broken),
            Err(FixtureError::InvalidDate(_))
        ));

        let single = TWO_CURRENCIES
            .split("  - id: 2")
            .next()
            .ok_or_else(|| std::io::Error::other("missing first product"))?;

        fixture.load_products_str(single)?;

        assert_eq!(fixture.products().len(), 1);

        Ok(())
    }

    #[test]
    fn loads_from_base_path() -> TestResult {
        let dir = tempfile::tempdir()?;
        let products_dir = dir.path().join("products");
        fs::create_dir_all(&products_dir)?;
        fs::write(products_dir.join("staff.yml"), NAB_PRODUCTS)?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_products("staff")?;

        assert_eq!(fixture.into_catalog().len(), 8);

        Ok(())
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut fixture = Fixture::with_base_path("/nonexistent/fixtures");
        let result = fixture.load_products("nab");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }
}
