//! Catalog
//!
//! Immutable, ordered collection of products. Catalog order is the tie-breaker for every sort.

use thiserror::Error;

use crate::{
    categories::Category,
    fixtures::{Fixture, FixtureError, NAB_PRODUCTS},
    products::{Product, ProductId},
};

/// Catalog lookup errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No product with this id
    #[error("product {0} not found")]
    NotFound(ProductId),
}

/// Number of products listed under a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySummary {
    /// Category
    pub category: Category,

    /// Number of products in the catalog with this category
    pub count: usize,
}

/// Product catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from products, keeping their order.
    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Load the bundled staff marketplace catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled fixture is invalid.
    pub fn demo() -> Result<Self, FixtureError> {
        let mut fixture = Fixture::new();
        fixture.load_products_str(NAB_PRODUCTS)?;

        Ok(fixture.into_catalog())
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Iterate products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Look up a product that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no product has this id.
    pub fn require(&self, id: ProductId) -> Result<&Product, CatalogError> {
        self.get(id).ok_or(CatalogError::NotFound(id))
    }

    /// Featured products, in catalog order.
    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|product| product.featured)
    }

    /// Product counts for every known category, in menu order.
    pub fn category_summaries(&self) -> Vec<CategorySummary> {
        Category::ALL
            .into_iter()
            .map(|category| CategorySummary {
                category,
                count: self
                    .products
                    .iter()
                    .filter(|product| product.category == category)
                    .count(),
            })
            .collect()
    }

    /// Up to `limit` other products from the same category, in catalog order.
    pub fn related(&self, id: ProductId, limit: usize) -> Vec<&Product> {
        let Some(product) = self.get(id) else {
            return Vec::new();
        };

        self.products
            .iter()
            .filter(|other| other.id != id && other.category == product.category)
            .take(limit)
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn demo_catalog_has_eight_products() -> TestResult {
        let catalog = Catalog::demo()?;

        assert_eq!(catalog.len(), 8);
        assert_eq!(
            catalog.get(ProductId(8)).map(|product| product.title.as_str()),
            Some("iPhone 15 Pro")
        );
        assert_eq!(
            catalog.require(ProductId(99)).map(|product| product.id),
            Err(CatalogError::NotFound(ProductId(99)))
        );

        Ok(())
    }

    #[test]
    fn featured_keeps_catalog_order() -> TestResult {
        let catalog = Catalog::demo()?;
        let ids: Vec<u32> = catalog.featured().map(|product| product.id.0).collect();

        assert_eq!(ids, vec![1, 2, 3, 8]);

        Ok(())
    }

    #[test]
    fn category_summaries_count_every_category() -> TestResult {
        let catalog = Catalog::demo()?;
        let summaries = catalog.category_summaries();

        let counts: Vec<(Category, usize)> = summaries
            .iter()
            .map(|summary| (summary.category, summary.count))
            .collect();

        assert_eq!(
            counts,
            vec![
                (Category::Electronics, 3),
                (Category::Furniture, 2),
                (Category::Clothing, 1),
                (Category::Books, 1),
                (Category::Sports, 1),
                (Category::Home, 0),
            ]
        );

        Ok(())
    }

    #[test]
    fn related_excludes_the_product_itself() -> TestResult {
        let catalog = Catalog::demo()?;
        let related: Vec<u32> = catalog
            .related(ProductId(1), 4)
            .into_iter()
            .map(|product| product.id.0)
            .collect();

        assert_eq!(related, vec![3, 8]);
        assert!(catalog.related(ProductId(99), 4).is_empty());

        Ok(())
    }
}
