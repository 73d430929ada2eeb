//! Product Categories

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Category a product is listed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Phones, laptops, cameras and accessories
    Electronics,

    /// Chairs, tables, storage
    Furniture,

    /// Menswear, womenswear, shoes
    Clothing,

    /// Fiction, textbooks, professional
    Books,

    /// Fitness, outdoor, bikes
    Sports,

    /// Kitchen, garden, tools
    Home,

    /// Not one of the known categories
    Unknown,
}

/// Icon shown for a category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    /// Electronics
    Smartphone,

    /// Furniture
    Armchair,

    /// Clothing
    Shirt,

    /// Books
    Book,

    /// Sports
    Bike,

    /// Home & garden
    Home,

    /// Unknown categories
    Package,
}

impl Category {
    /// Every known category, in menu order.
    pub const ALL: [Category; 6] = [
        Category::Electronics,
        Category::Furniture,
        Category::Clothing,
        Category::Books,
        Category::Sports,
        Category::Home,
    ];

    /// Stable identifier used in fixtures, URLs and filters.
    pub fn id(self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Furniture => "furniture",
            Category::Clothing => "clothing",
            Category::Books => "books",
            Category::Sports => "sports",
            Category::Home => "home",
            Category::Unknown => "unknown",
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Furniture => "Furniture",
            Category::Clothing => "Clothing",
            Category::Books => "Books",
            Category::Sports => "Sports & Outdoors",
            Category::Home => "Home & Garden",
            Category::Unknown => "Other",
        }
    }

    /// Icon
    pub fn icon(self) -> Icon {
        match self {
            Category::Electronics => Icon::Smartphone,
            Category::Furniture => Icon::Armchair,
            Category::Clothing => Icon::Shirt,
            Category::Books => Icon::Book,
            Category::Sports => Icon::Bike,
            Category::Home => Icon::Home,
            Category::Unknown => Icon::Package,
        }
    }

    /// Subcategory identifiers
    pub fn subcategories(self) -> &'static [&'static str] {
        match self {
            Category::Electronics => &["smartphones", "laptops", "tablets", "cameras", "accessories"],
            Category::Furniture => &["chairs", "tables", "storage", "decor", "lighting"],
            Category::Clothing => &["mens", "womens", "accessories", "shoes", "formal"],
            Category::Books => &["fiction", "non-fiction", "textbooks", "professional", "children"],
            Category::Sports => &["fitness", "outdoor", "bikes", "equipment", "apparel"],
            Category::Home => &["kitchen", "garden", "tools", "appliances", "cleaning"],
            Category::Unknown => &[],
        }
    }

    /// Localisation key of the name.
    pub fn translation_key(self) -> Option<&'static str> {
        match self {
            Category::Electronics => Some("electronics"),
            Category::Furniture => Some("furniture"),
            Category::Clothing => Some("clothing"),
            Category::Books => Some("books"),
            Category::Sports => Some("sports"),
            Category::Home => Some("homeGarden"),
            Category::Unknown => None,
        }
    }

    /// Parse a category identifier, falling back to [`Category::Unknown`].
    pub fn parse(value: &str) -> Self {
        Category::ALL
            .into_iter()
            .find(|category| category.id().eq_ignore_ascii_case(value.trim()))
            .unwrap_or(Category::Unknown)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;

        Ok(Self::parse(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_ids() {
        assert_eq!(Category::parse("electronics"), Category::Electronics);
        assert_eq!(Category::parse("Home"), Category::Home);
    }

    #[test]
    fn unknown_category_renders_as_other() {
        let category = Category::parse("vehicles");

        assert_eq!(category, Category::Unknown);
        assert_eq!(category.name(), "Other");
        assert_eq!(category.icon(), Icon::Package);
        assert!(category.subcategories().is_empty());
    }
}
