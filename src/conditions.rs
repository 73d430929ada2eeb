//! Product Conditions

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Condition of a listed item.
///
/// Parsing never fails: anything outside the known set becomes [`Condition::Unknown`], which
/// renders with a neutral label and badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Minimal wear
    LikeNew,

    /// Minor wear
    Excellent,

    /// Some wear but functions perfectly
    VeryGood,

    /// Normal wear
    Good,

    /// Heavy wear but still functional
    Fair,

    /// Not one of the known conditions
    Unknown,
}

/// Badge colour used when rendering a condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Badge {
    /// Like new
    Emerald,

    /// Excellent
    Blue,

    /// Very good
    Amber,

    /// Good
    Orange,

    /// Fair and unknown
    Gray,
}

impl Condition {
    /// Every known condition, best first.
    pub const ALL: [Condition; 5] = [
        Condition::LikeNew,
        Condition::Excellent,
        Condition::VeryGood,
        Condition::Good,
        Condition::Fair,
    ];

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Condition::LikeNew => "Like New",
            Condition::Excellent => "Excellent",
            Condition::VeryGood => "Very Good",
            Condition::Good => "Good",
            Condition::Fair => "Fair",
            Condition::Unknown => "Unknown",
        }
    }

    /// Short description shown next to the label in the listing wizard.
    pub fn description(self) -> &'static str {
        match self {
            Condition::LikeNew => "Minimal wear, excellent condition",
            Condition::Excellent => "Minor wear, very good condition",
            Condition::VeryGood => "Some wear but functions perfectly",
            Condition::Good => "Normal wear, good condition",
            Condition::Fair => "Heavy wear but still functional",
            Condition::Unknown => "Condition not specified",
        }
    }

    /// Badge colour
    pub fn badge(self) -> Badge {
        match self {
            Condition::LikeNew => Badge::Emerald,
            Condition::Excellent => Badge::Blue,
            Condition::VeryGood => Badge::Amber,
            Condition::Good => Badge::Orange,
            Condition::Fair | Condition::Unknown => Badge::Gray,
        }
    }

    /// Localisation key of the label.
    pub fn translation_key(self) -> Option<&'static str> {
        match self {
            Condition::LikeNew => Some("likeNew"),
            Condition::Excellent => Some("excellent"),
            Condition::VeryGood => Some("veryGood"),
            Condition::Good => Some("good"),
            Condition::Fair => Some("fair"),
            Condition::Unknown => None,
        }
    }

    /// Parse a condition, case-insensitively, falling back to [`Condition::Unknown`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "like new" | "like-new" | "likenew" => Condition::LikeNew,
            "excellent" => Condition::Excellent,
            "very good" | "very-good" | "verygood" => Condition::VeryGood,
            "good" => Condition::Good,
            "fair" => Condition::Fair,
            _ => Condition::Unknown,
        }
    }
}

impl Badge {
    /// CSS utility classes for the badge (light and dark variants).
    pub fn classes(self) -> &'static str {
        match self {
            Badge::Emerald => "bg-emerald-50 text-emerald-600 dark:bg-emerald-900/20",
            Badge::Blue => "bg-blue-50 text-blue-600 dark:bg-blue-900/20",
            Badge::Amber => "bg-amber-50 text-amber-600 dark:bg-amber-900/20",
            Badge::Orange => "bg-orange-50 text-orange-600 dark:bg-orange-900/20",
            Badge::Gray => "bg-gray-50 text-gray-600 dark:bg-gray-900/20",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Condition {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;

        Ok(Self::parse(&value))
    }
}
