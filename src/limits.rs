//! Application limits

/// Maximum number of characters in a listing title.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Maximum number of characters in a listing description.
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Maximum number of tags on a listing.
pub const MAX_TAGS: usize = 10;

/// Maximum number of images on a listing.
pub const MAX_IMAGES: usize = 5;

/// Maximum upload size of a single image (5 MiB).
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Image MIME types accepted by the listing wizard.
pub const SUPPORTED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/webp", "image/gif"];

/// Maximum number of saved wishlist items.
pub const MAX_WISHLIST_ITEMS: usize = 100;

/// Upper bound of the price slider, in whole dollars.
pub const DEFAULT_MAX_PRICE: i64 = 5000;

/// Locations offered by the location filter.
pub const FILTER_LOCATIONS: [&str; 8] = [
    "Melbourne",
    "Sydney",
    "Brisbane",
    "Perth",
    "Adelaide",
    "Canberra",
    "Darwin",
    "Hobart",
];

/// Locations a seller can pick when creating a listing.
pub const LISTING_LOCATIONS: [&str; 10] = [
    "Melbourne",
    "Sydney",
    "Brisbane",
    "Perth",
    "Adelaide",
    "Canberra",
    "Darwin",
    "Hobart",
    "Gold Coast",
    "Newcastle",
];
