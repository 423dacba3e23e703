/// How many product cards to keep per category listing.
pub const MAX_ITEMS_PER_CATEGORY: usize = 5;

/// How many feature bullets to keep from a product detail page.
pub const MAX_BULLET_POINTS: usize = 5;

/// Origin used to absolutize relative product links.
pub const STORE_ORIGIN: &str = "https://www.amazon.com";

/// Placeholder for fields the page simply doesn't show.
pub const FIELD_UNAVAILABLE: &str = "N/A";

pub const SNAPSHOT_FILE: &str = "amazon_bestsellers_data.json";
pub const LEGACY_DATA_FILE: &str = "data.json";
