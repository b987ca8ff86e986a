pub const STORE_BASE_URL: &str = "https://www.facetofacegames.com/";
pub const SCRYFALL_API_URL: &str = "https://api.scryfall.com";

pub const DEFAULT_WORKERS: usize = 6;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_CATALOG_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_CATALOG_RETRY_DELAY_MS: u64 = 500;

pub const EXPORT_FILE_PREFIX: &str = "price_check_";

/// Meta tag carrying the product price in its `content` attribute
pub const PRICE_META_SELECTOR: &str =
    r#"meta[property="product:price:amount"], meta[itemprop="price"]"#;

/// Printings with their own product page, in the order they are tried
pub const MODIFIERS: [&str; 7] = [
    "borderless",
    "extended-art",
    "showcase",
    "etched-foil",
    "retro-frame",
    "full-art",
    "foil",
];

/// Set codes Scryfall does not know yet, mapped to the slug the store uses
pub const SET_SLUG_OVERRIDES: [(&str, &str); 4] = [
    ("FDN", "foundations"),
    ("DSK", "duskmourn-house-of-horror"),
    ("BLB", "bloomburrow"),
    ("MH3", "modern-horizons-3"),
];

/// Cards every player has piles of; never worth a lookup
pub const BASIC_LANDS: [&str; 11] = [
    "plains",
    "island",
    "swamp",
    "mountain",
    "forest",
    "wastes",
    "snow-covered plains",
    "snow-covered island",
    "snow-covered swamp",
    "snow-covered mountain",
    "snow-covered forest",
];
