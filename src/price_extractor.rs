use scraper::{Html, Selector};

use crate::cards::price::Price;
use crate::utilities::constants::PRICE_META_SELECTOR;

/// Reads the unit price out of a fetched product page
pub trait PriceExtractor: Send + Sync {
    fn extract_price(&self, page: &str) -> Option<Price>;
}

/// Takes the `content` attribute of the first price meta tag on the page
#[derive(Debug)]
pub struct MetaTagPriceExtractor {
    selector: Selector,
}

impl MetaTagPriceExtractor {
    pub fn new() -> Self {
        Self::with_selector(PRICE_META_SELECTOR).expect("built-in price selector is valid css")
    }

    pub fn with_selector(css: &str) -> Result<Self, String> {
        let selector =
            Selector::parse(css).map_err(|e| format!("Invalid selector '{}': {:?}", css, e))?;
        Ok(MetaTagPriceExtractor { selector })
    }
}

impl Default for MetaTagPriceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceExtractor for MetaTagPriceExtractor {
    fn extract_price(&self, page: &str) -> Option<Price> {
        let document = Html::parse_document(page);
        let content = document
            .select(&self.selector)
            .next()?
            .value()
            .attr("content")?;
        Price::parse(content)
    }
}
