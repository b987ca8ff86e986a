use std::sync::Arc;

use log::{debug, info, warn};

use crate::cards::{card_query::CardQuery, price::Price, price_result::PriceResult};
use crate::error::Result;
use crate::page_fetcher::PageFetcher;
use crate::price_extractor::PriceExtractor;
use crate::set_resolver::SetResolver;
use crate::url_candidates::UrlCandidates;
use crate::utilities::constants::{BASIC_LANDS, MODIFIERS};

/// What to do with a product page that has no price tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPricePolicy {
    /// The card is found and costs nothing
    #[default]
    Zero,
    /// The page does not count, keep trying the next url
    Fallback,
}

pub fn is_basic_land(name: &str) -> bool {
    let name = name.trim().to_lowercase();
    BASIC_LANDS.contains(&name.as_str())
}

pub struct PriceResolver {
    base_url: String,
    fetcher: Arc<dyn PageFetcher>,
    sets: SetResolver,
    extractor: Arc<dyn PriceExtractor>,
    modifiers: Vec<String>,
    missing_price: MissingPricePolicy,
}

impl PriceResolver {
    pub fn new(
        base_url: &str,
        fetcher: Arc<dyn PageFetcher>,
        sets: SetResolver,
        extractor: Arc<dyn PriceExtractor>,
    ) -> Self {
        PriceResolver {
            base_url: base_url.to_string(),
            fetcher,
            sets,
            extractor,
            modifiers: MODIFIERS.iter().map(|m| m.to_string()).collect(),
            missing_price: MissingPricePolicy::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<String>) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_missing_price_policy(mut self, policy: MissingPricePolicy) -> Self {
        self.missing_price = policy;
        self
    }

    /// Finds the store page of one card and reads its price.
    ///
    /// A card that cannot be found is not an error, it comes back with
    /// `found == false` and a price of zero. Only an unavailable set catalog
    /// fails the call.
    pub async fn resolve(&self, query: &CardQuery) -> Result<PriceResult> {
        if is_basic_land(&query.name) {
            info!("price for {} {}: {} (basic land)", query.count, query, Price::zero());
            return Ok(PriceResult::found(query.clone(), Price::zero()));
        }

        let set_slug = self.sets.resolve_set_slug(&query.set_code).await?;
        let candidates = UrlCandidates::new(
            &self.base_url,
            &query.name,
            &set_slug,
            &query.set_code,
            query.number,
            &self.modifiers,
        );

        for url in candidates {
            let page = match self.fetcher.fetch(&url).await {
                Ok(page) => page,
                Err(e) => {
                    debug!("{} not at {}: {}", query.name, url, e);
                    continue;
                }
            };

            match self.extractor.extract_price(&page) {
                Some(price) => {
                    info!("price for {} {}: {} at {}", query.count, query, price, url);
                    return Ok(PriceResult::found(query.clone(), price));
                }
                None if self.missing_price == MissingPricePolicy::Zero => {
                    info!(
                        "price for {} {}: no price listed at {}, counting it as {}",
                        query.count,
                        query,
                        url,
                        Price::zero()
                    );
                    return Ok(PriceResult::found(query.clone(), Price::zero()));
                }
                None => debug!("No price tag at {}, trying next url", url),
            }
        }

        warn!("No store page found for {} {}", query.count, query);
        Ok(PriceResult::not_found(query.clone()))
    }
}
