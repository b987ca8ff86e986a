use futures::{stream, StreamExt, TryStreamExt};
use log::info;

use crate::cards::{card_query::CardQuery, price_result::PriceResult};
use crate::error::Result;
use crate::price_resolver::PriceResolver;

/// Prices a whole card list with a bounded number of lookups in flight
pub struct BatchDispatcher {
    resolver: PriceResolver,
    workers: usize,
}

impl BatchDispatcher {
    pub fn new(resolver: PriceResolver, workers: usize) -> Self {
        BatchDispatcher {
            resolver,
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// `result[i]` belongs to `queries[i]`. An unavailable set catalog stops
    /// the batch; cards that are simply not found do not.
    pub async fn resolve_all(&self, queries: &[CardQuery]) -> Result<Vec<PriceResult>> {
        info!(
            "Pricing {} cards with {} workers",
            queries.len(),
            self.workers
        );

        stream::iter(queries)
            .map(|query| self.resolver.resolve(query))
            .buffered(self.workers)
            .try_collect()
            .await
    }
}
