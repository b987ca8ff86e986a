use serde::{Deserialize, Serialize};

use super::{card_query::CardQuery, price::Price};

/// Outcome of resolving one card. A card that was not found is priced at zero.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PriceResult {
    pub query: CardQuery,
    pub unit_price: Price,
    pub found: bool,
}

impl PriceResult {
    pub fn found(query: CardQuery, unit_price: Price) -> Self {
        PriceResult {
            query,
            unit_price,
            found: true,
        }
    }

    pub fn not_found(query: CardQuery) -> Self {
        PriceResult {
            query,
            unit_price: Price::zero(),
            found: false,
        }
    }

    /// Unit price times the number of copies
    pub fn total(&self) -> Price {
        self.unit_price * self.query.count
    }
}

/// Sum of all card totals
pub fn total_price(results: &[PriceResult]) -> Price {
    results.iter().map(PriceResult::total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_multiplies_by_count() {
        let result = PriceResult::found(
            CardQuery::new("Lightning Bolt", "2ED", None, 4),
            Price::new(1.25),
        );
        assert_eq!(result.total(), Price::new(5.0));
    }

    #[test]
    fn test_not_found_is_free() {
        let result = PriceResult::not_found(CardQuery::new("Fake Card Name", "XXX", Some(5), 3));
        assert!(!result.found);
        assert_eq!(result.unit_price, Price::zero());
        assert_eq!(result.total(), Price::zero());
    }

    #[test]
    fn test_total_price_of_deck() {
        let results = vec![
            PriceResult::found(CardQuery::new("Counterspell", "ICE", None, 2), Price::new(1.1)),
            PriceResult::found(CardQuery::new("Island", "ICE", None, 20), Price::zero()),
            PriceResult::not_found(CardQuery::new("Fake Card Name", "XXX", None, 1)),
        ];
        assert_eq!(total_price(&results), Price::new(2.2));
    }
}
