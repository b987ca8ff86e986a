use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// Store price in Canadian dollars
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Price {
    pub amount: f64,
}

impl Price {
    /// Negative and non-finite amounts are clamped to zero
    pub fn new(amount: f64) -> Self {
        if amount.is_finite() && amount > 0.0 {
            Self { amount }
        } else {
            Self { amount: 0.0 }
        }
    }

    pub fn zero() -> Self {
        Self { amount: 0.0 }
    }

    /// Parse a price as written in a page, e.g. "1.25", "$1.25" or "1,299.00"
    pub fn parse(text: &str) -> Option<Self> {
        let cleaned = text
            .trim()
            .trim_start_matches("CA")
            .trim_start_matches('$')
            .replace(',', "");
        cleaned
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite() && *amount >= 0.0)
            .map(Price::new)
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        (self.amount - other.amount).abs() < 1e-9
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.amount.partial_cmp(&other.amount)
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, other: Price) -> Price {
        Price::new(self.amount + other.amount)
    }
}

impl Mul<u32> for Price {
    type Output = Price;

    fn mul(self, count: u32) -> Price {
        Price::new(self.amount * count as f64)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::zero(), |acc, price| acc + price)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_prices() {
        assert_eq!(Price::parse("1.25"), Some(Price::new(1.25)));
        assert_eq!(Price::parse(" $0.30 "), Some(Price::new(0.3)));
        assert_eq!(Price::parse("CA$1,299.99"), Some(Price::new(1299.99)));
        assert_eq!(Price::parse("free"), None);
        assert_eq!(Price::parse("-2.00"), None);
        assert_eq!(Price::parse(""), None);
    }

    #[test]
    fn test_price_arithmetic() {
        let total: Price = vec![Price::new(1.25) * 4, Price::new(0.5), Price::zero()]
            .into_iter()
            .sum();
        assert_eq!(total, Price::new(5.5));
        assert_eq!(total.to_string(), "$5.50");
        assert!(Price::new(0.1) < Price::new(0.2));
    }

    #[test]
    fn test_negative_amounts_become_zero() {
        assert_eq!(Price::new(-3.0), Price::zero());
        assert_eq!(Price::new(f64::NAN), Price::zero());
    }
}
