//! Price buckets for the price-range histogram
//!
//! Ten fixed buckets in a fixed order. Labels, bounds and order are part of
//! the HTTP contract.
//!
//! Buckets are closed on the right: a bucket holds prices strictly above the
//! previous bucket's upper bound and up to its own. For whole-number prices
//! this is the inclusive `0-100`, `101-200`, … partition; fractional prices
//! such as `100.50` land in the next bucket up instead of falling between two.

use rust_decimal::Decimal;

/// One histogram bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    /// Label used in API responses and on the chart axis
    pub label: &'static str,
    lower: Option<i64>,
    upper: Option<i64>,
}

impl PriceRange {
    const fn new(label: &'static str, lower: Option<i64>, upper: Option<i64>) -> Self {
        Self {
            label,
            lower,
            upper,
        }
    }

    /// All buckets in response order
    pub const ALL: [PriceRange; 10] = [
        PriceRange::new("0-100", None, Some(100)),
        PriceRange::new("101-200", Some(100), Some(200)),
        PriceRange::new("201-300", Some(200), Some(300)),
        PriceRange::new("301-400", Some(300), Some(400)),
        PriceRange::new("401-500", Some(400), Some(500)),
        PriceRange::new("501-600", Some(500), Some(600)),
        PriceRange::new("601-700", Some(600), Some(700)),
        PriceRange::new("701-800", Some(700), Some(800)),
        PriceRange::new("801-900", Some(800), Some(900)),
        PriceRange::new("901-above", Some(900), None),
    ];

    /// Exclusive lower bound, `None` for the first bucket
    pub fn lower_exclusive(&self) -> Option<Decimal> {
        self.lower.map(Decimal::from)
    }

    /// Inclusive upper bound, `None` for the last bucket
    pub fn upper_inclusive(&self) -> Option<Decimal> {
        self.upper.map(Decimal::from)
    }

    /// Whether `price` falls into this bucket
    pub fn contains(&self, price: Decimal) -> bool {
        let above_lower = self.lower_exclusive().map_or(true, |lower| price > lower);
        let below_upper = self.upper_inclusive().map_or(true, |upper| price <= upper);
        above_lower && below_upper
    }

    /// Index into [`PriceRange::ALL`] of the bucket holding `price`
    pub fn index_for(price: Decimal) -> usize {
        Self::ALL
            .iter()
            .position(|range| range.contains(price))
            .unwrap_or(Self::ALL.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bucket_order_and_labels() {
        let labels: Vec<&str> = PriceRange::ALL.iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            vec![
                "0-100", "101-200", "201-300", "301-400", "401-500", "501-600", "601-700",
                "701-800", "801-900", "901-above"
            ]
        );
    }

    #[test]
    fn test_inclusive_whole_number_bounds() {
        assert_eq!(PriceRange::index_for(dec!(0)), 0);
        assert_eq!(PriceRange::index_for(dec!(100)), 0);
        assert_eq!(PriceRange::index_for(dec!(101)), 1);
        assert_eq!(PriceRange::index_for(dec!(200)), 1);
        assert_eq!(PriceRange::index_for(dec!(900)), 8);
        assert_eq!(PriceRange::index_for(dec!(901)), 9);
        assert_eq!(PriceRange::index_for(dec!(100000)), 9);
    }

    #[test]
    fn test_fractional_prices_have_no_gap() {
        assert_eq!(PriceRange::index_for(dec!(100.01)), 1);
        assert_eq!(PriceRange::index_for(dec!(100.5)), 1);
        assert_eq!(PriceRange::index_for(dec!(900.99)), 9);
    }

    #[test]
    fn test_every_price_in_exactly_one_bucket() {
        for cents in (0..120_000).step_by(37) {
            let price = Decimal::new(cents, 2);
            let matching = PriceRange::ALL
                .iter()
                .filter(|range| range.contains(price))
                .count();
            assert_eq!(matching, 1, "price {} matched {} buckets", price, matching);
        }
    }

    #[test]
    fn test_bounds() {
        let first = PriceRange::ALL[0];
        assert_eq!(first.lower_exclusive(), None);
        assert_eq!(first.upper_inclusive(), Some(dec!(100)));

        let last = PriceRange::ALL[9];
        assert_eq!(last.lower_exclusive(), Some(dec!(900)));
        assert_eq!(last.upper_inclusive(), None);
    }
}
