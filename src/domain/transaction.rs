//! Product transaction record
//!
//! The only entity in the system. The same shape is read from the seed feed,
//! persisted by the store and returned by the list endpoint.

use chrono::{DateTime, Datelike, Month, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::month::month_index;
use super::RecordError;

/// A product sale record.
///
/// `id` is the identifier from the source feed, not the store's key.
/// `dateOfSale` accepts any RFC 3339 offset and is held in UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTransaction {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub sold: bool,
    pub image: String,
    pub date_of_sale: DateTime<Utc>,
}

impl ProductTransaction {
    /// Check record invariants (`price >= 0`)
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.price < Decimal::ZERO {
            return Err(RecordError::NegativePrice {
                id: self.id,
                price: self.price,
            });
        }
        Ok(())
    }

    /// Whether the sale happened in `month`, in any year
    pub fn sold_in_month(&self, month: Month) -> bool {
        self.date_of_sale.month() == month_index(month)
    }
}
