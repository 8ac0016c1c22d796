//! Month filter
//!
//! Every dashboard filter works on the calendar month of `dateOfSale`,
//! independent of the year. Month names are matched exactly against the
//! full English names.

use chrono::Month;

use super::DomainError;

/// All months in calendar order
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Parse a case-sensitive English month name ("March") into a [`Month`].
pub fn parse_month(name: &str) -> Result<Month, DomainError> {
    MONTHS
        .iter()
        .copied()
        .find(|month| month.name() == name)
        .ok_or_else(|| DomainError::UnknownMonth(name.to_string()))
}

/// Parse an optional month query parameter. Empty strings count as absent.
pub fn parse_optional_month(name: Option<&str>) -> Result<Option<Month>, DomainError> {
    match name {
        Some(name) if !name.is_empty() => parse_month(name).map(Some),
        _ => Ok(None),
    }
}

/// Parse a month query parameter that must be present.
pub fn require_month(name: Option<&str>) -> Result<Month, DomainError> {
    parse_optional_month(name)?.ok_or(DomainError::MissingParameter("Month"))
}

/// 1-12 index of the month
pub fn month_index(month: Month) -> u32 {
    month.number_from_month()
}
