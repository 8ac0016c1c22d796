//! Transaction list filter
//!
//! Immutable request parameters for listing transactions. Built once per
//! request from the raw query string and handed to the query service.

use std::str::FromStr;

use chrono::Month;
use rust_decimal::Decimal;

use super::month::parse_optional_month;
use super::DomainError;

/// Default page size for the transaction list
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Free-text search term.
///
/// Matches `title` or `description` by case-insensitive substring, or
/// `price` by equality with [`SearchTerm::price`]. The price is read from
/// the longest numeric prefix of the term (`"50 shirts"` compares against
/// 50). A term with no numeric prefix compares against a price of zero, so
/// it also matches every record priced at exactly 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    text: String,
    price: Option<Decimal>,
}

impl SearchTerm {
    /// Build a search term; empty input means "no search"
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }

        Some(Self {
            text: raw.to_string(),
            price: leading_price(raw),
        })
    }

    /// The raw search text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Price the term is compared against.
    ///
    /// `None` when the numeric prefix is too large for a price, in which
    /// case no record matches on price.
    pub fn price(&self) -> Option<Decimal> {
        self.price
    }

    /// Case-insensitive substring match
    pub fn matches_text(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.text.to_lowercase())
    }

    /// SQL `LIKE` pattern with wildcards in the term escaped
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.text.len() + 2);
        pattern.push('%');
        for c in self.text.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

/// Filter and page selection for the transaction list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionFilter {
    pub month: Option<Month>,
    pub search: Option<SearchTerm>,
    /// 1-based page number
    pub page: u32,
    pub per_page: u32,
}

impl Default for TransactionFilter {
    fn default() -> Self {
        Self {
            month: None,
            search: None,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl TransactionFilter {
    /// Build a filter from raw query parameters
    pub fn from_params(
        month: Option<&str>,
        search: Option<&str>,
        page: Option<&str>,
        per_page: Option<&str>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            month: parse_optional_month(month)?,
            search: search.and_then(SearchTerm::parse),
            page: parse_positive("page", page, 1)?,
            per_page: parse_positive("perPage", per_page, DEFAULT_PER_PAGE)?,
        })
    }

    /// Number of records skipped before this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    /// Maximum number of records on this page
    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }

    /// `ceil(total / per_page)`
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.per_page))
    }
}

fn parse_positive(name: &'static str, raw: Option<&str>, default: u32) -> Result<u32, DomainError> {
    match raw {
        None | Some("") => Ok(default),
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(DomainError::invalid_pagination(name, raw)),
        },
    }
}

fn count_digits(s: &str) -> usize {
    s.bytes().take_while(|b| b.is_ascii_digit()).count()
}

/// Exponent digits (with sign) if `s` starts with a complete exponent
fn exponent_prefix(s: &str) -> Option<String> {
    let rest = s.strip_prefix(['e', 'E'])?;
    let (sign, rest) = match rest.as_bytes().first() {
        Some(b'-') => ("-", &rest[1..]),
        Some(b'+') => ("", &rest[1..]),
        _ => ("", rest),
    };
    match count_digits(rest) {
        0 => None,
        n => Some(format!("{}{}", sign, &rest[..n])),
    }
}

/// Price read from the longest numeric prefix of `raw`, after leading
/// whitespace: optional sign, digits, optional fraction and exponent.
///
/// No prefix reads as zero. A prefix that does not fit a `Decimal` reads as
/// `None`.
fn leading_price(raw: &str) -> Option<Decimal> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    if rest.starts_with("Infinity") {
        return None;
    }

    let int_len = count_digits(rest);
    let (int_part, after_int) = rest.split_at(int_len);
    let (frac_part, after_number) = match after_int.strip_prefix('.') {
        Some(tail) => tail.split_at(count_digits(tail)),
        None => ("", after_int),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Some(Decimal::ZERO);
    }

    let mantissa = format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        if int_part.is_empty() { "0" } else { int_part },
        if frac_part.is_empty() { "0" } else { frac_part },
    );

    match exponent_prefix(after_number) {
        Some(exponent) => Decimal::from_scientific(&format!("{}e{}", mantissa, exponent)).ok(),
        None => Decimal::from_str(&mantissa).ok(),
    }
}
