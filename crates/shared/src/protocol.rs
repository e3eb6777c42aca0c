use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{ProductId, PromotionId};

/// A promotion as returned by the promotions service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    #[serde(default)]
    pub id: Option<PromotionId>,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub from_date: String,
    #[serde(default)]
    pub to_date: String,
}

impl Promotion {
    /// `true` when the record ends before it starts.
    ///
    /// Dates are compared as calendar dates when both sides parse, otherwise
    /// as plain strings (ISO-like strings sort chronologically).
    pub fn ends_before_start(&self) -> bool {
        match (
            parse_calendar_date(&self.from_date),
            parse_calendar_date(&self.to_date),
        ) {
            (Some(from), Some(to)) => to < from,
            _ => self.to_date < self.from_date,
        }
    }
}

/// Request body for create, update and expire.
///
/// Numeric fields that could not be read from the form are sent as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionPayload {
    pub id: Option<PromotionId>,
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub category: String,
    pub amount: Option<i64>,
    pub description: String,
    pub from_date: String,
    pub to_date: String,
}

/// Date-only prefix of an ISO-like timestamp (`2024-01-01T00:00:00` -> `2024-01-01`).
pub fn date_prefix(raw: &str) -> &str {
    match raw.char_indices().nth(10) {
        Some((idx, _)) => &raw[..idx],
        None => raw,
    }
}

pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_prefix(raw.trim()), "%Y-%m-%d").ok()
}
