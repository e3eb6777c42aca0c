use std::fmt;

use url::form_urlencoded;

use crate::form::{parse_leading_int, PromotionField, PromotionUi};

/// Filters in the order they appear in the query string.
const SEARCH_FILTERS: [PromotionField; 6] = [
    PromotionField::Id,
    PromotionField::ProductId,
    PromotionField::ProductName,
    PromotionField::Category,
    PromotionField::FromDate,
    PromotionField::ToDate,
];

/// Filters the service accepts that have no input on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraFilter {
    Available(bool),
    Status(String),
}

impl ExtraFilter {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Available(_) => "available",
            Self::Status(_) => "status",
        }
    }

    fn value(&self) -> String {
        match self {
            Self::Available(available) => available.to_string(),
            Self::Status(status) => status.trim().to_string(),
        }
    }
}

/// Query for `GET /promotions`, one parameter per populated filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    params: Vec<(&'static str, String)>,
}

impl SearchQuery {
    pub fn from_form<U: PromotionUi + ?Sized>(ui: &U) -> Self {
        let mut query = Self::default();
        for field in SEARCH_FILTERS {
            let raw = ui.field(field);
            let value = match field {
                PromotionField::Id => parse_leading_int(&raw).map(|id| id.to_string()),
                _ => Some(raw.trim().to_string()).filter(|value| !value.is_empty()),
            };
            if let Some(value) = value {
                query.params.push((field.name(), value));
            }
        }
        query
    }

    /// Appends `filter` after the form filters, replacing an earlier filter
    /// with the same key. A blank status drops the status filter.
    pub fn with_filter(mut self, filter: ExtraFilter) -> Self {
        let key = filter.key();
        let value = filter.value();
        self.params.retain(|(existing, _)| *existing != key);
        if !value.is_empty() {
            self.params.push((key, value));
        }
        self
    }

    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// `key=value` pairs joined by `&`, url-encoded.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter().map(|(key, value)| (*key, value.as_str())))
            .finish()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}
