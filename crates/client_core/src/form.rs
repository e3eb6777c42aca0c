//! The promotion form: field ids, the UI seam, and the mapping between form
//! text and wire records.

use shared::{
    domain::{ProductId, PromotionId},
    protocol::{date_prefix, Promotion, PromotionPayload},
};

use crate::table::ResultTable;

/// Input fields bound to a single promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionField {
    Id,
    ProductId,
    ProductName,
    Category,
    Amount,
    Description,
    FromDate,
    ToDate,
}

impl PromotionField {
    pub const ALL: [PromotionField; 8] = [
        Self::Id,
        Self::ProductId,
        Self::ProductName,
        Self::Category,
        Self::Amount,
        Self::Description,
        Self::FromDate,
        Self::ToDate,
    ];

    /// Element id of the input on the admin page.
    pub fn element_id(self) -> &'static str {
        match self {
            Self::Id => "promotion_id",
            Self::ProductId => "promotion_product_id",
            Self::ProductName => "promotion_product_name",
            Self::Category => "promotion_category",
            Self::Amount => "promotion_amount",
            Self::Description => "promotion_description",
            Self::FromDate => "promotion_from_date",
            Self::ToDate => "promotion_to_date",
        }
    }

    /// Wire name of the field, also accepted by [`PromotionField::from_name`].
    pub fn name(self) -> &'static str {
        self.element_id().trim_start_matches("promotion_")
    }

    pub fn from_name(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.element_id() == raw || field.name() == raw)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Everything the adapter touches on the page.
pub trait PromotionUi {
    fn field(&self, field: PromotionField) -> String;
    fn set_field(&mut self, field: PromotionField, value: String);
    fn flash(&mut self, message: String);
    fn show_results(&mut self, table: ResultTable);
}

/// In-memory page state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    fields: [String; 8],
    flash: Option<String>,
    results: Option<ResultTable>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flash_message(&self) -> Option<&str> {
        self.flash.as_deref()
    }

    pub fn results(&self) -> Option<&ResultTable> {
        self.results.as_ref()
    }

    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(String::is_empty)
    }
}

impl PromotionUi for FormState {
    fn field(&self, field: PromotionField) -> String {
        self.fields[field.index()].clone()
    }

    fn set_field(&mut self, field: PromotionField, value: String) {
        self.fields[field.index()] = value;
    }

    fn flash(&mut self, message: String) {
        self.flash = Some(message);
    }

    fn show_results(&mut self, table: ResultTable) {
        self.results = Some(table);
    }
}

/// Reads the integer at the start of `raw`, ignoring leading whitespace and
/// any trailing garbage (`"12abc"` is 12). `None` when there is no digit.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    let sign_len = trimmed.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }
    let digits = unsigned
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(unsigned.len(), |(idx, _)| idx);
    if digits == 0 {
        return None;
    }
    trimmed[..sign_len + digits].parse().ok()
}

/// Path segment for an id typed into the form.
pub(crate) fn path_id(raw: &str) -> String {
    match parse_leading_int(raw) {
        Some(id) => id.to_string(),
        None => raw.trim().to_string(),
    }
}

pub fn read_payload<U: PromotionUi + ?Sized>(ui: &U) -> PromotionPayload {
    PromotionPayload {
        id: parse_leading_int(&ui.field(PromotionField::Id)).map(PromotionId),
        product_id: parse_leading_int(&ui.field(PromotionField::ProductId)).map(ProductId),
        product_name: ui.field(PromotionField::ProductName),
        category: ui.field(PromotionField::Category),
        amount: parse_leading_int(&ui.field(PromotionField::Amount)),
        description: ui.field(PromotionField::Description),
        from_date: ui.field(PromotionField::FromDate),
        to_date: ui.field(PromotionField::ToDate),
    }
}

/// Overwrites every field with `promotion`. Dates are shown date-only.
pub fn populate<U: PromotionUi + ?Sized>(ui: &mut U, promotion: &Promotion) {
    let number = |value: Option<i64>| value.map(|n| n.to_string()).unwrap_or_default();

    ui.set_field(PromotionField::Id, number(promotion.id.map(|id| id.0)));
    ui.set_field(
        PromotionField::ProductId,
        number(promotion.product_id.map(|id| id.0)),
    );
    ui.set_field(PromotionField::ProductName, promotion.product_name.clone());
    ui.set_field(PromotionField::Category, promotion.category.clone());
    ui.set_field(PromotionField::Amount, number(promotion.amount));
    ui.set_field(
        PromotionField::Description,
        promotion.description.clone().unwrap_or_default(),
    );
    ui.set_field(
        PromotionField::FromDate,
        date_prefix(&promotion.from_date).to_string(),
    );
    ui.set_field(
        PromotionField::ToDate,
        date_prefix(&promotion.to_date).to_string(),
    );
}

pub fn clear<U: PromotionUi + ?Sized>(ui: &mut U) {
    for field in PromotionField::ALL {
        ui.set_field(field, String::new());
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
