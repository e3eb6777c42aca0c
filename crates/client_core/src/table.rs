use shared::protocol::{date_prefix, Promotion};

pub const RESULT_HEADERS: [&str; 6] = [
    "ID",
    "Product ID",
    "Product Name",
    "Category",
    "From",
    "To",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub from_date: String,
    pub to_date: String,
}

impl ResultRow {
    pub fn from_promotion(promotion: &Promotion) -> Self {
        Self {
            id: promotion.id.map(|id| id.to_string()).unwrap_or_default(),
            product_id: promotion
                .product_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            product_name: promotion.product_name.clone(),
            category: promotion.category.clone(),
            from_date: date_prefix(&promotion.from_date).to_string(),
            to_date: date_prefix(&promotion.to_date).to_string(),
        }
    }

    pub fn cells(&self) -> [&str; 6] {
        [
            self.id.as_str(),
            self.product_id.as_str(),
            self.product_name.as_str(),
            self.category.as_str(),
            self.from_date.as_str(),
            self.to_date.as_str(),
        ]
    }
}

/// Rows shown in the results container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Builds the search table, skipping records that end before they start.
    /// Also returns the first record that made it into the table.
    pub fn from_search(records: &[Promotion]) -> (Self, Option<&Promotion>) {
        let mut table = Self::default();
        let mut first = None;
        for record in records.iter().filter(|record| !record.ends_before_start()) {
            table.rows.push(ResultRow::from_promotion(record));
            first.get_or_insert(record);
        }
        (table, first)
    }

    pub fn single(promotion: &Promotion) -> Self {
        Self {
            rows: vec![ResultRow::from_promotion(promotion)],
        }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
