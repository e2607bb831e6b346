use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One itemized charge extracted from a receipt by the upstream extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    /// Per-line vendor when the extractor provides one; otherwise the
    /// parent receipt's vendor applies.
    #[serde(default)]
    pub vendor: Option<String>,
    pub amount: Decimal,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Input envelope: one receipt with its extracted line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub vendor: String,
    /// YYYY-MM-DD
    pub date: String,
    pub currency: String,
    pub total: Decimal,
    pub line_items: Vec<LineItem>,
}

/// A line item after classification. Created once per item per request.
#[derive(Debug, Clone, Serialize)]
pub struct CategorizedLineItem {
    pub item: LineItem,
    /// None means the fallback category was assigned.
    pub rule_id: Option<String>,
    pub category: String,
    pub confidence: f64,
    pub deductible: Decimal,
    pub special_treatment: Option<String>,
    /// Audit note, e.g. why an item fell back.
    pub note: Option<String>,
}

/// Per-line-item audit record carried in the summary.
#[derive(Debug, Clone, Serialize)]
pub struct RuleApplication {
    pub description: String,
    pub vendor: Option<String>,
    pub amount: Decimal,
    pub rule_id: Option<String>,
    pub category: String,
    pub confidence: f64,
    pub deductible: Decimal,
    pub special_treatment: Option<String>,
    pub note: Option<String>,
}

/// Deductible subtotal for one category.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySubtotal {
    pub category: String,
    pub deductible: Decimal,
}

/// Aggregate output for one receipt. Categories appear in order of first
/// occurrence; `applications` preserves line-item order and includes
/// fallback items.
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseSummary {
    pub vendor: String,
    pub date: String,
    pub currency: String,
    pub total_amount: Decimal,
    pub total_deductible: Decimal,
    pub by_category: Vec<CategorySubtotal>,
    pub applications: Vec<RuleApplication>,
}
