use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{ClerkError, Result};
use crate::models::{LineItem, Receipt};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a money string the way extractors emit them: `$1,234.56`,
/// quoted fields, parenthesized negatives.
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let s = raw.replace(',', "").replace('"', "").replace('$', "");
    let s = s.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        let amount: Decimal = inner
            .trim()
            .parse()
            .map_err(|_| ClerkError::InvalidAmount(raw.to_string()))?;
        return Ok(-amount);
    }
    s.parse()
        .map_err(|_| ClerkError::InvalidAmount(raw.to_string()))
}

/// Accept only YYYY-MM-DD; returns the normalized form.
pub fn validate_date(raw: &str) -> Result<String> {
    chrono::NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|_| ClerkError::InvalidDate(raw.to_string()))
}

// ---------------------------------------------------------------------------
// Receipt inputs — JSON document or CSV line-item export
// ---------------------------------------------------------------------------

pub fn read_receipt_json(path: &Path) -> Result<Receipt> {
    let content = std::fs::read_to_string(path)?;
    let mut receipt: Receipt = serde_json::from_str(&content)?;
    receipt.date = validate_date(&receipt.date)?;
    Ok(receipt)
}

/// Read line items from a CSV with `description` and `amount` columns;
/// `vendor` and `currency` columns are optional. Blank rows are skipped.
pub fn read_line_items_csv(path: &Path) -> Result<Vec<LineItem>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };
    let description_col = column("description")
        .ok_or_else(|| ClerkError::Other("CSV missing 'description' column".to_string()))?;
    let amount_col = column("amount")
        .ok_or_else(|| ClerkError::Other("CSV missing 'amount' column".to_string()))?;
    let vendor_col = column("vendor");
    let currency_col = column("currency");

    let mut items = Vec::new();
    for record in reader.records() {
        let record = record?;
        let description = record.get(description_col).unwrap_or("").trim().to_string();
        if description.is_empty() {
            continue;
        }
        let amount = parse_amount(record.get(amount_col).unwrap_or(""))?;
        let field = |col: Option<usize>| {
            col.and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        items.push(LineItem {
            description,
            vendor: field(vendor_col),
            amount,
            currency: field(currency_col),
        });
    }
    Ok(items)
}

/// Wrap bare line items in a receipt envelope (CSV input carries no
/// receipt header, so vendor/date/currency come from CLI flags).
pub fn assemble_receipt(
    vendor: &str,
    date: &str,
    currency: &str,
    line_items: Vec<LineItem>,
) -> Result<Receipt> {
    let total = line_items.iter().map(|item| item.amount).sum();
    Ok(Receipt {
        vendor: vendor.to_string(),
        date: validate_date(date)?,
        currency: currency.to_string(),
        total,
        line_items,
    })
}
