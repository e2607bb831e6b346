use rust_decimal::Decimal;

use crate::models::{CategorizedLineItem, CategorySubtotal, ExpenseSummary, Receipt, RuleApplication};

/// Fold categorized line items into the receipt-level summary. Category
/// subtotals appear in order of first occurrence; the audit list covers
/// every item, fallback included, in original order.
pub fn summarize(receipt: &Receipt, items: &[CategorizedLineItem]) -> ExpenseSummary {
    let mut total_amount = Decimal::ZERO;
    let mut total_deductible = Decimal::ZERO;
    let mut by_category: Vec<CategorySubtotal> = Vec::new();
    let mut applications = Vec::with_capacity(items.len());

    for categorized in items {
        total_amount += categorized.item.amount;
        total_deductible += categorized.deductible;

        match by_category
            .iter_mut()
            .find(|subtotal| subtotal.category == categorized.category)
        {
            Some(subtotal) => subtotal.deductible += categorized.deductible,
            None => by_category.push(CategorySubtotal {
                category: categorized.category.clone(),
                deductible: categorized.deductible,
            }),
        }

        applications.push(RuleApplication {
            description: categorized.item.description.clone(),
            vendor: categorized.item.vendor.clone(),
            amount: categorized.item.amount,
            rule_id: categorized.rule_id.clone(),
            category: categorized.category.clone(),
            confidence: categorized.confidence,
            deductible: categorized.deductible,
            special_treatment: categorized.special_treatment.clone(),
            note: categorized.note.clone(),
        });
    }

    ExpenseSummary {
        vendor: receipt.vendor.clone(),
        date: receipt.date.clone(),
        currency: receipt.currency.clone(),
        total_amount,
        total_deductible,
        by_category,
        applications,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LineItem;
    use rust_decimal_macros::dec;

    fn receipt() -> Receipt {
        Receipt {
            vendor: "Marriott".to_string(),
            date: "2025-06-14".to_string(),
            currency: "CAD".to_string(),
            total: dec!(470.00),
            line_items: vec![],
        }
    }

    fn categorized(
        description: &str,
        amount: Decimal,
        category: &str,
        deductible: Decimal,
        rule_id: Option<&str>,
    ) -> CategorizedLineItem {
        CategorizedLineItem {
            item: LineItem {
                description: description.to_string(),
                vendor: None,
                amount,
                currency: None,
            },
            rule_id: rule_id.map(String::from),
            category: category.to_string(),
            confidence: 0.7,
            deductible,
            special_treatment: None,
            note: rule_id.is_none().then(|| "no rule matched".to_string()),
        }
    }

    fn sample() -> Vec<CategorizedLineItem> {
        vec![
            categorized("Room Charge", dec!(270.00), "Travel-Lodging", dec!(270.00), Some("room")),
            categorized("Dinner", dec!(80.00), "Travel-Meals", dec!(40.00), Some("meals")),
            categorized("Late Checkout", dec!(25.00), "Travel-Lodging", dec!(25.00), Some("room")),
            categorized("Mystery", dec!(5.00), "Uncategorized", dec!(0.00), None),
        ]
    }

    #[test]
    fn test_totals_and_subtotals() {
        let summary = summarize(&receipt(), &sample());
        assert_eq!(summary.total_amount, dec!(380.00));
        assert_eq!(summary.total_deductible, dec!(335.00));
        let subtotal_sum: Decimal = summary.by_category.iter().map(|s| s.deductible).sum();
        assert_eq!(subtotal_sum, summary.total_deductible);
    }

    #[test]
    fn test_category_order_is_first_occurrence() {
        let summary = summarize(&receipt(), &sample());
        let order: Vec<&str> = summary.by_category.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(order, vec!["Travel-Lodging", "Travel-Meals", "Uncategorized"]);
        assert_eq!(summary.by_category[0].deductible, dec!(295.00));
    }

    #[test]
    fn test_audit_list_covers_every_item_in_order() {
        let summary = summarize(&receipt(), &sample());
        assert_eq!(summary.applications.len(), 4);
        assert_eq!(summary.applications[3].rule_id, None);
        assert_eq!(summary.applications[3].note.as_deref(), Some("no rule matched"));
        let descriptions: Vec<&str> = summary
            .applications
            .iter()
            .map(|a| a.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["Room Charge", "Dinner", "Late Checkout", "Mystery"]);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let items = sample();
        let first = serde_json::to_string(&summarize(&receipt(), &items)).unwrap();
        let second = serde_json::to_string(&summarize(&receipt(), &items)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_receipt_summary() {
        let summary = summarize(&receipt(), &[]);
        assert_eq!(summary.total_amount, Decimal::ZERO);
        assert!(summary.by_category.is_empty());
        assert!(summary.applications.is_empty());
    }
}
