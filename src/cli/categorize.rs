use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::engine::Engine;
use crate::error::{ClerkError, Result};
use crate::fmt::money;
use crate::importer;
use crate::models::{ExpenseSummary, Receipt};
use crate::rules::RuleSet;
use crate::settings::resolve_rules_path;

pub fn run(
    file: &Path,
    rules_flag: Option<&Path>,
    vendor: Option<&str>,
    date: Option<&str>,
    currency: &str,
    json: bool,
) -> Result<()> {
    let ruleset = RuleSet::load(&resolve_rules_path(rules_flag))?;
    let engine = Engine::new(ruleset);
    let receipt = read_receipt(file, vendor, date, currency)?;
    let summary = engine.categorize_receipt(&receipt);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", format_summary(&summary));
    }
    Ok(())
}

fn read_receipt(
    file: &Path,
    vendor: Option<&str>,
    date: Option<&str>,
    currency: &str,
) -> Result<Receipt> {
    match file.extension().and_then(|e| e.to_str()) {
        Some("json") => importer::read_receipt_json(file),
        Some("csv") => {
            let (Some(vendor), Some(date)) = (vendor, date) else {
                return Err(ClerkError::Other(
                    "CSV input requires --vendor and --date".to_string(),
                ));
            };
            let items = importer::read_line_items_csv(file)?;
            importer::assemble_receipt(vendor, date, currency, items)
        }
        _ => Err(ClerkError::Other(format!(
            "Unsupported receipt file '{}' (expected .json or .csv)",
            file.display()
        ))),
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

pub(crate) fn format_summary(summary: &ExpenseSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n{} \u{00b7} {}\n\n",
        summary.vendor.bold(),
        summary.date,
        summary.currency
    ));

    let mut items = Table::new();
    items.set_header(vec![
        "Description",
        "Category",
        "Rule",
        "Conf",
        "Amount",
        "Deductible",
        "Treatment",
    ]);
    for app in &summary.applications {
        items.add_row(vec![
            Cell::new(&app.description),
            Cell::new(&app.category),
            Cell::new(app.rule_id.as_deref().unwrap_or("(fallback)")),
            Cell::new(format!("{:.2}", app.confidence)),
            Cell::new(money(app.amount)),
            Cell::new(money(app.deductible)),
            Cell::new(app.special_treatment.as_deref().unwrap_or("")),
        ]);
    }
    out.push_str(&format!("Line Items\n{items}\n\n"));

    let mut categories = Table::new();
    categories.set_header(vec!["Category", "Deductible"]);
    for subtotal in &summary.by_category {
        categories.add_row(vec![
            Cell::new(&subtotal.category),
            Cell::new(money(subtotal.deductible)),
        ]);
    }
    out.push_str(&format!("Deductible by Category\n{categories}\n\n"));

    out.push_str(&format!(
        "Total:      {}\nDeductible: {}\n",
        money(summary.total_amount),
        money(summary.total_deductible).green()
    ));
    out
}
