use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::rules::{CompiledPattern, RuleSet};
use crate::settings::resolve_rules_path;

pub fn list(rules_flag: Option<&Path>) -> Result<()> {
    let path = resolve_rules_path(rules_flag);
    let ruleset = RuleSet::load(&path)?;

    let mut sorted: Vec<_> = ruleset.rules.iter().collect();
    sorted.sort_by_key(|rule| std::cmp::Reverse(rule.priority));

    let mut table = Table::new();
    table.set_header(vec![
        "ID",
        "Priority",
        "Category",
        "Patterns",
        "Deductible %",
        "Treatment",
        "Boost",
    ]);
    for rule in sorted {
        let patterns = rule
            .patterns
            .iter()
            .map(describe_pattern)
            .collect::<Vec<_>>()
            .join(" AND ");
        let boost = rule
            .vendor_boost
            .as_ref()
            .map(|b| format!("+{} for {} vendor(s)", b.delta, b.vendors.len()))
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(&rule.id),
            Cell::new(rule.priority),
            Cell::new(&rule.category),
            Cell::new(patterns),
            Cell::new(rule.deductibility_percent),
            Cell::new(rule.special_treatment.as_deref().unwrap_or("")),
            Cell::new(boost),
        ]);
    }
    println!("Rules ({})\n{table}", path.display());
    println!(
        "Fallback: {} at confidence {}",
        ruleset.fallback.category, ruleset.fallback.confidence
    );
    Ok(())
}

pub fn check(rules_flag: Option<&Path>) -> Result<()> {
    let path = resolve_rules_path(rules_flag);
    let ruleset = RuleSet::load(&path)?;
    println!(
        "{} {} — {} rule(s), fallback '{}'",
        "OK".green().bold(),
        path.display(),
        ruleset.rules.len(),
        ruleset.fallback.category
    );
    Ok(())
}

fn describe_pattern(pattern: &CompiledPattern) -> String {
    match pattern {
        CompiledPattern::Exact { field, value } => format!("{field:?} == '{value}'"),
        CompiledPattern::Substring { field, value } => format!("{field:?} ~ '{value}'"),
        CompiledPattern::Regex { field, regex } => format!("{field:?} =~ /{}/", regex.as_str()),
        CompiledPattern::Range { min, max } => format!("amount in [{min}, {max}]"),
    }
}
