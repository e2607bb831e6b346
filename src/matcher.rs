use crate::models::{LineItem, Receipt};
use crate::rules::{CompiledPattern, CompiledRule, MatchField};

// Strategy weights: tighter strategies score higher, so a rule matched on
// exact fields outranks one matched on loose containment.
const WEIGHT_EXACT: f64 = 1.0;
const WEIGHT_REGEX: f64 = 0.9;
const WEIGHT_RANGE: f64 = 0.8;
const WEIGHT_SUBSTRING: f64 = 0.7;

/// A rule that matched one line item, with its raw (unboosted) confidence.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub rule: &'a CompiledRule,
    pub confidence: f64,
}

fn field_text<'a>(receipt: &'a Receipt, item: &'a LineItem, field: MatchField) -> &'a str {
    match field {
        MatchField::Description => &item.description,
        MatchField::Vendor => item.vendor.as_deref().unwrap_or(&receipt.vendor),
        // Amount is only reachable through Range patterns.
        MatchField::Amount => "",
    }
}

/// Evaluate one rule against one line item. All patterns must match
/// (conjunctive); base confidence is the mean of the matched strategy
/// weights, so the same input always yields the same score.
pub fn match_rule<'a>(
    receipt: &Receipt,
    item: &LineItem,
    rule: &'a CompiledRule,
) -> Option<Candidate<'a>> {
    let mut weight_sum = 0.0;
    for pattern in &rule.patterns {
        let weight = match pattern {
            CompiledPattern::Exact { field, value } => {
                if field_text(receipt, item, *field).to_lowercase() == *value {
                    WEIGHT_EXACT
                } else {
                    return None;
                }
            }
            CompiledPattern::Substring { field, value } => {
                if field_text(receipt, item, *field).to_lowercase().contains(value.as_str()) {
                    WEIGHT_SUBSTRING
                } else {
                    return None;
                }
            }
            CompiledPattern::Regex { field, regex } => {
                if regex.is_match(field_text(receipt, item, *field)) {
                    WEIGHT_REGEX
                } else {
                    return None;
                }
            }
            CompiledPattern::Range { min, max } => {
                if *min <= item.amount && item.amount <= *max {
                    WEIGHT_RANGE
                } else {
                    return None;
                }
            }
        };
        weight_sum += weight;
    }
    Some(Candidate {
        rule,
        confidence: weight_sum / rule.patterns.len() as f64,
    })
}

/// Evaluate every rule in order; each rule is checked at most once per item.
pub fn candidates<'a>(
    receipt: &Receipt,
    item: &LineItem,
    rules: &'a [CompiledRule],
) -> Vec<Candidate<'a>> {
    rules
        .iter()
        .filter_map(|rule| match_rule(receipt, item, rule))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{MatchStrategy, PatternSpec, RuleConfig, RuleSet, RulesConfig};
    use rust_decimal_macros::dec;

    fn receipt(vendor: &str) -> Receipt {
        Receipt {
            vendor: vendor.to_string(),
            date: "2025-06-14".to_string(),
            currency: "CAD".to_string(),
            total: dec!(470.00),
            line_items: vec![],
        }
    }

    fn item(description: &str, amount: rust_decimal::Decimal) -> LineItem {
        LineItem {
            description: description.to_string(),
            vendor: None,
            amount,
            currency: None,
        }
    }

    fn compiled(patterns: Vec<PatternSpec>) -> CompiledRule {
        let config = RulesConfig {
            fallback: Default::default(),
            rules: vec![RuleConfig {
                id: "r1".to_string(),
                priority: 10,
                category: "Travel-Lodging".to_string(),
                patterns,
                deductibility_percent: dec!(100),
                special_treatment: None,
                vendor_boost: None,
            }],
        };
        RuleSet::from_config(config).unwrap().rules.remove(0)
    }

    fn pattern(field: MatchField, strategy: MatchStrategy, value: &str) -> PatternSpec {
        PatternSpec {
            field,
            strategy,
            value: Some(value.to_string()),
            min: None,
            max: None,
        }
    }

    #[test]
    fn test_substring_is_case_insensitive() {
        let rule = compiled(vec![pattern(
            MatchField::Description,
            MatchStrategy::Substring,
            "ROOM",
        )]);
        let hit = match_rule(&receipt("Marriott"), &item("Deluxe room charge", dec!(270)), &rule);
        assert!((hit.unwrap().confidence - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_exact_requires_full_equality() {
        let rule = compiled(vec![pattern(
            MatchField::Description,
            MatchStrategy::Exact,
            "room charge",
        )]);
        let r = receipt("Marriott");
        assert!(match_rule(&r, &item("Room Charge", dec!(270)), &rule).is_some());
        assert!(match_rule(&r, &item("Room Charge Extra", dec!(270)), &rule).is_none());
    }

    #[test]
    fn test_regex_search() {
        let rule = compiled(vec![pattern(
            MatchField::Description,
            MatchStrategy::Regex,
            r"\bgst\b",
        )]);
        let r = receipt("Marriott");
        let hit = match_rule(&r, &item("GST 5%", dec!(18.02)), &rule).unwrap();
        assert!((hit.confidence - 0.9).abs() < 1e-9);
        assert!(match_rule(&r, &item("gstqx", dec!(1)), &rule).is_none());
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let rule = compiled(vec![PatternSpec {
            field: MatchField::Amount,
            strategy: MatchStrategy::Range,
            value: None,
            min: Some(dec!(10)),
            max: Some(dec!(20)),
        }]);
        let r = receipt("Marriott");
        assert!(match_rule(&r, &item("x", dec!(10)), &rule).is_some());
        assert!(match_rule(&r, &item("x", dec!(20)), &rule).is_some());
        assert!(match_rule(&r, &item("x", dec!(20.01)), &rule).is_none());
    }

    #[test]
    fn test_conjunctive_all_patterns_must_match() {
        let rule = compiled(vec![
            pattern(MatchField::Description, MatchStrategy::Substring, "fee"),
            pattern(MatchField::Vendor, MatchStrategy::Substring, "marriott"),
        ]);
        assert!(match_rule(&receipt("Marriott Downtown"), &item("Resort Fee", dec!(30)), &rule).is_some());
        assert!(match_rule(&receipt("Hilton"), &item("Resort Fee", dec!(30)), &rule).is_none());
    }

    #[test]
    fn test_vendor_field_falls_back_to_receipt_vendor() {
        let rule = compiled(vec![pattern(
            MatchField::Vendor,
            MatchStrategy::Substring,
            "marriott",
        )]);
        let r = receipt("Marriott Downtown Calgary");
        let mut it = item("Room Charge", dec!(270));
        assert!(match_rule(&r, &it, &rule).is_some());
        it.vendor = Some("Hertz".to_string());
        assert!(match_rule(&r, &it, &rule).is_none());
    }

    #[test]
    fn test_mixed_strategy_confidence_is_mean() {
        let rule = compiled(vec![
            pattern(MatchField::Description, MatchStrategy::Exact, "room charge"),
            pattern(MatchField::Vendor, MatchStrategy::Substring, "marriott"),
        ]);
        let hit = match_rule(&receipt("Marriott"), &item("Room Charge", dec!(270)), &rule).unwrap();
        assert!((hit.confidence - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_candidates_preserve_rule_order() {
        let config = RulesConfig {
            fallback: Default::default(),
            rules: vec![
                RuleConfig {
                    id: "a".to_string(),
                    priority: 10,
                    category: "Travel-Lodging".to_string(),
                    patterns: vec![pattern(MatchField::Description, MatchStrategy::Substring, "room")],
                    deductibility_percent: dec!(100),
                    special_treatment: None,
                    vendor_boost: None,
                },
                RuleConfig {
                    id: "b".to_string(),
                    priority: 20,
                    category: "Travel-Meals".to_string(),
                    patterns: vec![pattern(MatchField::Description, MatchStrategy::Substring, "charge")],
                    deductibility_percent: dec!(50),
                    special_treatment: None,
                    vendor_boost: None,
                },
            ],
        };
        let ruleset = RuleSet::from_config(config).unwrap();
        let r = receipt("Marriott");
        let found = candidates(&r, &item("Room Charge", dec!(270)), &ruleset.rules);
        let ids: Vec<&str> = found.iter().map(|c| c.rule.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
