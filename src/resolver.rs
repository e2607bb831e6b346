use crate::deduct::deductible_amount;
use crate::matcher::Candidate;
use crate::models::{CategorizedLineItem, LineItem, Receipt};
use crate::rules::{FallbackSpec, RuleSet};

/// Vendor-context boost stage, kept separate from base matching so the
/// override behavior is testable on its own. The boost consults the line
/// item's own vendor when present, else the parent receipt's vendor.
fn boosted_confidence(receipt: &Receipt, item: &LineItem, candidate: &Candidate) -> f64 {
    let Some(boost) = &candidate.rule.vendor_boost else {
        return candidate.confidence;
    };
    let vendor = item
        .vendor
        .as_deref()
        .unwrap_or(&receipt.vendor)
        .to_lowercase();
    if boost.vendors.iter().any(|v| vendor.contains(v.as_str())) {
        (candidate.confidence + boost.delta).min(1.0)
    } else {
        candidate.confidence
    }
}

/// Pick the winning rule for one line item. Ranking is (boosted confidence,
/// priority) descending; the winner's confidence is reported as boosted,
/// not renormalized. Zero candidates delegate to `fallback`.
pub fn resolve(
    receipt: &Receipt,
    item: &LineItem,
    candidates: &[Candidate],
    ruleset: &RuleSet,
) -> CategorizedLineItem {
    let mut best: Option<(f64, &Candidate)> = None;
    for candidate in candidates {
        let confidence = boosted_confidence(receipt, item, candidate);
        let wins = match &best {
            None => true,
            Some((best_confidence, best_candidate)) => {
                match confidence.total_cmp(best_confidence) {
                    std::cmp::Ordering::Greater => true,
                    std::cmp::Ordering::Less => false,
                    std::cmp::Ordering::Equal => {
                        candidate.rule.priority > best_candidate.rule.priority
                    }
                }
            }
        };
        if wins {
            best = Some((confidence, candidate));
        }
    }

    match best {
        None => fallback(item, &ruleset.fallback),
        Some((confidence, winner)) => CategorizedLineItem {
            item: item.clone(),
            rule_id: Some(winner.rule.id.clone()),
            category: winner.rule.category.clone(),
            confidence,
            deductible: deductible_amount(item.amount, winner.rule.deductibility_percent),
            special_treatment: winner.rule.special_treatment.clone(),
            note: None,
        },
    }
}

/// Total-coverage guarantee: every line item gets a classification, even
/// when no rule matches. Never fails.
pub fn fallback(item: &LineItem, spec: &FallbackSpec) -> CategorizedLineItem {
    CategorizedLineItem {
        item: item.clone(),
        rule_id: None,
        category: spec.category.clone(),
        confidence: spec.confidence,
        deductible: deductible_amount(item.amount, spec.deductibility_percent),
        special_treatment: None,
        note: Some("no rule matched".to_string()),
    }
}
