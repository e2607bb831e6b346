use std::path::Path;

use regex::{Regex, RegexBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ClerkError, Result};

// ---------------------------------------------------------------------------
// Config shapes (serde)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchField {
    Description,
    #[serde(alias = "vendor_name")]
    Vendor,
    #[serde(alias = "amount_range")]
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    Exact,
    Substring,
    Regex,
    #[serde(alias = "numeric_range")]
    Range,
}

/// One matcher inside a rule: (field, strategy, value) or an amount range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSpec {
    pub field: MatchField,
    #[serde(rename = "match")]
    pub strategy: MatchStrategy,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub min: Option<Decimal>,
    #[serde(default)]
    pub max: Option<Decimal>,
}

/// Confidence bump applied when the item (or receipt) vendor is in the set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorBoost {
    pub vendors: Vec<String>,
    pub delta: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    pub id: String,
    pub priority: i64,
    pub category: String,
    pub patterns: Vec<PatternSpec>,
    pub deductibility_percent: Decimal,
    #[serde(default)]
    pub special_treatment: Option<String>,
    #[serde(default)]
    pub vendor_boost: Option<VendorBoost>,
}

/// Assigned when no rule matches a line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackSpec {
    #[serde(default = "default_fallback_category")]
    pub category: String,
    #[serde(default = "default_fallback_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub deductibility_percent: Decimal,
}

fn default_fallback_category() -> String {
    "Uncategorized".to_string()
}

fn default_fallback_confidence() -> f64 {
    0.2
}

impl Default for FallbackSpec {
    fn default() -> Self {
        Self {
            category: default_fallback_category(),
            confidence: default_fallback_confidence(),
            deductibility_percent: Decimal::ZERO,
        }
    }
}

/// On-disk rules file: fallback spec plus the ordered rule list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub fallback: FallbackSpec,
    pub rules: Vec<RuleConfig>,
}

// ---------------------------------------------------------------------------
// Compiled rule set
// ---------------------------------------------------------------------------

/// A pattern with its regex compiled and text lowered for case-insensitive
/// comparison. Compilation happens once at load; matching cannot fail.
#[derive(Debug, Clone)]
pub enum CompiledPattern {
    Exact { field: MatchField, value: String },
    Substring { field: MatchField, value: String },
    Regex { field: MatchField, regex: Regex },
    Range { min: Decimal, max: Decimal },
}

#[derive(Debug, Clone)]
pub struct CompiledVendorBoost {
    /// Lowercased vendor names, matched by containment.
    pub vendors: Vec<String>,
    pub delta: f64,
}

#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub id: String,
    pub priority: i64,
    pub category: String,
    pub patterns: Vec<CompiledPattern>,
    pub deductibility_percent: Decimal,
    pub special_treatment: Option<String>,
    pub vendor_boost: Option<CompiledVendorBoost>,
}

/// Validated, immutable rule set. Built once at load or reload and shared
/// read-only across classification requests.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub rules: Vec<CompiledRule>,
    pub fallback: FallbackSpec,
}

impl RuleSet {
    pub fn load(path: &Path) -> Result<RuleSet> {
        let content = std::fs::read_to_string(path)?;
        let config: RulesConfig = serde_json::from_str(&content)?;
        Self::from_config(config)
    }

    /// Validate and compile. Bad config fails here, never at match time.
    pub fn from_config(config: RulesConfig) -> Result<RuleSet> {
        validate_fallback(&config.fallback)?;

        let mut seen_ids: Vec<&str> = Vec::new();
        let mut seen_priorities: Vec<(i64, &str)> = Vec::new();
        for rule in &config.rules {
            if seen_ids.contains(&rule.id.as_str()) {
                return Err(ClerkError::DuplicateRuleId(rule.id.clone()));
            }
            seen_ids.push(&rule.id);
            if let Some((_, first)) = seen_priorities.iter().find(|(p, _)| *p == rule.priority) {
                return Err(ClerkError::DuplicatePriority {
                    first: first.to_string(),
                    second: rule.id.clone(),
                    priority: rule.priority,
                });
            }
            seen_priorities.push((rule.priority, &rule.id));
        }

        let rules = config
            .rules
            .iter()
            .map(compile_rule)
            .collect::<Result<Vec<_>>>()?;

        Ok(RuleSet {
            rules,
            fallback: config.fallback,
        })
    }
}

fn validate_fallback(fallback: &FallbackSpec) -> Result<()> {
    if !(0.0..=0.3).contains(&fallback.confidence) {
        return Err(ClerkError::InvalidFallback(format!(
            "confidence {} outside 0-0.3",
            fallback.confidence
        )));
    }
    if fallback.deductibility_percent < Decimal::ZERO
        || fallback.deductibility_percent > Decimal::from(100)
    {
        return Err(ClerkError::InvalidFallback(format!(
            "deductibility_percent {} outside 0-100",
            fallback.deductibility_percent
        )));
    }
    Ok(())
}

fn compile_rule(rule: &RuleConfig) -> Result<CompiledRule> {
    if rule.patterns.is_empty() {
        return Err(ClerkError::EmptyPatterns(rule.id.clone()));
    }
    if rule.deductibility_percent < Decimal::ZERO
        || rule.deductibility_percent > Decimal::from(100)
    {
        return Err(ClerkError::InvalidPercent {
            rule_id: rule.id.clone(),
            percent: rule.deductibility_percent.to_string(),
        });
    }

    let patterns = rule
        .patterns
        .iter()
        .map(|p| compile_pattern(&rule.id, p))
        .collect::<Result<Vec<_>>>()?;

    let vendor_boost = match &rule.vendor_boost {
        Some(boost) => {
            if boost.vendors.is_empty() {
                return Err(ClerkError::Other(format!(
                    "Rule '{}': vendor_boost with empty vendor list",
                    rule.id
                )));
            }
            if !(0.0..=1.0).contains(&boost.delta) {
                return Err(ClerkError::Other(format!(
                    "Rule '{}': vendor_boost delta {} outside 0-1",
                    rule.id, boost.delta
                )));
            }
            Some(CompiledVendorBoost {
                vendors: boost.vendors.iter().map(|v| v.to_lowercase()).collect(),
                delta: boost.delta,
            })
        }
        None => None,
    };

    Ok(CompiledRule {
        id: rule.id.clone(),
        priority: rule.priority,
        category: rule.category.clone(),
        patterns,
        deductibility_percent: rule.deductibility_percent,
        special_treatment: rule.special_treatment.clone(),
        vendor_boost,
    })
}

fn compile_pattern(rule_id: &str, spec: &PatternSpec) -> Result<CompiledPattern> {
    match spec.strategy {
        MatchStrategy::Range => {
            if spec.field != MatchField::Amount {
                return Err(ClerkError::Other(format!(
                    "Rule '{rule_id}': range match only applies to the amount field"
                )));
            }
            let min = spec.min.unwrap_or(Decimal::MIN);
            let max = spec.max.unwrap_or(Decimal::MAX);
            if min > max {
                return Err(ClerkError::InvalidRange {
                    rule_id: rule_id.to_string(),
                    min: min.to_string(),
                    max: max.to_string(),
                });
            }
            Ok(CompiledPattern::Range { min, max })
        }
        strategy => {
            if spec.field == MatchField::Amount {
                return Err(ClerkError::Other(format!(
                    "Rule '{rule_id}': amount field requires a range match"
                )));
            }
            let value = match spec.value.as_deref() {
                Some(v) if !v.is_empty() => v,
                _ => {
                    return Err(ClerkError::Other(format!(
                        "Rule '{rule_id}': pattern missing a value"
                    )))
                }
            };
            match strategy {
                MatchStrategy::Exact => Ok(CompiledPattern::Exact {
                    field: spec.field,
                    value: value.to_lowercase(),
                }),
                MatchStrategy::Substring => Ok(CompiledPattern::Substring {
                    field: spec.field,
                    value: value.to_lowercase(),
                }),
                MatchStrategy::Regex => {
                    let regex = RegexBuilder::new(value)
                        .case_insensitive(true)
                        .build()
                        .map_err(|source| ClerkError::InvalidRegex {
                            rule_id: rule_id.to_string(),
                            pattern: value.to_string(),
                            source,
                        })?;
                    Ok(CompiledPattern::Regex {
                        field: spec.field,
                        regex,
                    })
                }
                MatchStrategy::Range => unreachable!(),
            }
        }
    }
}
