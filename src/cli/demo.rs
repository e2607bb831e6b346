use rust_decimal_macros::dec;

use crate::cli::categorize::format_summary;
use crate::engine::Engine;
use crate::error::Result;
use crate::models::{LineItem, Receipt};
use crate::rules::{
    MatchField, MatchStrategy, PatternSpec, RuleConfig, RuleSet, RulesConfig, VendorBoost,
};

struct DemoItem {
    description: &'static str,
    amount: rust_decimal::Decimal,
}

/// A one-night hotel folio: lodging, a half-deductible restaurant charge,
/// a "marketing fee" that only vendor context can place correctly, and
/// two tax lines.
fn folio() -> Vec<DemoItem> {
    vec![
        DemoItem { description: "Room Charge", amount: dec!(270.00) },
        DemoItem { description: "Restaurant Room Charge", amount: dec!(142.52) },
        DemoItem { description: "Marketing Fee", amount: dec!(25.00) },
        DemoItem { description: "GST", amount: dec!(18.02) },
        DemoItem { description: "Tourism Levy", amount: dec!(14.42) },
    ]
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

fn demo_rules() -> RulesConfig {
    RulesConfig {
        fallback: Default::default(),
        rules: vec![
            RuleConfig {
                id: "lodging-room".to_string(),
                priority: 100,
                category: "Travel-Lodging".to_string(),
                patterns: vec![pattern(
                    MatchField::Description,
                    MatchStrategy::Exact,
                    "room charge",
                )],
                deductibility_percent: dec!(100),
                special_treatment: None,
                vendor_boost: None,
            },
            RuleConfig {
                id: "tax-gst".to_string(),
                priority: 90,
                category: "Tax-GST/HST".to_string(),
                patterns: vec![pattern(
                    MatchField::Description,
                    MatchStrategy::Regex,
                    r"\b(GST|HST)\b",
                )],
                deductibility_percent: dec!(100),
                special_treatment: Some("input-tax-credit".to_string()),
                vendor_boost: None,
            },
            RuleConfig {
                id: "meals-restaurant".to_string(),
                priority: 80,
                category: "Travel-Meals".to_string(),
                patterns: vec![pattern(
                    MatchField::Description,
                    MatchStrategy::Substring,
                    "restaurant",
                )],
                deductibility_percent: dec!(50),
                special_treatment: None,
                vendor_boost: None,
            },
            RuleConfig {
                id: "travel-taxes".to_string(),
                priority: 70,
                category: "Travel-Taxes".to_string(),
                patterns: vec![pattern(
                    MatchField::Description,
                    MatchStrategy::Substring,
                    "levy",
                )],
                deductibility_percent: dec!(100),
                special_treatment: None,
                vendor_boost: None,
            },
            RuleConfig {
                id: "prof-services".to_string(),
                priority: 60,
                category: "Professional-Services".to_string(),
                patterns: vec![pattern(
                    MatchField::Description,
                    MatchStrategy::Substring,
                    "marketing",
                )],
                deductibility_percent: dec!(100),
                special_treatment: None,
                vendor_boost: None,
            },
            RuleConfig {
                id: "lodging-fees".to_string(),
                priority: 50,
                category: "Travel-Lodging".to_string(),
                patterns: vec![pattern(
                    MatchField::Description,
                    MatchStrategy::Substring,
                    "fee",
                )],
                deductibility_percent: dec!(100),
                special_treatment: None,
                vendor_boost: Some(VendorBoost {
                    vendors: vec![
                        "Marriott".to_string(),
                        "Hilton".to_string(),
                        "Fairmont".to_string(),
                    ],
                    delta: 0.3,
                }),
            },
        ],
    }
}

pub fn run() -> Result<()> {
    let items = folio();
    let total = items.iter().map(|item| item.amount).sum();
    let receipt = Receipt {
        vendor: "Marriott Downtown Calgary".to_string(),
        date: "2025-06-14".to_string(),
        currency: "CAD".to_string(),
        total,
        line_items: items
            .into_iter()
            .map(|item| LineItem {
                description: item.description.to_string(),
                vendor: None,
                amount: item.amount,
                currency: None,
            })
            .collect(),
    };

    let engine = Engine::new(RuleSet::from_config(demo_rules())?);
    let summary = engine.categorize_receipt(&receipt);
    print!("{}", format_summary(&summary));
    println!("\nNote how the hotel's \"Marketing Fee\" lands in Travel-Lodging:");
    println!("the vendor-context boost outranks the textual marketing match.");
    Ok(())
}
