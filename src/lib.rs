//! Rules-based categorization of receipt line items into tax-relevant
//! expense categories, with per-category deductibility math and an audit
//! trail per line item. The CLI in `cli` is a thin wrapper; the engine
//! itself performs no I/O.

pub mod aggregator;
pub mod cli;
pub mod deduct;
pub mod engine;
pub mod error;
pub mod fmt;
pub mod importer;
pub mod matcher;
pub mod models;
pub mod resolver;
pub mod rules;
pub mod settings;

pub use engine::Engine;
pub use error::{ClerkError, Result};
pub use models::{CategorizedLineItem, ExpenseSummary, LineItem, Receipt};
pub use rules::{RuleSet, RulesConfig};
