use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::aggregator;
use crate::error::Result;
use crate::matcher;
use crate::models::{CategorizedLineItem, ExpenseSummary, Receipt};
use crate::resolver;
use crate::rules::RuleSet;

/// The classification engine. Holds the active rule set behind an
/// atomically swapped reference: a request clones the `Arc` once at entry
/// and runs to completion against that snapshot, so a concurrent reload
/// never tears a batch.
pub struct Engine {
    rules: RwLock<Arc<RuleSet>>,
}

impl Engine {
    pub fn new(ruleset: RuleSet) -> Self {
        Self {
            rules: RwLock::new(Arc::new(ruleset)),
        }
    }

    /// The currently-active rule set. Poisoning is recoverable here: the
    /// lock only guards an `Arc` assignment, which cannot be left torn.
    pub fn snapshot(&self) -> Arc<RuleSet> {
        match self.rules.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Swap in a new rule set. In-flight requests keep the snapshot they
    /// started with.
    pub fn reload(&self, ruleset: RuleSet) {
        let next = Arc::new(ruleset);
        match self.rules.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    /// Load, validate, and swap in a rules file. A bad file rejects the
    /// whole reload and leaves the active set untouched.
    pub fn reload_from(&self, path: &Path) -> Result<()> {
        let ruleset = RuleSet::load(path)?;
        self.reload(ruleset);
        Ok(())
    }

    /// Classify every line item of a receipt and fold the results into a
    /// summary. Total coverage: each item yields exactly one categorized
    /// record, falling back when nothing matches.
    pub fn categorize_receipt(&self, receipt: &Receipt) -> ExpenseSummary {
        let rules = self.snapshot();
        let categorized: Vec<CategorizedLineItem> = receipt
            .line_items
            .iter()
            .map(|item| {
                let found = matcher::candidates(receipt, item, &rules.rules);
                resolver::resolve(receipt, item, &found, &rules)
            })
            .collect();
        aggregator::summarize(receipt, &categorized)
    }
}
