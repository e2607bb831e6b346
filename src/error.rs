use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClerkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Rule '{rule_id}': invalid regex '{pattern}': {source}")]
    InvalidRegex {
        rule_id: String,
        pattern: String,
        source: regex::Error,
    },

    #[error("Rule '{rule_id}': deductibility_percent {percent} outside 0-100")]
    InvalidPercent { rule_id: String, percent: String },

    #[error("Rule '{rule_id}': amount range min {min} exceeds max {max}")]
    InvalidRange {
        rule_id: String,
        min: String,
        max: String,
    },

    #[error("Rule '{0}': no patterns defined")]
    EmptyPatterns(String),

    #[error("Duplicate rule id '{0}'")]
    DuplicateRuleId(String),

    #[error("Rules '{first}' and '{second}' share priority {priority}")]
    DuplicatePriority {
        first: String,
        second: String,
        priority: i64,
    },

    #[error("Fallback config: {0}")]
    InvalidFallback(String),

    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ClerkError>;
