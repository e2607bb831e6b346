use std::path::{Path, PathBuf};

use crate::error::{ClerkError, Result};

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("clerk")
}

pub fn default_rules_path() -> PathBuf {
    config_dir().join("rules.json")
}

/// `--rules` flag wins; otherwise the config-dir default.
pub fn resolve_rules_path(flag: Option<&Path>) -> PathBuf {
    match flag {
        Some(path) => path.to_path_buf(),
        None => default_rules_path(),
    }
}

/// Starter rules written by `clerk init`: a small travel-expense set the
/// user edits in place.
pub const STARTER_RULES: &str = r#"{
  "fallback": {
    "category": "Uncategorized",
    "confidence": 0.2,
    "deductibility_percent": 0
  },
  "rules": [
    {
      "id": "lodging-room",
      "priority": 100,
      "category": "Travel-Lodging",
      "patterns": [
        { "field": "description", "match": "regex", "value": "\\b(room|suite|accommodation)\\b" }
      ],
      "deductibility_percent": 100
    },
    {
      "id": "tax-gst",
      "priority": 90,
      "category": "Tax-GST/HST",
      "patterns": [
        { "field": "description", "match": "regex", "value": "\\b(GST|HST)\\b" }
      ],
      "deductibility_percent": 100,
      "special_treatment": "input-tax-credit"
    },
    {
      "id": "meals",
      "priority": 80,
      "category": "Travel-Meals",
      "patterns": [
        { "field": "description", "match": "regex", "value": "restaurant|breakfast|lunch|dinner|meal" }
      ],
      "deductibility_percent": 50
    },
    {
      "id": "travel-taxes",
      "priority": 70,
      "category": "Travel-Taxes",
      "patterns": [
        { "field": "description", "match": "regex", "value": "levy|tourism|occupancy" }
      ],
      "deductibility_percent": 100
    },
    {
      "id": "prof-services",
      "priority": 60,
      "category": "Professional-Services",
      "patterns": [
        { "field": "description", "match": "regex", "value": "marketing|consulting|legal" }
      ],
      "deductibility_percent": 100
    },
    {
      "id": "lodging-fees",
      "priority": 50,
      "category": "Travel-Lodging",
      "patterns": [
        { "field": "description", "match": "substring", "value": "fee" }
      ],
      "deductibility_percent": 100,
      "vendor_boost": {
        "vendors": ["Marriott", "Hilton", "Fairmont", "Hyatt", "Best Western"],
        "delta": 0.3
      }
    }
  ]
}
"#;

/// Write the starter rules file, refusing to clobber an existing one.
/// Returns the path written.
pub fn write_starter_rules(path: Option<&Path>) -> Result<PathBuf> {
    let path = resolve_rules_path(path);
    if path.exists() {
        return Err(ClerkError::Settings(format!(
            "{} already exists (delete it first to start over)",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, STARTER_RULES)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{RuleSet, RulesConfig};

    #[test]
    fn test_starter_rules_validate() {
        let config: RulesConfig = serde_json::from_str(STARTER_RULES).unwrap();
        let ruleset = RuleSet::from_config(config).unwrap();
        assert!(ruleset.rules.len() >= 5);
        assert_eq!(ruleset.fallback.category, "Uncategorized");
    }

    #[test]
    fn test_write_starter_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        let written = write_starter_rules(Some(&path)).unwrap();
        assert_eq!(written, path);
        assert!(matches!(
            write_starter_rules(Some(&path)),
            Err(ClerkError::Settings(_))
        ));
    }

    #[test]
    fn test_resolve_rules_path_prefers_flag() {
        let flagged = resolve_rules_path(Some(Path::new("/tmp/custom.json")));
        assert_eq!(flagged, PathBuf::from("/tmp/custom.json"));
        let default = resolve_rules_path(None);
        assert!(default.ends_with("clerk/rules.json"));
    }
}
