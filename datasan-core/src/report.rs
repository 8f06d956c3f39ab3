//! Result types returned by validation and reporting.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Outcome of scanning text for residual PII.
///
/// `is_safe` is true exactly when `found_pii` is empty. Callers must not
/// transmit text whose result is unsafe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_safe: bool,
    pub found_pii: BTreeSet<String>,
}

impl ValidationResult {
    pub fn from_categories(found_pii: BTreeSet<String>) -> Self {
        Self {
            is_safe: found_pii.is_empty(),
            found_pii,
        }
    }

    pub fn found(&self, category: &str) -> bool {
        self.found_pii.contains(category)
    }
}

/// Audit view of one sanitization: what was removed and how the size changed.
///
/// Lengths are in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizationReport {
    pub pii_removed: BTreeMap<String, usize>,
    pub original_length: usize,
    pub sanitized_length: usize,
}

impl SanitizationReport {
    pub fn total_removed(&self) -> usize {
        self.pii_removed.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safety_follows_the_category_set() {
        assert!(ValidationResult::from_categories(BTreeSet::new()).is_safe);

        let unsafe_result =
            ValidationResult::from_categories(["email".to_string()].into_iter().collect());
        assert!(!unsafe_result.is_safe);
        assert!(unsafe_result.found("email"));
        assert!(!unsafe_result.found("ssn"));
    }

    #[test]
    fn report_serializes_with_stable_field_names() {
        let report = SanitizationReport {
            pii_removed: [("email".to_string(), 2), ("ssn".to_string(), 1)].into_iter().collect(),
            original_length: 80,
            sanitized_length: 64,
        };
        assert_eq!(report.total_removed(), 3);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["pii_removed"]["email"], 2);
        assert_eq!(json["original_length"], 80);
        assert_eq!(json["sanitized_length"], 64);
    }
}
