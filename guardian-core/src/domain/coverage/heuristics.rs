// guardian-core/src/domain/coverage/heuristics.rs
//
// Name-based heuristics deciding which tests a column should carry.
// The column type is never used on its own: only names carry enough signal.

use serde::Serialize;

use crate::domain::coverage::check::CheckKind;

const ID_PATTERNS: [&str; 4] = ["id", "_id", "uuid", "_key"];
const TIMESTAMP_PATTERNS: [&str; 4] = ["created_at", "updated_at", "deleted_at", "timestamp"];
const STATUS_PATTERNS: [&str; 4] = ["status", "state", "type", "_type"];

const PRIMARY_KEY_NAMES: [&str; 2] = ["id", "uuid"];
const CRITICAL_TIMESTAMPS: [&str; 2] = ["created_at", "updated_at"];

/// Role a column plays according to its name.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    ForeignKey,
    Identifier,
    Timestamp,
    Status,
}

/// Lower-cased view of a column and its owning model.
#[derive(Debug, Clone)]
pub struct ColumnProfile {
    name: String,
    model: String,
}

impl ColumnProfile {
    pub fn new(column_name: &str, model_name: &str) -> Self {
        Self {
            name: column_name.to_lowercase(),
            model: model_name.to_lowercase(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn key_prefix(&self) -> Option<&str> {
        self.name.strip_suffix("_id")
    }

    /// `id` or `uuid`
    pub fn is_primary_key_name(&self) -> bool {
        PRIMARY_KEY_NAMES.contains(&self.name.as_str())
    }

    /// The model's own key: `order_id` in `orders` (or in `order`).
    pub fn is_own_key(&self) -> bool {
        let Some(prefix) = self.key_prefix() else {
            return false;
        };
        !prefix.is_empty()
            && (prefix == self.model
                || prefix == self.model.trim_end_matches('s')
                || format!("{}s", prefix) == self.model)
    }

    pub fn is_foreign_key(&self) -> bool {
        self.key_prefix().is_some() && self.name != "id" && !self.is_own_key()
    }

    pub fn is_identifier(&self) -> bool {
        contains_any(&self.name, &ID_PATTERNS)
    }

    pub fn is_timestamp(&self) -> bool {
        contains_any(&self.name, &TIMESTAMP_PATTERNS)
    }

    pub fn is_status(&self) -> bool {
        contains_any(&self.name, &STATUS_PATTERNS)
    }
}

fn contains_any(name: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| name.contains(p))
}

// =============================================================================
//  1. RULE CASCADE
// =============================================================================

struct Rule {
    role: ColumnRole,
    matches: fn(&ColumnProfile) -> bool,
    checks: &'static [CheckKind],
}

/// Evaluated top to bottom, first match wins. The order matters: `user_id`
/// also contains `id`, and must be treated as a foreign key, not a key.
static CASCADE: [Rule; 4] = [
    Rule {
        role: ColumnRole::ForeignKey,
        matches: ColumnProfile::is_foreign_key,
        checks: &[CheckKind::NotNull, CheckKind::Relationships],
    },
    Rule {
        role: ColumnRole::Identifier,
        matches: ColumnProfile::is_identifier,
        checks: &[CheckKind::NotNull, CheckKind::Unique],
    },
    Rule {
        role: ColumnRole::Timestamp,
        matches: ColumnProfile::is_timestamp,
        checks: &[CheckKind::NotNull],
    },
    Rule {
        role: ColumnRole::Status,
        matches: ColumnProfile::is_status,
        checks: &[CheckKind::NotNull, CheckKind::AcceptedValues],
    },
];

fn matching_rule(profile: &ColumnProfile) -> Option<&'static Rule> {
    CASCADE.iter().find(|rule| (rule.matches)(profile))
}

pub fn classify(profile: &ColumnProfile) -> Option<ColumnRole> {
    matching_rule(profile).map(|rule| rule.role)
}

/// Tests the column should have but does not declare yet.
/// Empty when no rule matches or every expected test already exists.
pub fn suggest_checks(profile: &ColumnProfile, existing_tests: &[String]) -> Vec<CheckKind> {
    let Some(rule) = matching_rule(profile) else {
        return Vec::new();
    };

    rule.checks
        .iter()
        .copied()
        .filter(|kind| !existing_tests.iter().any(|t| t == kind.as_str()))
        .collect()
}

// =============================================================================
//  2. PRIORITY & RATIONALE
// =============================================================================

/// 1 (critical) to 5 (low). Most specific rule first.
pub fn priority(profile: &ColumnProfile) -> u8 {
    let name = profile.name();

    if profile.is_primary_key_name() || profile.is_own_key() {
        1
    } else if name.ends_with("_id") || CRITICAL_TIMESTAMPS.contains(&name) {
        2
    } else if profile.is_status() {
        3
    } else if profile.is_timestamp() {
        4
    } else {
        5
    }
}

pub fn rationale(profile: &ColumnProfile, suggested: &[CheckKind]) -> String {
    let name = profile.name();
    let mut reasons = Vec::new();

    if suggested.contains(&CheckKind::Unique) {
        if profile.is_primary_key_name() {
            reasons.push("Primary key should be unique");
        } else {
            reasons.push("ID column should be unique");
        }
    }

    if suggested.contains(&CheckKind::NotNull) {
        if profile.is_primary_key_name() {
            reasons.push("Primary key cannot be null");
        } else if name.ends_with("_id") {
            reasons.push("Foreign key should not be null");
        } else if profile.is_timestamp() {
            reasons.push("Timestamp columns are typically required");
        } else if profile.is_status() {
            reasons.push("Status column should have a value");
        }
    }

    if suggested.contains(&CheckKind::AcceptedValues) {
        reasons.push("Status/type column should have defined values");
    }

    if suggested.contains(&CheckKind::Relationships) {
        reasons.push("Foreign key should reference parent table");
    }

    if reasons.is_empty() {
        "Missing test coverage".to_string()
    } else {
        reasons.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tests(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_own_key_is_not_a_foreign_key() {
        let profile = ColumnProfile::new("order_id", "orders");
        assert!(profile.is_own_key());
        assert!(!profile.is_foreign_key());
        assert_eq!(classify(&profile), Some(ColumnRole::Identifier));
        assert_eq!(
            suggest_checks(&profile, &[]),
            vec![CheckKind::NotNull, CheckKind::Unique]
        );
        assert_eq!(priority(&profile), 1);
    }

    #[test]
    fn test_own_key_singular_model_names() {
        assert!(ColumnProfile::new("user_id", "user").is_own_key());
        assert!(ColumnProfile::new("USER_ID", "Users").is_own_key());
        assert!(!ColumnProfile::new("user_id", "orders").is_own_key());
        assert!(!ColumnProfile::new("id", "orders").is_own_key());
    }

    #[test]
    fn test_foreign_key_classification() {
        let profile = ColumnProfile::new("user_id", "orders");
        assert_eq!(classify(&profile), Some(ColumnRole::ForeignKey));
        assert_eq!(
            suggest_checks(&profile, &[]),
            vec![CheckKind::NotNull, CheckKind::Relationships]
        );
        assert_eq!(priority(&profile), 2);
        assert_eq!(
            rationale(&profile, &suggest_checks(&profile, &[])),
            "Foreign key should not be null; Foreign key should reference parent table"
        );
    }

    #[test]
    fn test_cascade_is_mutually_exclusive() {
        // Fully tested foreign key: the rule still wins, nothing falls through
        let profile = ColumnProfile::new("user_id", "orders");
        assert!(suggest_checks(&profile, &tests(&["not_null", "relationships"])).is_empty());

        // "status_type_id" is a foreign key even though it contains "status"
        let profile = ColumnProfile::new("status_type_id", "orders");
        assert_eq!(classify(&profile), Some(ColumnRole::ForeignKey));
    }

    #[test]
    fn test_identifier_patterns() {
        for name in ["id", "uuid", "surrogate_key", "customer_uuid"] {
            let profile = ColumnProfile::new(name, "customers");
            assert_eq!(classify(&profile), Some(ColumnRole::Identifier), "{}", name);
        }
        let id = ColumnProfile::new("id", "customers");
        assert_eq!(priority(&id), 1);
        assert_eq!(
            rationale(&id, &[CheckKind::NotNull, CheckKind::Unique]),
            "Primary key should be unique; Primary key cannot be null"
        );
        let key = ColumnProfile::new("surrogate_key", "customers");
        assert_eq!(priority(&key), 5);
        assert_eq!(
            rationale(&key, &[CheckKind::Unique]),
            "ID column should be unique"
        );
    }

    #[test]
    fn test_timestamp_priorities() {
        let created = ColumnProfile::new("created_at", "orders");
        assert_eq!(classify(&created), Some(ColumnRole::Timestamp));
        assert_eq!(suggest_checks(&created, &[]), vec![CheckKind::NotNull]);
        assert_eq!(priority(&created), 2);

        let deleted = ColumnProfile::new("deleted_at", "orders");
        assert_eq!(priority(&deleted), 4);
        assert_eq!(
            rationale(&deleted, &[CheckKind::NotNull]),
            "Timestamp columns are typically required"
        );
    }

    #[test]
    fn test_status_rule() {
        let profile = ColumnProfile::new("status", "orders");
        assert_eq!(classify(&profile), Some(ColumnRole::Status));
        assert_eq!(
            suggest_checks(&profile, &[]),
            vec![CheckKind::NotNull, CheckKind::AcceptedValues]
        );
        assert_eq!(priority(&profile), 3);
        assert_eq!(
            rationale(&profile, &[CheckKind::NotNull, CheckKind::AcceptedValues]),
            "Status column should have a value; Status/type column should have defined values"
        );
    }

    #[test]
    fn test_classification_drives_suggestions() {
        for name in ["user_id", "id", "created_at", "status", "email", "amount"] {
            let profile = ColumnProfile::new(name, "orders");
            assert_eq!(
                classify(&profile).is_some(),
                !suggest_checks(&profile, &[]).is_empty(),
                "{}",
                name
            );
        }
    }

    #[test]
    fn test_type_alone_never_suggests() {
        let profile = ColumnProfile::new("email", "users");
        assert_eq!(classify(&profile), None);
        assert!(suggest_checks(&profile, &[]).is_empty());
        assert_eq!(priority(&profile), 5);
    }

    #[test]
    fn test_existing_tests_are_not_suggested_again() {
        let profile = ColumnProfile::new("id", "users");
        assert_eq!(
            suggest_checks(&profile, &tests(&["unique"])),
            vec![CheckKind::NotNull]
        );
    }

    #[test]
    fn test_rationale_defaults() {
        let profile = ColumnProfile::new("amount", "orders");
        assert_eq!(rationale(&profile, &[]), "Missing test coverage");
        assert_eq!(
            rationale(&profile, &[CheckKind::NotNull]),
            "Missing test coverage"
        );
    }
}
