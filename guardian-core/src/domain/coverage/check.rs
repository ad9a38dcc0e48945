// guardian-core/src/domain/coverage/check.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The generic dbt tests this engine knows how to suggest.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    NotNull,
    Unique,
    AcceptedValues,
    Relationships,
}

impl CheckKind {
    pub const ALL: [CheckKind; 4] = [
        CheckKind::NotNull,
        CheckKind::Unique,
        CheckKind::AcceptedValues,
        CheckKind::Relationships,
    ];

    /// Identifier used by dbt in `tests:` blocks.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotNull => "not_null",
            Self::Unique => "unique",
            Self::AcceptedValues => "accepted_values",
            Self::Relationships => "relationships",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown check kind: '{}'", s))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_match_dbt_names() {
        let names: Vec<&str> = CheckKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            vec!["not_null", "unique", "accepted_values", "relationships"]
        );
        assert_eq!(
            serde_json::to_string(&CheckKind::AcceptedValues).unwrap(),
            "\"accepted_values\""
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!("unique".parse::<CheckKind>(), Ok(CheckKind::Unique));
        assert!("expression_is_true".parse::<CheckKind>().is_err());
    }
}
