// guardian-core/src/domain/coverage/report.rs

use serde::{Deserialize, Serialize};

use crate::domain::coverage::check::CheckKind;

/// Priority at or below which a gap is considered urgent.
pub const HIGH_PRIORITY: u8 = 2;

/// A column that lacks one or more tests the heuristics expect.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ColumnGap {
    pub model_name: String,
    pub column_name: String,
    pub column_type: Option<String>,
    pub existing_tests: Vec<String>,
    pub suggested_tests: Vec<CheckKind>,
    /// 1 (critical) to 5 (low)
    pub priority: u8,
    pub rationale: String,
    /// Only set when `relationships` is suggested and a parent could be guessed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inferred_parent_table: Option<String>,
}

impl ColumnGap {
    pub fn suggests(&self, kind: CheckKind) -> bool {
        self.suggested_tests.contains(&kind)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CoverageReport {
    pub total_models: usize,
    pub total_columns: usize,
    pub tested_columns: usize,
    pub coverage_percentage: f64,
    /// Sorted by (priority, model_name, column_name)
    pub gaps: Vec<ColumnGap>,
}

impl CoverageReport {
    pub fn new(
        total_models: usize,
        total_columns: usize,
        tested_columns: usize,
        mut gaps: Vec<ColumnGap>,
    ) -> Self {
        gaps.sort_by(|a, b| {
            (a.priority, &a.model_name, &a.column_name).cmp(&(
                b.priority,
                &b.model_name,
                &b.column_name,
            ))
        });

        Self {
            total_models,
            total_columns,
            tested_columns,
            coverage_percentage: coverage_percentage(tested_columns, total_columns),
            gaps,
        }
    }

    pub fn high_priority_gaps(&self) -> Vec<&ColumnGap> {
        self.gaps_at(HIGH_PRIORITY)
    }

    /// Gaps with `priority <= threshold`, in report order.
    pub fn gaps_at(&self, threshold: u8) -> Vec<&ColumnGap> {
        self.gaps.iter().filter(|g| g.priority <= threshold).collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

pub fn coverage_percentage(tested: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        tested as f64 / total as f64 * 100.0
    }
}
