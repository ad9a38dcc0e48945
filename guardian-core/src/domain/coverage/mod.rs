// guardian-core/src/domain/coverage/mod.rs

pub mod check;
pub mod heuristics;
pub mod inflection;
pub mod report;

// Re-exports
pub use check::CheckKind;
pub use heuristics::{ColumnProfile, ColumnRole};
pub use inflection::infer_parent_table;
pub use report::{ColumnGap, CoverageReport, HIGH_PRIORITY};
