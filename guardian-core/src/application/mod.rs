// guardian-core/src/application/mod.rs

pub mod coverage;
pub mod inspect;
pub mod suggestions;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI write `use guardian_core::application::{analyze_project, SuggestionGenerator};`

pub use coverage::{CoverageAnalyzer, analyze_project};
pub use inspect::{ProjectSummary, inspect_project};
pub use suggestions::SuggestionGenerator;
