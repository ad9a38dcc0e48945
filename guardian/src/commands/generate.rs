// guardian/src/commands/generate.rs
//
// USE CASE: Render the coverage gaps as a schema.yml, fresh or merged.

use std::path::PathBuf;

use guardian_core::application::{SuggestionGenerator, analyze_project};
use guardian_core::infrastructure::artifacts::{CatalogParser, ManifestParser};
use guardian_core::infrastructure::config::load_settings;

pub fn execute(
    project_path: PathBuf,
    output: Option<PathBuf>,
    priority: Option<u8>,
    merge: bool,
    existing_schema: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Checked before any work so that nothing gets written
    if merge && existing_schema.is_none() {
        anyhow::bail!("--existing-schema required when using --merge");
    }

    println!("📝 Generating test suggestions: {}", project_path.display());

    let settings = load_settings(&project_path)?;
    let threshold = priority.unwrap_or(settings.priority_threshold);
    let output_path = output.unwrap_or_else(|| project_path.join(&settings.output));

    let report = analyze_project(&project_path, &ManifestParser, &CatalogParser)?;

    match existing_schema.filter(|_| merge) {
        Some(existing) => {
            SuggestionGenerator::generate_incremental(
                &report,
                &existing,
                threshold,
                Some(&output_path),
            )?;
            println!("✅ Merged suggestions into: {}", output_path.display());
        }
        None => {
            SuggestionGenerator::generate(&report, threshold, Some(&output_path))?;
            println!("✅ Generated: {}", output_path.display());
        }
    }

    println!("\n📊 Coverage: {:.1}%", report.coverage_percentage);
    println!(
        "   Suggestions: {} columns (priority <= {})",
        report.gaps_at(threshold).len(),
        threshold
    );

    println!("\n👉 Next steps:");
    println!("   1. Review {}", output_path.display());
    println!("   2. Customize accepted_values and relationships tests");
    println!("   3. Remove [AUTO] prefixes from descriptions");
    println!("   4. Copy relevant tests to your models/ directory");
    println!("   5. Run 'dbt test' to validate");

    Ok(())
}
