// guardian/src/commands/analyze.rs
//
// USE CASE: Coverage gap analysis of a compiled dbt project.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::path::PathBuf;

use guardian_core::application::analyze_project;
use guardian_core::domain::coverage::CoverageReport;
use guardian_core::infrastructure::artifacts::{CatalogParser, ManifestParser};
use guardian_core::infrastructure::config::load_settings;

use crate::cli::OutputFormat;

pub fn execute(
    project_path: PathBuf,
    priority: Option<u8>,
    limit: Option<usize>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let settings = load_settings(&project_path)?;
    let threshold = priority.unwrap_or(settings.priority_threshold);
    let limit = limit.unwrap_or(settings.top_gaps);

    if format == OutputFormat::Table {
        println!("🔍 Analyzing dbt project: {}", project_path.display());
    }

    let report = analyze_project(&project_path, &ManifestParser, &CatalogParser)?;

    match format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Table => {
            println!("{}", summary_table(&report));
            print_top_gaps(&report, threshold, limit);
            println!(
                "\n✅ Analysis complete! Run 'guardian generate-tests' to create schema.yml"
            );
        }
    }

    Ok(())
}

fn summary_table(report: &CoverageReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Metric", "Value"])
        .add_row(vec!["Models".to_string(), report.total_models.to_string()])
        .add_row(vec!["Columns".to_string(), report.total_columns.to_string()])
        .add_row(vec![
            "Tested Columns".to_string(),
            report.tested_columns.to_string(),
        ])
        .add_row(vec![
            "Coverage".to_string(),
            format!("{:.1}%", report.coverage_percentage),
        ])
        .add_row(vec!["Gaps Found".to_string(), report.gaps.len().to_string()])
        .add_row(vec![
            "High Priority Gaps".to_string(),
            report.high_priority_gaps().len().to_string(),
        ]);
    table
}

fn print_top_gaps(report: &CoverageReport, threshold: u8, limit: usize) {
    let gaps = report.gaps_at(threshold);
    if gaps.is_empty() {
        println!("\n🎉 No gaps with priority <= {}", threshold);
        return;
    }

    println!("\n📋 Top Gaps (priority <= {}):", threshold);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Priority",
            "Model",
            "Column",
            "Suggested Tests",
            "Rationale",
        ]);

    for gap in gaps.iter().take(limit) {
        let tests: Vec<&str> = gap.suggested_tests.iter().map(|t| t.as_str()).collect();
        table.add_row(vec![
            gap.priority.to_string(),
            gap.model_name.clone(),
            gap.column_name.clone(),
            tests.join(", "),
            gap.rationale.clone(),
        ]);
    }
    println!("{}", table);

    if gaps.len() > limit {
        println!("   ... and {} more gaps", gaps.len() - limit);
    }
}
