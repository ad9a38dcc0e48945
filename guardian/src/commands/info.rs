// guardian/src/commands/info.rs
//
// USE CASE: Show what the dbt project declares.

use std::path::PathBuf;

use guardian_core::application::inspect_project;

pub fn execute(project_path: PathBuf) -> anyhow::Result<()> {
    println!("ℹ️  dbt Project Info: {}", project_path.display());

    let summary = inspect_project(&project_path)?;

    println!("\n   Name:        {}", summary.name);
    println!("   Version:     {}", summary.version);
    println!(
        "   Profile:     {}",
        summary.profile.as_deref().unwrap_or("-")
    );
    println!("   Model paths: {}", summary.model_paths.join(", "));
    println!("   Test paths:  {}", summary.test_paths.join(", "));
    println!("   Target path: {}", summary.target_path);

    if summary.schema_files.is_empty() {
        println!("\n📄 No schema.yml files found under the model paths");
    } else {
        println!("\n📄 Schema files ({}):", summary.schema_files.len());
        for file in &summary.schema_files {
            match file.models {
                Some(count) => println!("   ➜ {} ({} models)", file.path.display(), count),
                None => println!("   ⚠️  {} (unreadable)", file.path.display()),
            }
        }
    }

    Ok(())
}
