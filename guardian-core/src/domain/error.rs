// guardian-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Manifest loading Error: {0}")]
    #[diagnostic(
        code(guardian::domain::manifest),
        help("Run 'dbt compile' or 'dbt run' to refresh target/manifest.json.")
    )]
    ManifestError(String),

    #[error("Catalog loading Error: {0}")]
    #[diagnostic(
        code(guardian::domain::catalog),
        help("Run 'dbt docs generate' to refresh target/catalog.json.")
    )]
    CatalogError(String),
}
