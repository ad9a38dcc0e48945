// guardian-core/src/infrastructure/artifacts/mod.rs

pub mod catalog;
pub mod manifest;

pub use catalog::CatalogParser;
pub use manifest::ManifestParser;
