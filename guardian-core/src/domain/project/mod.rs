// guardian-core/src/domain/project/mod.rs

pub mod catalog;
pub mod configuration;
pub mod manifest;

pub use catalog::{Catalog, CatalogColumn, CatalogTable};
pub use configuration::{DbtProjectConfig, GuardianSettings};
pub use manifest::{
    Column, Manifest, ManifestMetadata, Materialization, Model, Source, TestNode,
};
