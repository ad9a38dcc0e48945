// src/domain/ports/mod.rs

pub mod artifacts;

pub use artifacts::{CatalogLoader, ManifestLoader};
