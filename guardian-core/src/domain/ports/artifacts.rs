use crate::domain::error::DomainError;
use crate::domain::project::{Catalog, Manifest};
use std::path::Path;

pub trait ManifestLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Manifest, DomainError>;
}

pub trait CatalogLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Catalog, DomainError>;
}
