pub mod coverage;
pub mod error;
pub mod ports;
pub mod project;

// Re-exports to simplify imports elsewhere
pub use error::DomainError;
