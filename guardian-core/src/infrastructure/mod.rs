// guardian-core/src/infrastructure/mod.rs

pub mod artifacts;
pub mod config;
pub mod error;
pub mod fs;
