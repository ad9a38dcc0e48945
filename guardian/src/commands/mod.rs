// guardian/src/commands/mod.rs

pub mod analyze;
pub mod generate;
pub mod info;
