// guardian-core/src/lib.rs

// 1. Mandatory documentation for production code
#![allow(missing_docs)]

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Domain (business core)
// dbt artifacts model, coverage heuristics, ports.
// Depends on NOTHING else (neither infra nor app).
pub mod domain;

// 2. Infrastructure (Adapters)
// manifest.json / catalog.json parsers, YAML config, filesystem.
// Depends on the Domain.
pub mod infrastructure;

// 3. Application (Use Cases)
// Coverage analysis, suggestions generation, project inspection.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// use guardian_core::GuardianError;
pub use error::GuardianError;
