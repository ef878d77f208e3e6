// src/services/mod.rs
pub mod allocation;
pub mod calculations;
pub mod catalog;
pub mod error;
pub mod export;
pub mod format;
pub mod loader;
pub mod metrics;
pub mod numeric;
pub mod policy_impacts;
pub mod projections;
pub mod results;
pub mod source;
pub mod store;
