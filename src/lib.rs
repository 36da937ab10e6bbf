/// Library crate entry point.
/// Exposes internal modules for integration tests;
/// the production binary lives in src/main.rs.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod rules;
pub mod validation;
