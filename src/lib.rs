//! Prompthub - single-user prompt storage, tagging, search, and versioning.
//!
//! Re-exports modules for integration testing and external use.

pub mod config;
pub mod db;
pub mod handlers;
pub mod store;
pub mod types;
