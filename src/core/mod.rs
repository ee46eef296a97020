//! Core library modules for cabin-dl
//!
//! Fetching, loading, normalization, filtering and reporting.

pub mod error;
pub mod fetcher;
pub mod filter;
pub mod loader;
pub mod page;
pub mod query;
pub mod record;
pub mod report;
pub mod table;
