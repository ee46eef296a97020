//! CLI-specific utilities for cabin-dl
//!
//! Terminal output that has no place in the library.

pub mod progress;

pub use progress::ProgressManager;
