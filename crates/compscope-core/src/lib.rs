//! Compscope Core - Domain models, statistics, and configuration
//!
//! This crate contains the comparable-listing data model shared by every other
//! compscope crate, along with the small numeric utilities the analysis layer
//! is built on.

pub mod config;
pub mod error;
pub mod models;
pub mod stats;

pub use error::{CompscopeError, Result};
