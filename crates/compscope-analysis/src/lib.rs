//! Compscope Analysis - Comp generation, filtering, and derived statistics
//!
//! This crate implements the one-directional comp pipeline:
//! subject → generated batch → filtered subset → KPIs, histogram and
//! insight. [`CompsSession`] wires the pipeline to the debounce/defer
//! coordinator from `compscope-sync`.

pub mod derived;
pub mod filter;
pub mod generator;
pub mod insight;
pub mod session;

pub use derived::{derive_stats, price_histogram, DerivedStats, HistogramBin, Kpis};
pub use filter::{filter_all, matches};
pub use generator::{generate, GeneratorConfig, ListingGenerator};
pub use insight::{
    derive_insight, format_dollars, market_profile, subject_valuation, MarketProfile,
};
pub use session::{CommittedInput, CompAnalysis, CompsSession, RecomputeJob, SessionOptions};
