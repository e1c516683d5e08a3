//! Domain types for SectorLens

pub mod constituent;
pub mod profile;
pub mod sentiment;

pub use constituent::Constituent;
pub use profile::{Exchange, PricePoint, Profile};
pub use sentiment::{normalize_label, SentimentMap, SentimentMetric};

/// Placeholder written wherever a text field could not be extracted.
pub const NOT_AVAILABLE: &str = "N/A";
