//! SectorLens Core: domain types, page fetching, and per-site extractors.
//!
//! This crate contains the extraction half of the pipeline:
//! - Domain types (constituents, profiles, price points, sentiment metrics)
//! - The `PageFetcher` seam over HTTP, with a blocking reqwest implementation
//! - Index membership, company profile, and analyst sentiment extractors
//! - The `ExchangeClassifier` seam for the exchange heuristic
//! - `Extraction<T>`, the typed complete/partial/failed outcome

pub mod domain;
pub mod source;
