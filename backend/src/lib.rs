//! # Calls Inflection Backend
//!
//! Seasonal analysis of monthly call volume.
//!
//! Call rows (company, region, year, month, calls) are aggregated into a
//! twelve-month series per company. The series is searched for peaks and
//! valleys, the resulting pattern is classified, and transition midpoints
//! between consecutive extrema are computed on the circular calendar. Yearly
//! totals and a year-by-month breakdown complete the picture.
//!
//! ## Architecture
//!
//! - [`algorithms`]: Detection strategies, pattern classification, transitions,
//!   midpoint marks and annual aggregation. Pure and synchronous.
//! - [`models`]: Call records, monthly series and circular month arithmetic
//! - [`api`]: Public response types and identifiers
//! - [`parsing`]: JSON ingestion of call rows
//! - [`db`]: Repository pattern, in-memory store and storage services
//! - [`services`]: Per-company orchestration of the analysis pipeline
//! - [`config`]: `inflection.toml` settings
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`routes`]: Route-specific response types
//!
//! ## Example
//!
//! ```
//! use calls_inflection::algorithms::{classify, compute_transitions, detect, DetectionStrategy};
//!
//! let series = [5.0, 7.5, 12.5, 15.0, 12.5, 7.5, 5.0, 7.5, 12.5, 15.0, 12.5, 7.5];
//! let extrema = detect(&series, &DetectionStrategy::default()).unwrap();
//! let diagnosis = classify(&extrema);
//! assert!(diagnosis.is_well_formed);
//! assert_eq!(compute_transitions(&extrema).unwrap().len(), 4);
//! ```

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod algorithms;
pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod parsing;
pub mod routes;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
