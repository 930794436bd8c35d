//! Deterministic pre-match analysis for football, hockey and table tennis.
//!
//! Feed a sport tag and a handful of ratings / form / shooting numbers in,
//! get outcome percentages, a total-score probability and a handicap back.

pub mod config;
pub mod engine;
pub mod error;
pub mod params;
pub mod report;

pub use engine::{analyze, analyze_raw, AnalysisResult};
pub use error::ParamError;
pub use params::{ParameterSet, RawParams, Sport};
pub use report::Report;
