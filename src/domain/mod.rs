//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - ingested input records (`RawRecord`)
//! - harmonized observations (`Observation`) and category tags
//! - forecast outputs (`PredictionResult`, `BatchResult`)
//! - the forecasting parameters (`EngineConfig`)

pub mod types;

pub use types::*;
