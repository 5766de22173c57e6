//! Input/output helpers.
//!
//! - CSV ingestion behind the `RecordSource` seam (`ingest`)
//! - text report + batch JSON exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
