//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during pipeline runs
//! - exported to JSON for downstream scripts
//! - reloaded later for comparisons across runs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category tag for observations recovered via pattern extraction.
///
/// Appended to the base category so downstream consumers can distinguish a
/// directly-parsed value from one salvaged out of malformed text.
pub const RECOVERED_SUFFIX: &str = "_Recovered";

/// Category for empty/whitespace-only records (modeled as a defined zero).
pub const CATEGORY_MISSING: &str = "Missing_Value";

/// Category for records where no numeric value could be extracted at all.
pub const CATEGORY_UNREADABLE: &str = "Unreadable_Data";

/// One raw record as handed over by an ingestion source.
///
/// Immutable once created. `raw_content` may be arbitrarily dirty text;
/// turning it into something numeric is the harmonizer's job, never the
/// ingestion layer's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    /// Origin identifier, e.g. `"CRM_001"` or `"IoT_Sensor_X"`.
    pub source_id: String,
    /// The unprocessed payload (possibly malformed).
    pub raw_content: String,
    /// When the record entered the system.
    pub ingested_at: DateTime<Utc>,
}

impl RawRecord {
    pub fn new(source_id: impl Into<String>, raw_content: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            raw_content: raw_content.into(),
            ingested_at: Utc::now(),
        }
    }
}

/// Base category inferred from a record's source identifier.
///
/// The vocabulary is deliberately small; anything unrecognized lands in
/// `GeneralData` rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceCategory {
    SalesRevenue,
    OperationalMetric,
    GeneralData,
}

impl SourceCategory {
    /// Infer the category from a source id (case-insensitive substring match).
    pub fn from_source_id(source_id: &str) -> Self {
        let lower = source_id.to_ascii_lowercase();
        if lower.contains("crm") {
            SourceCategory::SalesRevenue
        } else if lower.contains("sensor") || lower.contains("iot") {
            SourceCategory::OperationalMetric
        } else {
            SourceCategory::GeneralData
        }
    }

    /// Wire/report label for this category.
    pub fn label(self) -> &'static str {
        match self {
            SourceCategory::SalesRevenue => "Sales_Revenue",
            SourceCategory::OperationalMetric => "Operational_Metric",
            SourceCategory::GeneralData => "General_Data",
        }
    }
}

/// A cleaned, typed observation produced by the harmonizer.
///
/// Invariant: `valid` is always `true` — the harmonizer recovers every
/// record to *some* defensible numeric value, and quality problems surface
/// through `category` (`Missing_Value`, `Unreadable_Data`, `*_Recovered`)
/// rather than through control flow. The flag is kept so alternate
/// harmonizer implementations with stricter rules remain expressible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub value: f64,
    pub category: String,
    pub valid: bool,
}

/// The outcome of forecasting a single observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// What is being predicted, e.g. `"Future_Sales_Revenue"`.
    pub target_label: String,
    /// Projected value.
    pub predicted_value: f64,
    /// Confidence score in `[0.0, 1.0]`.
    pub confidence: f64,
    /// Identifier of the heuristic that produced this result.
    pub model_name: String,
}

/// Aggregated output of one pipeline run over a batch.
///
/// `results` preserves input order. `processed_count + skipped_count`
/// equals the number of input records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchResult {
    pub results: Vec<PredictionResult>,
    pub processed_count: usize,
    pub skipped_count: usize,
}

/// Forecasting parameters, shared across the process via `SharedConfig`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Linear projection multiplier (must be >= 0).
    pub growth_factor: f64,
    /// Pacing delay between records during a pipeline run (0 disables).
    pub simulated_delay_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            growth_factor: 1.15,
            simulated_delay_ms: 200,
        }
    }
}
