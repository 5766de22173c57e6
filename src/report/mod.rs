//! Terminal output formatting.
//!
//! We keep formatting code in one place so:
//! - the pipeline code stays clean and testable
//! - output changes are localized (important for future snapshot tests)
//!
//! All functions return `String`s; the callers decide where they go.

use crate::domain::{BatchResult, PredictionResult, RawRecord};

/// Format the per-record analysis block shown during an interactive run.
pub fn format_prediction_block(record: &RawRecord, prediction: &PredictionResult) -> String {
    let mut out = String::new();

    out.push_str("--------------------------------------------------\n");
    out.push_str(&format!("    ANALYSIS FOR: {}\n", record.source_id));
    out.push_str(&format!("   > Target          : {}\n", prediction.target_label));
    out.push_str(&format!("   > Model           : {}\n", prediction.model_name));
    out.push_str(&format!(
        "   > Projected Value : {:.2}\n",
        prediction.predicted_value
    ));
    out.push_str(&format!(
        "   > Confidence      : {:.1}%\n",
        prediction.confidence * 100.0
    ));
    out.push_str("--------------------------------------------------\n");

    out
}

/// Format the end-of-run summary line.
pub fn format_run_summary(batch: &BatchResult) -> String {
    format!(
        ">>> BATCH COMPLETE: {} processed | {} skipped\n",
        batch.processed_count, batch.skipped_count
    )
}

/// Format a raw-record inspection listing (top `limit` rows).
pub fn format_raw_inspection(records: &[RawRecord], limit: usize) -> String {
    let mut out = String::new();

    out.push_str(">>> RAW RECORD INSPECTION\n");
    out.push_str("----------------------------------------\n");
    for (i, record) in records.iter().take(limit).enumerate() {
        out.push_str(&format!(
            "#{} | ID: {:<16} | RAW: {}\n",
            i + 1,
            record.source_id,
            record.raw_content
        ));
    }
    out.push_str("----------------------------------------\n");
    out.push_str(&format!("Total records: {}\n", records.len()));

    out
}
