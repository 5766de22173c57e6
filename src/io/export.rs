//! Result exports: plain-text analysis report and batch JSON.
//!
//! The text report is meant to be read by humans; the JSON export is the
//! machine-readable form for downstream scripts. Neither format carries a
//! compatibility guarantee.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::domain::{BatchResult, PredictionResult, RawRecord};
use crate::error::AppError;

/// Default report filename, timestamped to avoid clobbering earlier runs.
pub fn default_report_path() -> PathBuf {
    let ts = Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("Analysis_Report_{ts}.txt"))
}

/// Write the human-readable analysis report.
///
/// Records and predictions are paired positionally up to
/// `min(raw.len(), predictions.len())` — when the pipeline skipped a
/// record, the prediction sequence is shorter and later pairings shift
/// accordingly (this matches the reporting collaborator contract).
pub fn write_report_txt(
    path: &Path,
    raw: &[RawRecord],
    predictions: &[PredictionResult],
) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::usage(format!("Failed to create report '{}': {e}", path.display()))
    })?;

    let write_err = |e: std::io::Error| AppError::usage(format!("Failed to write report: {e}"));

    writeln!(file, "==================================================").map_err(write_err)?;
    writeln!(file, "          OPS-FORECAST ANALYSIS REPORT").map_err(write_err)?;
    writeln!(file, "          Generated: {}", Local::now().to_rfc3339()).map_err(write_err)?;
    writeln!(file, "==================================================").map_err(write_err)?;
    writeln!(file).map_err(write_err)?;

    let count = raw.len().min(predictions.len());
    for i in 0..count {
        let record = &raw[i];
        let prediction = &predictions[i];

        writeln!(file, "RECORD ID: {}", record.source_id).map_err(write_err)?;
        writeln!(file, " - Target: {}", prediction.target_label).map_err(write_err)?;
        writeln!(file, " - Model: {}", prediction.model_name).map_err(write_err)?;
        writeln!(file, " - Projected Value: {:.2}", prediction.predicted_value)
            .map_err(write_err)?;
        writeln!(file, " - Confidence: {:.1}%", prediction.confidence * 100.0)
            .map_err(write_err)?;
        writeln!(file, "--------------------------------------------------").map_err(write_err)?;
    }

    writeln!(file).map_err(write_err)?;
    writeln!(file, "[END OF REPORT]").map_err(write_err)?;

    Ok(())
}

/// Write the batch result as pretty-printed JSON.
pub fn write_batch_json(path: &Path, batch: &BatchResult) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::usage(format!(
            "Failed to create batch JSON '{}': {e}",
            path.display()
        ))
    })?;

    serde_json::to_writer_pretty(file, batch)
        .map_err(|e| AppError::usage(format!("Failed to write batch JSON: {e}")))?;

    Ok(())
}
