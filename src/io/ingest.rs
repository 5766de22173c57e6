//! CSV record ingestion.
//!
//! This module turns a headered CSV into an ordered batch of `RawRecord`s.
//!
//! Design goals:
//!
//! - **Soft failure**: per the ingestion contract, no error ever crosses
//!   this boundary into the pipeline — any I/O or schema problem logs a
//!   warning and yields an empty (or shorter) batch
//! - **No cleansing here**: `raw_value` is handed to the harmonizer
//!   untouched, however dirty it looks
//! - **Deterministic behavior**: row order in, record order out

use std::collections::HashMap;
use std::fs::File;

use chrono::{DateTime, Utc};
use csv::StringRecord;
use tracing::{info, warn};

use crate::domain::RawRecord;

/// Capability interface for loading a batch of raw records.
///
/// Implementations may return an empty sequence on any failure; callers
/// must treat an empty batch as valid (if uninteresting) input.
pub trait RecordSource {
    fn load(&self, locator: &str) -> Vec<RawRecord>;
}

/// Loads records from a CSV file with a `source_id` and `raw_value` column
/// (an optional `ingested_at` column is parsed as RFC 3339; rows without
/// one are stamped at load time).
#[derive(Debug, Default)]
pub struct CsvRecordSource;

impl CsvRecordSource {
    pub fn new() -> Self {
        Self
    }
}

impl RecordSource for CsvRecordSource {
    fn load(&self, locator: &str) -> Vec<RawRecord> {
        let file = match File::open(locator) {
            Ok(f) => f,
            Err(e) => {
                warn!("failed to open record source '{locator}': {e}");
                return Vec::new();
            }
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers = match reader.headers() {
            Ok(h) => h.clone(),
            Err(e) => {
                warn!("failed to read CSV headers from '{locator}': {e}");
                return Vec::new();
            }
        };
        let header_map = build_header_map(&headers);

        let (Some(&id_idx), Some(&value_idx)) =
            (header_map.get("source_id"), header_map.get("raw_value"))
        else {
            warn!("'{locator}' is missing a `source_id` or `raw_value` column");
            return Vec::new();
        };
        let ingested_idx = header_map.get("ingested_at").copied();

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            // +2: records() starts after the header row, CSV lines are 1-based.
            let line = idx + 2;

            let row = match result {
                Ok(r) => r,
                Err(e) => {
                    warn!("skipping line {line} of '{locator}': CSV parse error: {e}");
                    continue;
                }
            };

            let Some(source_id) = get_field(&row, id_idx).filter(|s| !s.is_empty()) else {
                warn!("skipping line {line} of '{locator}': missing `source_id`");
                continue;
            };

            // An absent raw value is a legitimate record: the harmonizer
            // models it as Missing_Value. Only a missing id drops the row.
            let raw_content = get_field(&row, value_idx).unwrap_or_default();

            let ingested_at = ingested_idx
                .and_then(|i| get_field(&row, i))
                .and_then(|s| parse_timestamp(s))
                .unwrap_or_else(Utc::now);

            records.push(RawRecord {
                source_id: source_id.to_string(),
                raw_content: raw_content.to_string(),
                ingested_at,
            });
        }

        info!("loaded {} record(s) from '{locator}'", records.len());
        records
    }
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on
    // the first header; strip it so the schema check doesn't misfire.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn get_field<'a>(row: &'a StringRecord, idx: usize) -> Option<&'a str> {
    row.get(idx).map(str::trim)
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
