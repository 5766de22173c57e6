//! Rule-based record harmonization.
//!
//! This module turns one dirty `RawRecord` into a typed `Observation`.
//!
//! Design goals:
//!
//! - **Total recovery**: harmonization never fails — every record resolves
//!   to *some* defensible numeric value, and data-quality problems surface
//!   as inspectable category tags instead of control-flow branches
//! - **Deterministic behavior**: the same record always harmonizes to the
//!   same observation
//! - **Separation of concerns**: no forecasting logic here

use regex::Regex;
use tracing::debug;

use crate::domain::{
    Observation, RawRecord, SourceCategory, CATEGORY_MISSING, CATEGORY_UNREADABLE,
    RECOVERED_SUFFIX,
};

/// Capability interface for record cleansing.
///
/// Implementations must be total: `harmonize` never errors. Alternate
/// cleansing rule sets can be swapped in without touching orchestration.
pub trait Harmonizer {
    fn harmonize(&self, record: &RawRecord) -> Observation;
}

/// Currency symbols stripped during cleaning.
const CURRENCY_SYMBOLS: [char; 3] = ['€', '$', '£'];

/// Literal currency-code tokens stripped during cleaning.
const CURRENCY_CODES: [&str; 3] = ["EUR", "USD", "GBP"];

/// The default rule set: currency stripping, separator normalization, and
/// regex-based value recovery.
pub struct RuleBasedHarmonizer {
    /// First integer-or-decimal substring, accepting `.` or `,` as the
    /// decimal separator (unsigned — the recovery path never salvages a
    /// sign from surrounding junk).
    number_pattern: Regex,
}

impl RuleBasedHarmonizer {
    pub fn new() -> Self {
        Self {
            number_pattern: Regex::new(r"\d+(?:[.,]\d+)?").unwrap(),
        }
    }

    /// Strip currency markers, normalize the decimal separator, and remove
    /// internal whitespace.
    ///
    /// Note the ordering: `,` is mapped to `.` unconditionally, so a
    /// thousands separator like in `"1,234.56"` becomes a second decimal
    /// point (`"1.234.56"`) and the direct parse fails. This mirrors the
    /// original cleansing rules byte-for-byte; the recovery path then
    /// extracts `1.234`. Tested explicitly — do not reorder.
    fn clean(content: &str) -> String {
        let mut cleaned = content.trim().to_string();
        for code in CURRENCY_CODES {
            cleaned = cleaned.replace(code, "");
        }
        cleaned
            .chars()
            .filter(|c| !CURRENCY_SYMBOLS.contains(c) && !c.is_whitespace())
            .map(|c| if c == ',' { '.' } else { c })
            .collect()
    }

    /// Search the ORIGINAL (uncleaned) content for the first numeric
    /// substring and parse it, normalizing a comma decimal separator.
    fn recover(&self, original: &str) -> Option<f64> {
        let matched = self.number_pattern.find(original)?;
        let normalized = matched.as_str().replace(',', ".");
        match normalized.parse::<f64>() {
            Ok(v) if v.is_finite() => Some(v),
            _ => None,
        }
    }
}

impl Default for RuleBasedHarmonizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Harmonizer for RuleBasedHarmonizer {
    fn harmonize(&self, record: &RawRecord) -> Observation {
        let raw_content = record.raw_content.as_str();

        // 1) Missing values are modeled as a defined zero, not a rejection.
        if raw_content.trim().is_empty() {
            debug!(source_id = %record.source_id, "empty record content");
            return Observation {
                value: 0.0,
                category: CATEGORY_MISSING.to_string(),
                valid: true,
            };
        }

        let base_category = SourceCategory::from_source_id(&record.source_id);

        // 2) + 3) Clean and attempt the direct parse. `f64` parsing accepts
        // "inf"/"nan"; those are treated as failures so no non-finite value
        // ever reaches the forecaster.
        let cleaned = Self::clean(raw_content);
        match cleaned.parse::<f64>() {
            Ok(value) if value.is_finite() => {
                return Observation {
                    value,
                    category: base_category.label().to_string(),
                    valid: true,
                };
            }
            _ => {}
        }

        // 4) Recovery: pull the first numeric substring out of the original
        // content and tag the category so downstream consumers can see the
        // value was salvaged.
        if let Some(value) = self.recover(raw_content) {
            debug!(source_id = %record.source_id, value, "recovered value from malformed content");
            return Observation {
                value,
                category: format!("{}{}", base_category.label(), RECOVERED_SUFFIX),
                valid: true,
            };
        }

        // 5) Nothing numeric anywhere: a defined zero with an explicit tag.
        debug!(source_id = %record.source_id, "unreadable record content");
        Observation {
            value: 0.0,
            category: CATEGORY_UNREADABLE.to_string(),
            valid: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source_id: &str, content: &str) -> RawRecord {
        RawRecord::new(source_id, content)
    }

    fn harmonize(source_id: &str, content: &str) -> Observation {
        RuleBasedHarmonizer::new().harmonize(&record(source_id, content))
    }

    #[test]
    fn empty_content_is_a_defined_zero() {
        let obs = harmonize("CRM_001", "");
        assert_eq!(obs.value, 0.0);
        assert_eq!(obs.category, "Missing_Value");
        assert!(obs.valid);
    }

    #[test]
    fn whitespace_only_content_is_missing() {
        let obs = harmonize("CRM_001", "   \t  ");
        assert_eq!(obs.value, 0.0);
        assert_eq!(obs.category, "Missing_Value");
        assert!(obs.valid);
    }

    #[test]
    fn currency_symbol_is_stripped() {
        let obs = harmonize("CRM_001", "€ 500");
        assert!((obs.value - 500.0).abs() < 1e-12);
        assert_eq!(obs.category, "Sales_Revenue");
        assert!(obs.valid);
    }

    #[test]
    fn currency_code_token_is_stripped() {
        let obs = harmonize("IoT_Sensor_X", "1200 EUR");
        assert!((obs.value - 1200.0).abs() < 1e-12);
        assert_eq!(obs.category, "Operational_Metric");
    }

    #[test]
    fn comma_decimal_separator_is_normalized() {
        let obs = harmonize("misc", "12,5");
        assert!((obs.value - 12.5).abs() < 1e-12);
        assert_eq!(obs.category, "General_Data");
    }

    #[test]
    fn thousands_separator_triggers_recovery() {
        // "1,234.56" cleans to "1.234.56", which fails the direct parse;
        // recovery then extracts "1,234" from the original and normalizes
        // it to 1.234. Intentional carry-over of the original cleansing
        // order — see DESIGN.md before "fixing" this.
        let obs = harmonize("CRM_007", "1,234.56");
        assert!((obs.value - 1.234).abs() < 1e-12);
        assert_eq!(obs.category, "Sales_Revenue_Recovered");
        assert!(obs.valid);
    }

    #[test]
    fn embedded_number_is_recovered_from_junk() {
        let obs = harmonize("sensor_3", "approx 42 units");
        assert!((obs.value - 42.0).abs() < 1e-12);
        assert_eq!(obs.category, "Operational_Metric_Recovered");
    }

    #[test]
    fn no_digits_at_all_is_unreadable() {
        let obs = harmonize("misc", "N/A");
        assert_eq!(obs.value, 0.0);
        assert_eq!(obs.category, "Unreadable_Data");
        assert!(obs.valid);
    }

    #[test]
    fn nan_text_does_not_poison_the_value() {
        // `f64::from_str` accepts "nan"/"inf"; the direct-parse step must
        // reject them so the observation stays finite.
        for content in ["nan", "NaN", "inf", "-inf", "infinity"] {
            let obs = harmonize("misc", content);
            assert!(obs.value.is_finite(), "non-finite value for {content:?}");
            assert_eq!(obs.category, "Unreadable_Data");
        }
    }

    #[test]
    fn plain_negative_numbers_parse_directly() {
        let obs = harmonize("CRM_001", "-50.25");
        assert!((obs.value + 50.25).abs() < 1e-12);
        assert_eq!(obs.category, "Sales_Revenue");
    }

    #[test]
    fn harmonization_is_total_and_always_valid() {
        let nasty = [
            "", "  ", "€", "$$$", "EUR", "1.2.3.4", "12..5", "--", "N/A",
            "£1,000,000", "value: 7", "7e300", "1e999", "....", ",,,",
            "\u{202e}123", "∞", "NaN EUR",
        ];
        let harmonizer = RuleBasedHarmonizer::new();
        for content in nasty {
            let obs = harmonizer.harmonize(&record("mixed_src", content));
            assert!(obs.valid, "invalid observation for {content:?}");
            assert!(obs.value.is_finite(), "non-finite value for {content:?}");
        }
    }

    #[test]
    fn harmonization_is_idempotent_per_record() {
        let harmonizer = RuleBasedHarmonizer::new();
        let rec = record("CRM_001", "garbled 99,9 text");
        let first = harmonizer.harmonize(&rec);
        let second = harmonizer.harmonize(&rec);
        assert_eq!(first, second);
    }
}
