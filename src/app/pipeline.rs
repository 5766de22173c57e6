//! Shared batch-pipeline logic used by both the one-shot CLI and the menu.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! raw records -> harmonize -> forecast -> aggregate
//!
//! The CLI and the menu can then focus on presentation (printing vs prompts).

use std::thread;
use std::time::Duration;

use tracing::warn;

use crate::config::SharedConfig;
use crate::domain::{BatchResult, RawRecord};
use crate::forecast::Forecaster;
use crate::harmonize::Harmonizer;

/// Run the full harmonize-then-forecast pipeline over one batch.
///
/// Behavior:
///
/// - records are processed independently and strictly in input order, and
///   `results` preserves that order
/// - each record's processing reads a single consistent configuration
///   snapshot (growth factor via the forecaster, pacing delay here)
/// - a problem with one record never aborts the batch: there are no
///   retries and no rollback
///
/// The `valid == false` branch is defensive: the rule-based harmonizer
/// recovers every record, but the trait seam allows stricter
/// implementations, and a skipped record must be counted, not dropped
/// silently. An empty batch is valid input and yields `0 / 0`.
pub fn run_batch(
    records: &[RawRecord],
    harmonizer: &dyn Harmonizer,
    forecaster: &mut dyn Forecaster,
    config: &SharedConfig,
) -> BatchResult {
    let mut batch = BatchResult::default();

    for record in records {
        let pacing_ms = config.snapshot().simulated_delay_ms;

        let observation = harmonizer.harmonize(record);

        if !observation.valid {
            warn!(
                source_id = %record.source_id,
                category = %observation.category,
                "skipping record rejected by harmonizer"
            );
            batch.skipped_count += 1;
            continue;
        }

        let prediction = forecaster.predict(&observation);
        batch.results.push(prediction);
        batch.processed_count += 1;

        if pacing_ms > 0 {
            thread::sleep(Duration::from_millis(pacing_ms));
        }
    }

    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EngineConfig, Observation, PredictionResult};
    use crate::forecast::GrowthForecaster;
    use crate::harmonize::RuleBasedHarmonizer;

    fn zero_delay_config(growth_factor: f64) -> SharedConfig {
        SharedConfig::new(EngineConfig {
            growth_factor,
            simulated_delay_ms: 0,
        })
    }

    fn records(contents: &[&str]) -> Vec<RawRecord> {
        contents
            .iter()
            .enumerate()
            .map(|(i, c)| RawRecord::new(format!("CRM_{i:03}"), *c))
            .collect()
    }

    #[test]
    fn all_valid_records_are_processed_in_order() {
        let config = zero_delay_config(1.0);
        let harmonizer = RuleBasedHarmonizer::new();
        let mut forecaster = GrowthForecaster::with_seed(config.clone(), 11);

        let input = records(&["100", "200", "300", "400"]);
        let batch = run_batch(&input, &harmonizer, &mut forecaster, &config);

        assert_eq!(batch.processed_count, 4);
        assert_eq!(batch.skipped_count, 0);
        assert_eq!(batch.results.len(), 4);

        // growth_factor = 1.0, so projections echo the inputs in order.
        let projected: Vec<f64> = batch.results.iter().map(|r| r.predicted_value).collect();
        assert_eq!(projected, vec![100.0, 200.0, 300.0, 400.0]);
    }

    #[test]
    fn malformed_records_are_recovered_not_skipped() {
        let config = zero_delay_config(1.15);
        let harmonizer = RuleBasedHarmonizer::new();
        let mut forecaster = GrowthForecaster::with_seed(config.clone(), 11);

        let input = records(&["€ 500", "garbage", "", "approx 42 units"]);
        let batch = run_batch(&input, &harmonizer, &mut forecaster, &config);

        assert_eq!(batch.processed_count, 4);
        assert_eq!(batch.skipped_count, 0);
    }

    #[test]
    fn empty_batch_yields_zero_zero() {
        let config = zero_delay_config(1.15);
        let harmonizer = RuleBasedHarmonizer::new();
        let mut forecaster = GrowthForecaster::with_seed(config.clone(), 11);

        let batch = run_batch(&[], &harmonizer, &mut forecaster, &config);
        assert_eq!(batch.processed_count, 0);
        assert_eq!(batch.skipped_count, 0);
        assert!(batch.results.is_empty());
    }

    /// Harmonizer stub that rejects everything, to drive the defensive branch.
    struct RejectingHarmonizer;

    impl Harmonizer for RejectingHarmonizer {
        fn harmonize(&self, _record: &RawRecord) -> Observation {
            Observation {
                value: 0.0,
                category: "Format_Error".to_string(),
                valid: false,
            }
        }
    }

    /// Forecaster stub that panics if invoked, proving the skip path
    /// never reaches prediction.
    struct UnreachableForecaster;

    impl Forecaster for UnreachableForecaster {
        fn predict(&mut self, _observation: &Observation) -> PredictionResult {
            panic!("forecaster must not run for invalid observations");
        }
    }

    #[test]
    fn invalid_observations_take_the_skip_branch() {
        let config = zero_delay_config(1.15);
        let mut forecaster = UnreachableForecaster;

        let input = records(&["100", "200", "300"]);
        let batch = run_batch(&input, &RejectingHarmonizer, &mut forecaster, &config);

        assert_eq!(batch.processed_count, 0);
        assert_eq!(batch.skipped_count, 3);
        assert!(batch.results.is_empty());
    }
}
