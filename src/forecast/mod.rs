//! Heuristic growth forecasting.
//!
//! The "model" here is a deliberate simulation: a linear projection of the
//! observed value plus a randomized confidence score. It exists to exercise
//! the pipeline, not to be right.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SharedConfig;
use crate::domain::{Observation, PredictionResult};

/// Name reported on every result produced by `GrowthForecaster`.
pub const GROWTH_MODEL_NAME: &str = "Standard_Growth_Algorithm_v1";

/// Lower bound of the random confidence base.
const CONFIDENCE_BASE_MIN: f64 = 0.70;
/// Upper bound of the random confidence base.
const CONFIDENCE_BASE_MAX: f64 = 0.95;
/// Observations above this magnitude get a confidence penalty.
const MAGNITUDE_THRESHOLD: f64 = 10_000.0;
const MAGNITUDE_PENALTY: f64 = -0.05;
const MAGNITUDE_BONUS: f64 = 0.02;

/// Capability interface for forecasting a single observation.
///
/// Precondition: implementations are total over *valid* observations and
/// must not be invoked on an `Observation` with `valid == false`. The
/// rule-based harmonizer never produces one; the orchestrator's defensive
/// skip branch enforces this at the call site.
pub trait Forecaster {
    fn predict(&mut self, observation: &Observation) -> PredictionResult;
}

/// Linear growth projection parameterized by the shared configuration.
///
/// The confidence score is intentionally non-deterministic: a uniform base
/// draw in `[0.70, 0.95]`, adjusted by magnitude and clamped to `[0, 1]`.
/// The RNG is owned by the forecaster and seedable (`with_seed`) so tests
/// and reproducible runs can pin the draws.
pub struct GrowthForecaster {
    config: SharedConfig,
    rng: StdRng,
}

impl GrowthForecaster {
    /// Entropy-seeded forecaster (non-reproducible confidence draws).
    pub fn new(config: SharedConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded forecaster with reproducible confidence draws.
    pub fn with_seed(config: SharedConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Forecaster for GrowthForecaster {
    fn predict(&mut self, observation: &Observation) -> PredictionResult {
        // One consistent configuration snapshot per prediction.
        let config = self.config.snapshot();

        let current = observation.value;
        let projected = current * config.growth_factor;

        // Confidence: random base, magnitude adjustment, clamp.
        // Extreme magnitudes are assumed to carry more "external factor"
        // uncertainty; everything else gets a small bonus.
        let base = self.rng.gen_range(CONFIDENCE_BASE_MIN..=CONFIDENCE_BASE_MAX);
        let adjustment = if current > MAGNITUDE_THRESHOLD {
            MAGNITUDE_PENALTY
        } else {
            MAGNITUDE_BONUS
        };
        let confidence = (base + adjustment).clamp(0.0, 1.0);

        PredictionResult {
            target_label: format!("Future_{}", observation.category),
            predicted_value: projected,
            confidence,
            model_name: GROWTH_MODEL_NAME.to_string(),
        }
    }
}
