//! Shared mutable configuration store.
//!
//! One `SharedConfig` is created at process start and handed (cloned) to
//! every component that needs it — the forecaster and the settings-update
//! surface. There is no global lookup; the handle is threaded through
//! constructors.
//!
//! Concurrency contract:
//!
//! - `snapshot()` returns a whole, consistent `EngineConfig` — a reader
//!   racing a writer sees either the pre- or post-update value, never a
//!   mixture of fields (whole-struct atomic swap)
//! - writes go through `rcu`, which serializes read-modify-write updates
//!
//! No transactional semantics beyond that are provided or required.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{info, warn};

use crate::domain::EngineConfig;

/// Cheaply-cloneable handle to the process-wide forecasting parameters.
#[derive(Clone)]
pub struct SharedConfig {
    inner: Arc<ArcSwap<EngineConfig>>,
}

impl SharedConfig {
    pub fn new(initial: EngineConfig) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(initial)),
        }
    }

    /// Read the current configuration as one consistent snapshot.
    pub fn snapshot(&self) -> Arc<EngineConfig> {
        self.inner.load_full()
    }

    /// Replace the growth factor.
    ///
    /// Negative values are rejected: the prior configuration is retained,
    /// the rejection is logged, and `false` is returned so interactive
    /// callers can surface the refusal. The process never fails over a bad
    /// setting.
    pub fn set_growth_factor(&self, value: f64) -> bool {
        if !value.is_finite() || value < 0.0 {
            warn!(value, "rejected growth factor update (must be >= 0)");
            return false;
        }
        self.inner.rcu(|current| EngineConfig {
            growth_factor: value,
            ..(**current).clone()
        });
        info!(value, "growth factor updated");
        true
    }

    /// Replace the inter-record pacing delay. Applied directly; no validation.
    pub fn set_simulated_delay(&self, ms: u64) {
        self.inner.rcu(|current| EngineConfig {
            simulated_delay_ms: ms,
            ..(**current).clone()
        });
        info!(ms, "simulated delay updated");
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_defaults() {
        let config = SharedConfig::default();
        let snap = config.snapshot();
        assert!((snap.growth_factor - 1.15).abs() < 1e-12);
        assert_eq!(snap.simulated_delay_ms, 200);
    }

    #[test]
    fn negative_growth_factor_is_rejected() {
        let config = SharedConfig::default();
        assert!(!config.set_growth_factor(-1.0));
        assert!((config.snapshot().growth_factor - 1.15).abs() < 1e-12);
    }

    #[test]
    fn non_finite_growth_factor_is_rejected() {
        let config = SharedConfig::default();
        assert!(!config.set_growth_factor(f64::NAN));
        assert!(!config.set_growth_factor(f64::INFINITY));
        assert!((config.snapshot().growth_factor - 1.15).abs() < 1e-12);
    }

    #[test]
    fn valid_updates_apply_independently() {
        let config = SharedConfig::default();
        assert!(config.set_growth_factor(2.0));
        config.set_simulated_delay(0);

        let snap = config.snapshot();
        assert!((snap.growth_factor - 2.0).abs() < 1e-12);
        assert_eq!(snap.simulated_delay_ms, 0);
    }

    #[test]
    fn clones_share_the_same_store() {
        let config = SharedConfig::default();
        let handle = config.clone();
        assert!(handle.set_growth_factor(3.0));
        assert!((config.snapshot().growth_factor - 3.0).abs() < 1e-12);
    }

    #[test]
    fn snapshots_are_never_torn_across_concurrent_writes() {
        // A writer flips each field between two known values; every field a
        // reader observes must be one of the written values (a torn or
        // partially-copied struct would surface as a foreign value here).
        let config = SharedConfig::new(EngineConfig {
            growth_factor: 1.0,
            simulated_delay_ms: 10,
        });

        let writer_cfg = config.clone();
        let writer = std::thread::spawn(move || {
            for i in 0..500u64 {
                if i % 2 == 0 {
                    assert!(writer_cfg.set_growth_factor(2.0));
                    writer_cfg.set_simulated_delay(20);
                } else {
                    assert!(writer_cfg.set_growth_factor(1.0));
                    writer_cfg.set_simulated_delay(10);
                }
            }
        });

        for _ in 0..2000 {
            let snap = config.snapshot();
            let gf = snap.growth_factor;
            let ms = snap.simulated_delay_ms;
            assert!(
                ((gf - 1.0).abs() < 1e-12 || (gf - 2.0).abs() < 1e-12)
                    && (ms == 10 || ms == 20),
                "torn or foreign snapshot: growth_factor={gf}, delay={ms}"
            );
        }

        writer.join().unwrap();
    }
}
