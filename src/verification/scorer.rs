//! Ensemble verification scorer
//!
//! Fans out all evidence layers concurrently, joins every one of them (no
//! early exit), and reduces the results into a single trust tier. A layer
//! that errors or times out degrades to a zero-score result with an
//! explanatory insight - the ensemble always produces an outcome, never an
//! error, because "needs manual review" is a valid terminal state.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::types::{
    LandRecord, VerificationLayerResult, VerificationOutcome, VerificationState, VerificationTier,
};
use crate::verification::layers::{default_layers, VerificationLayer};

/// Ensemble scorer over a fixed layer set
pub struct EnsembleScorer {
    layers: Vec<Arc<dyn VerificationLayer>>,
    layer_timeout: Duration,
}

impl EnsembleScorer {
    /// Scorer with the default five-layer ensemble
    pub fn new(layer_timeout_secs: u64) -> Self {
        Self::with_layers(default_layers(), layer_timeout_secs)
    }

    /// Scorer over a custom layer set (weights should sum to 1; the blend
    /// normalizes by the actual total as a guard)
    pub fn with_layers(
        layers: Vec<Arc<dyn VerificationLayer>>,
        layer_timeout_secs: u64,
    ) -> Self {
        Self {
            layers,
            layer_timeout: Duration::from_secs(layer_timeout_secs),
        }
    }

    /// Verify one land record.
    ///
    /// State walk: `Unverified → EvaluatingLayers → Scored → terminal`.
    /// All layers run concurrently; the join is a barrier - a slow or failed
    /// layer contributes score 0 rather than aborting the others.
    pub async fn verify(&self, record: &LandRecord) -> VerificationOutcome {
        let record = Arc::new(record.clone());
        let mut join_set: JoinSet<(usize, f64, VerificationLayerResult)> = JoinSet::new();

        for (slot, layer) in self.layers.iter().enumerate() {
            let layer = Arc::clone(layer);
            let record = Arc::clone(&record);
            let timeout = self.layer_timeout;
            join_set.spawn(async move {
                let name = layer.name();
                let weight = layer.weight();
                let result = match tokio::time::timeout(timeout, layer.evaluate(&record)).await {
                    Ok(Ok(result)) => result,
                    Ok(Err(e)) => {
                        warn!(layer = name, error = %e, "verification layer failed");
                        VerificationLayerResult::failed(name, &e.to_string())
                    }
                    Err(_) => {
                        warn!(
                            layer = name,
                            timeout_secs = timeout.as_secs(),
                            "verification layer timed out"
                        );
                        VerificationLayerResult::failed(
                            name,
                            &format!("timed out after {}s", timeout.as_secs()),
                        )
                    }
                };
                (slot, weight, result)
            });
        }

        // Fan-in barrier: every layer joins, failures included
        let mut slots: Vec<Option<(f64, VerificationLayerResult)>> =
            (0..self.layers.len()).map(|_| None).collect();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((slot, weight, result)) => slots[slot] = Some((weight, result)),
                Err(e) => warn!(error = %e, "verification layer task panicked"),
            }
        }

        // A panicked task left its slot empty; degrade it like any failure
        let weighted: Vec<(f64, VerificationLayerResult)> = slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.unwrap_or_else(|| {
                    (
                        self.layers[i].weight(),
                        VerificationLayerResult::failed(self.layers[i].name(), "task aborted"),
                    )
                })
            })
            .collect();

        let total_weight: f64 = weighted.iter().map(|(w, _)| w).sum();
        let overall_score = if total_weight > 0.0 {
            weighted
                .iter()
                .map(|(w, r)| r.score * w)
                .sum::<f64>()
                / total_weight
        } else {
            0.0
        };
        let confidence = if weighted.is_empty() {
            0.0
        } else {
            weighted.iter().map(|(_, r)| r.confidence).sum::<f64>() / weighted.len() as f64
        };

        let tier = VerificationTier::from_scores(overall_score, confidence);
        let state = VerificationState::from_tier(tier);
        let layer_results: Vec<VerificationLayerResult> =
            weighted.into_iter().map(|(_, r)| r).collect();

        info!(
            record = %record.record_id,
            overall = %format!("{overall_score:.1}"),
            confidence = %format!("{confidence:.1}"),
            tier = %tier,
            "verification scored"
        );

        VerificationOutcome {
            record_id: record.record_id.clone(),
            overall_score,
            confidence,
            tier,
            state,
            recommendation: tier.recommendation().to_string(),
            next_steps: tier.next_steps().iter().map(|s| s.to_string()).collect(),
            layer_results,
            evaluated_at: Utc::now(),
        }
    }
}
