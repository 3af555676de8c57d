//! Alert scheduler and deduplicator
//!
//! Periodic sweep over every active field with an assigned crop. Per field:
//! fetch weather, run the risk model, and raise an alert when the overall
//! score crosses the threshold - unless a duplicate for the same field and
//! hazard was already raised inside the suppression window.
//!
//! Each field's evaluation walks `Idle → Evaluating → {AlertRaised |
//! Suppressed} → Idle`; the terminal states are surfaced as
//! `EvaluationOutcome`. The check-suppression-then-create step runs under a
//! per-field async mutex, so an on-demand check overlapping the periodic
//! sweep for the same field can never raise a duplicate.
//!
//! Failure policy: a slow or failing provider call for one field is logged
//! and that field is skipped until the next cycle. No inline retries, and
//! no field can block the sweep for the others.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::SchedulerConfig;
use crate::error::{MonitorError, Result};
use crate::providers::WeatherProvider;
use crate::risk::{assess, RiskInput};
use crate::store::{AlertStore, FieldStore, MonitoredField, NotificationDispatcher};
use crate::types::{Alert, RiskAssessment};

/// Terminal state of one field evaluation
#[derive(Debug)]
pub enum EvaluationOutcome {
    /// Risk crossed the threshold and no recent duplicate existed
    AlertRaised {
        alert: Alert,
        assessment: RiskAssessment,
    },
    /// Risk crossed the threshold but a recent alert already covers it
    Suppressed {
        existing: Alert,
        assessment: RiskAssessment,
    },
    /// Risk stayed under the alert threshold
    BelowThreshold { assessment: RiskAssessment },
}

/// Periodic risk evaluation and alert deduplication over all fields
pub struct AlertScheduler {
    fields: Arc<dyn FieldStore>,
    alerts: Arc<dyn AlertStore>,
    weather: Arc<dyn WeatherProvider>,
    notifier: Arc<dyn NotificationDispatcher>,
    config: SchedulerConfig,
    /// Per-field locks making check-then-create atomic across overlapping
    /// sweeps and on-demand checks
    field_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl AlertScheduler {
    pub fn new(
        fields: Arc<dyn FieldStore>,
        alerts: Arc<dyn AlertStore>,
        weather: Arc<dyn WeatherProvider>,
        notifier: Arc<dyn NotificationDispatcher>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            fields,
            alerts,
            weather,
            notifier,
            config,
            field_locks: DashMap::new(),
        }
    }

    /// Run the periodic sweep loop until cancelled (call from tokio::spawn).
    pub async fn run(self: Arc<Self>, cancel: CancellationToken) {
        let interval = Duration::from_secs(self.config.sweep_interval_secs);
        info!(
            interval_secs = self.config.sweep_interval_secs,
            field_timeout_secs = self.config.field_timeout_secs,
            "alert scheduler started"
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("alert scheduler stopped");
                    return;
                }
                _ = tokio::time::sleep(interval) => {
                    self.sweep().await;
                }
            }
        }
    }

    /// One full sweep: expire stale alerts, then evaluate every field
    /// concurrently under the per-field deadline.
    pub async fn sweep(&self) {
        match self.alerts.deactivate_expired(Utc::now()).await {
            Ok(0) => {}
            Ok(n) => info!(expired = n, "deactivated expired alerts"),
            Err(e) => warn!(error = %e, "alert expiry sweep failed"),
        }

        let fields = match self.fields.list_active_fields_with_crop().await {
            Ok(fields) => fields,
            Err(e) => {
                warn!(error = %e, "could not list fields - skipping sweep");
                return;
            }
        };

        let evaluations = fields.iter().map(|field| async move {
            match self.check_field(field).await {
                Ok(EvaluationOutcome::AlertRaised { alert, .. }) => {
                    info!(field = %field.field_id, hazard = %alert.hazard, "alert raised");
                }
                Ok(EvaluationOutcome::Suppressed { existing, .. }) => {
                    debug!(
                        field = %field.field_id,
                        existing = %existing.id,
                        "alert suppressed - duplicate inside window"
                    );
                }
                Ok(EvaluationOutcome::BelowThreshold { assessment }) => {
                    debug!(
                        field = %field.field_id,
                        score = %format!("{:.2}", assessment.overall_score),
                        "below alert threshold"
                    );
                }
                // Skip-and-retry-next-cycle: sweep errors are logged, never retried inline
                Err(e) => {
                    warn!(field = %field.field_id, error = %e, "field skipped this cycle");
                }
            }
        });
        futures::future::join_all(evaluations).await;
        debug!(fields = fields.len(), "sweep complete");
    }

    /// Evaluate one field under the per-field deadline.
    ///
    /// On-demand checks and the periodic sweep share this exact path (and
    /// its lock), so their deduplication semantics are identical.
    pub async fn check_field(&self, field: &MonitoredField) -> Result<EvaluationOutcome> {
        let deadline = Duration::from_secs(self.config.field_timeout_secs);
        tokio::time::timeout(deadline, self.evaluate_field(field))
            .await
            .map_err(|_| MonitorError::ProviderTimeout {
                provider: "field evaluation",
                seconds: self.config.field_timeout_secs,
            })?
    }

    async fn evaluate_field(&self, field: &MonitoredField) -> Result<EvaluationOutcome> {
        let (weather, forecast) = self
            .weather
            .fetch_weather(field.latitude, field.longitude)
            .await?;

        let assessment = assess(&RiskInput {
            field_id: &field.field_id,
            crop: field.crop,
            stage: field.stage,
            soil: field.soil,
            irrigation: field.irrigation,
            weather,
            forecast: &forecast,
        })?;

        if assessment.overall_score < self.config.alert_threshold {
            return Ok(EvaluationOutcome::BelowThreshold { assessment });
        }

        // Atomic region: the suppression lookup and the insert must not
        // interleave with another evaluation of the same field.
        let lock = self
            .field_locks
            .entry(field.field_id.clone())
            .or_default()
            .clone();
        let _guard = lock.lock().await;

        let (hazard, _) = assessment.hazards.dominant();
        let window = chrono::Duration::hours(self.config.suppression_window_hours);
        if let Some(existing) = self
            .alerts
            .find_recent_alert(&field.field_id, hazard, window)
            .await?
        {
            return Ok(EvaluationOutcome::Suppressed {
                existing,
                assessment,
            });
        }

        let alert = Alert::new(
            &field.field_id,
            hazard,
            assessment.alert_level,
            format!(
                "{} risk {} for {} ({} stage): overall score {:.1}",
                hazard, assessment.alert_level, field.crop, assessment.stage, assessment.overall_score
            ),
            Utc::now(),
            self.config.alert_validity_hours,
        );
        self.alerts.create_alert(alert.clone()).await?;

        // Fire-and-forget dispatch: delivery failure is logged, never fatal
        // to alert creation.
        let notifier = Arc::clone(&self.notifier);
        let dispatched = alert.clone();
        tokio::spawn(async move {
            match notifier.send(&dispatched).await {
                Ok(()) => debug!(alert = %dispatched.id, "notification delivered"),
                Err(e) => warn!(alert = %dispatched.id, error = %e, "notification dispatch failed"),
            }
        });

        Ok(EvaluationOutcome::AlertRaised { alert, assessment })
    }
}
