//! Persistence and notification collaborator traits
//!
//! The monitoring core does not own a database. Fields, alerts, and land
//! records live behind these traits; the surrounding application wires in
//! its real storage, and tests (plus embedded deployments) use the bundled
//! in-memory implementation.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::types::{
    Alert, CropType, GrowthStage, Hazard, IrrigationType, LandRecord, SoilType,
    VerificationOutcome,
};

pub use memory::MemoryStore;

/// A registered field eligible for scheduled monitoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoredField {
    pub field_id: String,
    pub crop: CropType,
    pub stage: GrowthStage,
    pub soil: SoilType,
    pub irrigation: IrrigationType,
    pub latitude: f64,
    pub longitude: f64,
    pub area_ha: f64,
}

/// Field registry collaborator
#[async_trait]
pub trait FieldStore: Send + Sync {
    /// All active fields that have an assigned crop - the sweep population.
    async fn list_active_fields_with_crop(&self) -> Result<Vec<MonitoredField>>;
}

/// Alert persistence collaborator
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Most recent active alert for `(field, hazard)` raised within `window`
    /// of now, if any.
    async fn find_recent_alert(
        &self,
        field_id: &str,
        hazard: Hazard,
        window: Duration,
    ) -> Result<Option<Alert>>;

    /// Persist a new alert.
    async fn create_alert(&self, alert: Alert) -> Result<()>;

    /// Deactivate every active alert whose `valid_until` has passed.
    /// Returns the number deactivated.
    async fn deactivate_expired(&self, now: DateTime<Utc>) -> Result<usize>;

    /// Mark an alert acknowledged. Returns false when the id is unknown.
    async fn acknowledge(&self, alert_id: Uuid) -> Result<bool>;

    /// All currently active alerts for a field.
    async fn active_alerts(&self, field_id: &str) -> Result<Vec<Alert>>;
}

/// Land-record persistence collaborator for verification
#[async_trait]
pub trait VerificationFieldStore: Send + Sync {
    async fn load_record(&self, record_id: &str) -> Result<LandRecord>;
    async fn save_outcome(&self, outcome: &VerificationOutcome) -> Result<()>;
}

/// Notification dispatch collaborator.
///
/// Fire-and-forget from the scheduler's perspective: a dispatch failure is
/// logged and never blocks or fails alert creation.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn send(&self, alert: &Alert) -> Result<()>;
}
