//! In-memory store
//!
//! Backs every collaborator trait with `RwLock`-guarded maps. Used by the
//! test suites and small embedded deployments; production wiring replaces
//! it with the application's own persistence.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{MonitorError, Result};
use crate::store::{
    AlertStore, FieldStore, MonitoredField, NotificationDispatcher, VerificationFieldStore,
};
use crate::types::{Alert, Hazard, LandRecord, VerificationOutcome};

/// Shared in-memory implementation of all store traits
#[derive(Default)]
pub struct MemoryStore {
    fields: RwLock<Vec<MonitoredField>>,
    alerts: RwLock<Vec<Alert>>,
    records: RwLock<HashMap<String, LandRecord>>,
    outcomes: RwLock<Vec<VerificationOutcome>>,
    notifications: RwLock<Vec<Uuid>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_field(&self, field: MonitoredField) {
        self.fields.write().await.push(field);
    }

    pub async fn add_record(&self, record: LandRecord) {
        self.records
            .write()
            .await
            .insert(record.record_id.clone(), record);
    }

    /// All alerts ever created, active or not (test inspection)
    pub async fn all_alerts(&self) -> Vec<Alert> {
        self.alerts.read().await.clone()
    }

    /// Alert ids that were dispatched as notifications (test inspection)
    pub async fn sent_notifications(&self) -> Vec<Uuid> {
        self.notifications.read().await.clone()
    }

    pub async fn saved_outcomes(&self) -> Vec<VerificationOutcome> {
        self.outcomes.read().await.clone()
    }
}

#[async_trait]
impl FieldStore for MemoryStore {
    async fn list_active_fields_with_crop(&self) -> Result<Vec<MonitoredField>> {
        Ok(self.fields.read().await.clone())
    }
}

#[async_trait]
impl AlertStore for MemoryStore {
    async fn find_recent_alert(
        &self,
        field_id: &str,
        hazard: Hazard,
        window: Duration,
    ) -> Result<Option<Alert>> {
        let cutoff = Utc::now() - window;
        let alerts = self.alerts.read().await;
        Ok(alerts
            .iter()
            .filter(|a| {
                a.active && a.field_id == field_id && a.hazard == hazard && a.valid_from >= cutoff
            })
            .max_by_key(|a| a.valid_from)
            .cloned())
    }

    async fn create_alert(&self, alert: Alert) -> Result<()> {
        self.alerts.write().await.push(alert);
        Ok(())
    }

    async fn deactivate_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        let mut alerts = self.alerts.write().await;
        let mut deactivated = 0;
        for alert in alerts.iter_mut() {
            if alert.active && alert.is_expired(now) {
                alert.active = false;
                deactivated += 1;
            }
        }
        Ok(deactivated)
    }

    async fn acknowledge(&self, alert_id: Uuid) -> Result<bool> {
        let mut alerts = self.alerts.write().await;
        match alerts.iter_mut().find(|a| a.id == alert_id) {
            Some(alert) => {
                alert.acknowledge();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn active_alerts(&self, field_id: &str) -> Result<Vec<Alert>> {
        let alerts = self.alerts.read().await;
        Ok(alerts
            .iter()
            .filter(|a| a.active && a.field_id == field_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl VerificationFieldStore for MemoryStore {
    async fn load_record(&self, record_id: &str) -> Result<LandRecord> {
        self.records
            .read()
            .await
            .get(record_id)
            .cloned()
            .ok_or_else(|| MonitorError::Store(format!("unknown land record: {record_id}")))
    }

    async fn save_outcome(&self, outcome: &VerificationOutcome) -> Result<()> {
        self.outcomes.write().await.push(outcome.clone());
        Ok(())
    }
}

#[async_trait]
impl NotificationDispatcher for MemoryStore {
    async fn send(&self, alert: &Alert) -> Result<()> {
        self.notifications.write().await.push(alert.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AlertLevel;

    fn alert(field: &str, hazard: Hazard, hours_ago: i64) -> Alert {
        let mut a = Alert::new(
            field,
            hazard,
            AlertLevel::High,
            format!("{hazard} risk HIGH"),
            Utc::now() - Duration::hours(hours_ago),
            24,
        );
        a.active = true;
        a
    }

    #[tokio::test]
    async fn recent_alert_lookup_respects_window() {
        let store = MemoryStore::new();
        store
            .create_alert(alert("f1", Hazard::Drought, 8))
            .await
            .unwrap();
        store
            .create_alert(alert("f1", Hazard::Drought, 2))
            .await
            .unwrap();

        let found = store
            .find_recent_alert("f1", Hazard::Drought, Duration::hours(6))
            .await
            .unwrap();
        assert!(found.is_some(), "2h-old alert is inside the 6h window");

        let found = store
            .find_recent_alert("f1", Hazard::Drought, Duration::hours(1))
            .await
            .unwrap();
        assert!(found.is_none(), "nothing raised in the last hour");
    }

    #[tokio::test]
    async fn lookup_is_scoped_to_field_and_hazard() {
        let store = MemoryStore::new();
        store
            .create_alert(alert("f1", Hazard::Drought, 1))
            .await
            .unwrap();

        assert!(store
            .find_recent_alert("f2", Hazard::Drought, Duration::hours(6))
            .await
            .unwrap()
            .is_none());
        assert!(store
            .find_recent_alert("f1", Hazard::Heat, Duration::hours(6))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn expiry_sweep_deactivates_only_stale_alerts() {
        let store = MemoryStore::new();
        let mut stale = alert("f1", Hazard::Wind, 30);
        stale.valid_until = Utc::now() - Duration::hours(6);
        store.create_alert(stale).await.unwrap();
        store
            .create_alert(alert("f1", Hazard::Drought, 1))
            .await
            .unwrap();

        let deactivated = store.deactivate_expired(Utc::now()).await.unwrap();
        assert_eq!(deactivated, 1);
        let active = store.active_alerts("f1").await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].hazard, Hazard::Drought);
    }

    #[tokio::test]
    async fn acknowledge_round_trip() {
        let store = MemoryStore::new();
        let a = alert("f1", Hazard::Heat, 0);
        let id = a.id;
        store.create_alert(a).await.unwrap();

        assert!(store.acknowledge(id).await.unwrap());
        assert!(!store.acknowledge(Uuid::new_v4()).await.unwrap());
        let alerts = store.all_alerts().await;
        assert!(alerts[0].acknowledged);
    }

    #[tokio::test]
    async fn unknown_record_is_a_store_error() {
        let store = MemoryStore::new();
        let err = store.load_record("nope").await.unwrap_err();
        assert!(matches!(err, MonitorError::Store(_)));
    }
}
