//! Alert record and lifecycle

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::crop::Hazard;
use super::risk::AlertLevel;

/// A raised field alert.
///
/// Created by the scheduler when risk crosses the alert threshold and no
/// recent duplicate exists. After creation only two things ever change:
/// `acknowledged` (operator action) and `active` (expiry sweep).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub field_id: String,
    pub hazard: Hazard,
    pub severity: AlertLevel,
    pub message: String,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub acknowledged: bool,
    pub active: bool,
}

impl Alert {
    /// Build a new alert valid for `validity_hours` from `now`.
    pub fn new(
        field_id: &str,
        hazard: Hazard,
        severity: AlertLevel,
        message: String,
        now: DateTime<Utc>,
        validity_hours: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            field_id: field_id.to_string(),
            hazard,
            severity,
            message,
            valid_from: now,
            valid_until: now + Duration::hours(validity_hours),
            acknowledged: false,
            active: true,
        }
    }

    /// Whether `valid_until` has passed
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.valid_until
    }

    /// Operator acknowledgement - the only post-creation mutation besides
    /// expiry deactivation.
    pub fn acknowledge(&mut self) {
        self.acknowledged = true;
    }
}
