//! Driver view models.

use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

/// Driver joined with its latest stored HOS snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, FromQueryResult)]
pub struct DriverSummary {
    pub driver_id: String,
    pub first_name: String,
    pub last_name: String,
    pub current_status: Option<String>,
    pub available_drive_time: Option<i32>,
    pub used_cycle_hours: Option<i32>,
    pub compliance_status: Option<String>,
    pub computed_at: Option<DateTime<Utc>>,
}

impl DriverSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Stored compliance status, or "pending" when never computed.
    pub fn compliance_label(&self) -> &str {
        self.compliance_status.as_deref().unwrap_or("pending")
    }
}
