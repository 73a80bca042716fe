//! HOS snapshot view models.

use crate::entities::hos_statuses;
use crate::error::{AppError, Result};
use crate::hos::{ComplianceStatus, DriverHosStatus, DutyStatus, Violation};
use chrono::Utc;
use serde::Serialize;

/// One driver's status with display information, for reports.
#[derive(Debug, Clone, Serialize)]
pub struct FleetStatusRow {
    pub driver_name: String,
    pub status: DriverHosStatus,
}

impl TryFrom<hos_statuses::Model> for DriverHosStatus {
    type Error = AppError;

    fn try_from(model: hos_statuses::Model) -> Result<Self> {
        let current_status: DutyStatus = model.current_status.parse().map_err(AppError::parse)?;
        let compliance_status: ComplianceStatus = model.compliance_status.parse().map_err(AppError::parse)?;
        let violations: Vec<Violation> = serde_json::from_value(model.violations)?;

        Ok(DriverHosStatus {
            driver_id: model.driver_id,
            current_status,
            available_drive_time: i64::from(model.available_drive_time),
            available_on_duty_time: i64::from(model.available_on_duty_time),
            used_drive_time: i64::from(model.used_drive_time),
            used_on_duty_time: i64::from(model.used_on_duty_time),
            cycle_hours: i64::from(model.cycle_hours),
            used_cycle_hours: i64::from(model.used_cycle_hours),
            restart_available: model.restart_available,
            violations,
            last_logged_at: model.last_logged_at.map(|t| t.with_timezone(&Utc)),
            compliance_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hos::ViolationType;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_snapshot_row_converts() {
        let computed_at = Utc.with_ymd_and_hms(2025, 3, 10, 18, 0, 0).unwrap();
        let model = hos_statuses::Model {
            driver_id: "drv-3".to_string(),
            current_status: "driving".to_string(),
            available_drive_time: 0,
            available_on_duty_time: 100,
            used_drive_time: 720,
            used_on_duty_time: 740,
            cycle_hours: 4200,
            used_cycle_hours: 2000,
            restart_available: false,
            violations: serde_json::json!([
                { "type": "11_hour", "severity": "major", "message": "Exceeded 11-hour driving limit" }
            ]),
            last_logged_at: Some(computed_at.fixed_offset()),
            compliance_status: "violation".to_string(),
            computed_at: computed_at.fixed_offset(),
        };

        let status = DriverHosStatus::try_from(model).unwrap();
        assert_eq!(status.current_status, DutyStatus::Driving);
        assert_eq!(status.compliance_status, ComplianceStatus::Violation);
        assert_eq!(status.violations[0].violation_type, ViolationType::ElevenHour);
        assert_eq!(status.last_logged_at, Some(computed_at));
    }

    #[test]
    fn test_unknown_status_in_row_fails() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 18, 0, 0).unwrap().fixed_offset();
        let model = hos_statuses::Model {
            driver_id: "drv-3".to_string(),
            current_status: "lunch".to_string(),
            available_drive_time: 660,
            available_on_duty_time: 840,
            used_drive_time: 0,
            used_on_duty_time: 0,
            cycle_hours: 4200,
            used_cycle_hours: 0,
            restart_available: false,
            violations: serde_json::json!([]),
            last_logged_at: None,
            compliance_status: "pending".to_string(),
            computed_at: now,
        };
        assert!(matches!(DriverHosStatus::try_from(model), Err(AppError::Parse(_))));
    }
}
