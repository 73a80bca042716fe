//! Duty log DTOs and conversion from stored rows.

use crate::entities::duty_logs;
use crate::error::{AppError, Result};
use crate::hos::{DutyLog, DutyStatusEntry};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// DTO for recording a driver's daily log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDutyLog {
    pub driver_id: String,
    pub log_date: NaiveDate,
    pub logs: Vec<DutyStatusEntry>,
}

impl CreateDutyLog {
    /// Validate before storing.
    ///
    /// Entries must be well-formed intervals starting within one day of the
    /// log date (sleeper splits and overnight drives spill over midnight).
    pub fn validate(&self) -> Result<()> {
        if self.driver_id.trim().is_empty() {
            return Err(AppError::validation("Driver id cannot be empty"));
        }
        if self.logs.is_empty() {
            return Err(AppError::validation("Duty log must contain at least one entry"));
        }

        let (Some(earliest), Some(latest)) = (
            self.log_date.checked_sub_days(Days::new(1)),
            self.log_date.checked_add_days(Days::new(1)),
        ) else {
            return Err(AppError::validation(format!("Log date {} is out of range", self.log_date)));
        };

        for (idx, entry) in self.logs.iter().enumerate() {
            if entry.end_time < entry.start_time {
                return Err(AppError::validation(format!(
                    "Entry {idx} ends before it starts ({} < {})",
                    entry.end_time, entry.start_time
                )));
            }
            let start_date = entry.start_time.date_naive();
            if start_date < earliest || start_date > latest {
                return Err(AppError::validation(format!(
                    "Entry {idx} starts on {start_date}, outside log date {}",
                    self.log_date
                )));
            }
        }
        Ok(())
    }

    /// Entries as the JSON value stored in the `logs` column.
    pub fn entries_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(&self.logs)?)
    }
}

impl TryFrom<duty_logs::Model> for DutyLog {
    type Error = AppError;

    fn try_from(model: duty_logs::Model) -> Result<Self> {
        let logs: Vec<DutyStatusEntry> = serde_json::from_value(model.logs)?;
        Ok(DutyLog {
            driver_id: Some(model.driver_id),
            log_date: Some(model.log_date),
            logs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hos::DutyStatus;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, h, 0, 0).unwrap()
    }

    fn sample() -> CreateDutyLog {
        CreateDutyLog {
            driver_id: "drv-1".to_string(),
            log_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            logs: vec![
                DutyStatusEntry::new(DutyStatus::OnDuty, at(10, 6), at(10, 7)),
                DutyStatusEntry::new(DutyStatus::Driving, at(10, 7), at(10, 12)),
            ],
        }
    }

    #[test]
    fn test_valid_log() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_empty_driver_rejected() {
        let mut log = sample();
        log.driver_id = "  ".to_string();
        assert!(matches!(log.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_empty_entries_rejected() {
        let mut log = sample();
        log.logs.clear();
        assert!(log.validate().is_err());
    }

    #[test]
    fn test_reversed_entry_rejected() {
        let mut log = sample();
        log.logs.push(DutyStatusEntry::new(DutyStatus::Driving, at(10, 15), at(10, 14)));
        assert!(log.validate().is_err());
    }

    #[test]
    fn test_entry_outside_log_date_rejected() {
        let mut log = sample();
        log.logs.push(DutyStatusEntry::new(DutyStatus::Driving, at(13, 8), at(13, 9)));
        assert!(log.validate().is_err());

        let mut overnight = sample();
        overnight
            .logs
            .push(DutyStatusEntry::new(DutyStatus::SleeperBerth, at(9, 22), at(10, 5)));
        assert!(overnight.validate().is_ok());
    }

    #[test]
    fn test_extreme_log_date_rejected() {
        let imported: CreateDutyLog = serde_json::from_value(serde_json::json!({
            "driverId": "drv-1",
            "logDate": "-262143-01-01",
            "logs": serde_json::to_value(sample().logs).unwrap()
        }))
        .unwrap();
        assert!(matches!(imported.validate(), Err(AppError::Validation(_))));

        let mut log = sample();
        log.log_date = NaiveDate::MAX;
        assert!(matches!(log.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_stored_row_converts() {
        let log = sample();
        let model = duty_logs::Model {
            id: 1,
            driver_id: log.driver_id.clone(),
            log_date: log.log_date,
            logs: log.entries_json().unwrap(),
            created_at: at(10, 18).fixed_offset(),
        };

        let converted = DutyLog::try_from(model).unwrap();
        assert_eq!(converted.driver_id.as_deref(), Some("drv-1"));
        assert_eq!(converted.logs, log.logs);
    }

    #[test]
    fn test_malformed_stored_row_fails() {
        let model = duty_logs::Model {
            id: 2,
            driver_id: "drv-1".to_string(),
            log_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            logs: serde_json::json!([{ "status": "napping", "startTime": "x", "endTime": "y" }]),
            created_at: at(10, 18).fixed_offset(),
        };
        assert!(matches!(DutyLog::try_from(model), Err(AppError::Json(_))));
    }
}
