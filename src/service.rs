//! HOS evaluation service orchestration.

use crate::config::AppConfig;
use crate::db::{driver, duty_log, hos_status};
use crate::entities::{drivers, duty_logs};
use crate::error::{AppError, Result};
use crate::hos::{ComplianceStatus, DriverHosStatus, DutyLog, calculate_hos_status};
use crate::models::{CreateDutyLog, FleetStatusRow};
use chrono::{DateTime, TimeDelta, Utc};
use sea_orm::DatabaseConnection;
use tracing::{debug, info, warn};

/// Result of a snapshot refresh.
#[derive(Debug, Clone)]
pub struct RefreshResult {
    pub drivers: usize,
    pub in_violation: usize,
    pub pending: usize,
    pub duration_secs: f64,
}

impl RefreshResult {
    /// Get summary message.
    pub fn summary(&self) -> String {
        format!(
            "Drivers: {}, In violation: {}, Pending: {} (took {:.1}s)",
            self.drivers, self.in_violation, self.pending, self.duration_secs
        )
    }
}

/// Service for loading duty logs and evaluating HOS status.
pub struct HosService {
    config: AppConfig,
    db: DatabaseConnection,
}

impl HosService {
    /// Create a new HOS service.
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Self {
        Self { config, db }
    }

    /// Current HOS status for one driver.
    pub async fn driver_status(&self, driver_id: &str) -> Result<DriverHosStatus> {
        self.driver_status_at(driver_id, Utc::now()).await
    }

    /// HOS status for one driver evaluated at `now`.
    pub async fn driver_status_at(&self, driver_id: &str, now: DateTime<Utc>) -> Result<DriverHosStatus> {
        if driver::get_by_id(&self.db, driver_id).await?.is_none() {
            return Err(AppError::not_found(format!("driver {driver_id}")));
        }
        let logs = self.load_logs(driver_id, now).await?;
        Ok(calculate_hos_status(driver_id, &logs, now))
    }

    /// Status of every active driver in an organization.
    pub async fn fleet_statuses(&self, organization_id: &str, now: DateTime<Utc>) -> Result<Vec<FleetStatusRow>> {
        let drivers = driver::list_active(&self.db, organization_id).await?;
        debug!("Evaluating {} drivers for {organization_id}", drivers.len());

        let mut rows = Vec::with_capacity(drivers.len());
        for d in drivers {
            let logs = self.load_logs(&d.id, now).await?;
            let status = calculate_hos_status(&d.id, &logs, now);
            rows.push(FleetStatusRow {
                driver_name: d.full_name(),
                status,
            });
        }
        Ok(rows)
    }

    /// Recompute and persist snapshots for an organization.
    pub async fn refresh_snapshots(&self, organization_id: &str) -> Result<RefreshResult> {
        let start = std::time::Instant::now();
        let now = Utc::now();

        info!("Refreshing HOS snapshots for {organization_id}");

        let rows = self.fleet_statuses(organization_id, now).await?;
        for row in &rows {
            hos_status::upsert(&self.db, &row.status, now).await?;
            if row.status.has_violations() {
                warn!(
                    "Driver {} has {} HOS violation(s)",
                    row.status.driver_id,
                    row.status.violations.len()
                );
            }
        }

        let result = RefreshResult {
            drivers: rows.len(),
            in_violation: count_with(&rows, ComplianceStatus::Violation),
            pending: count_with(&rows, ComplianceStatus::Pending),
            duration_secs: start.elapsed().as_secs_f64(),
        };

        info!("HOS refresh complete: {}", result.summary());
        Ok(result)
    }

    /// Validate and store a daily log.
    pub async fn record_log(&self, log: &CreateDutyLog) -> Result<drivers::Model> {
        log.validate()?;

        let Some(owner) = driver::get_by_id(&self.db, &log.driver_id).await? else {
            return Err(AppError::not_found(format!("driver {}", log.driver_id)));
        };

        duty_log::create(&self.db, &log.driver_id, log.log_date, log.entries_json()?).await?;
        info!(
            "Stored {} duty entries for {} on {}",
            log.logs.len(),
            log.driver_id,
            log.log_date
        );
        Ok(owner)
    }

    /// Remove logs older than the retention cutoff.
    pub async fn purge_before(&self, cutoff: chrono::NaiveDate) -> Result<u64> {
        let deleted = duty_log::delete_before(&self.db, cutoff).await?;
        info!("Deleted {deleted} duty logs dated before {cutoff}");
        Ok(deleted)
    }

    async fn load_logs(&self, driver_id: &str, now: DateTime<Utc>) -> Result<Vec<DutyLog>> {
        let since = history_start(now, self.config.hos.history_days);
        let mut rows = duty_log::get_for_driver_since(&self.db, driver_id, since).await?;
        if rows.is_empty() {
            // Restart and pending state still depend on the last log before the window.
            rows.extend(duty_log::get_latest_before(&self.db, driver_id, since).await?);
            if !rows.is_empty() {
                debug!("No logs for {driver_id} since {since}, using latest earlier log");
            }
        }
        to_duty_logs(rows)
    }
}

/// First log date loaded for an evaluation at `now`.
pub fn history_start(now: DateTime<Utc>, history_days: u32) -> chrono::NaiveDate {
    (now - TimeDelta::days(i64::from(history_days))).date_naive()
}

fn to_duty_logs(rows: Vec<duty_logs::Model>) -> Result<Vec<DutyLog>> {
    rows.into_iter().map(DutyLog::try_from).collect()
}

fn count_with(rows: &[FleetStatusRow], status: ComplianceStatus) -> usize {
    rows.iter().filter(|r| r.status.compliance_status == status).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hos::{DutyStatus, DutyStatusEntry};
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn test_history_start_covers_cycle() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 0, 30, 0).unwrap();
        assert_eq!(history_start(now, 8), NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
    }

    #[test]
    fn test_log_before_history_window_keeps_restart() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 18, 0, 0).unwrap();
        let old_date = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        assert!(old_date < history_start(now, 8));

        let start = Utc.with_ymd_and_hms(2025, 2, 28, 6, 0, 0).unwrap();
        let entries = vec![DutyStatusEntry::new(DutyStatus::Driving, start, start + TimeDelta::hours(8))];
        let model = duty_logs::Model {
            id: 7,
            driver_id: "drv-1".to_string(),
            log_date: old_date,
            logs: serde_json::to_value(&entries).unwrap(),
            created_at: now.fixed_offset(),
        };

        let logs = to_duty_logs(vec![model]).unwrap();
        let status = calculate_hos_status("drv-1", &logs, now);
        assert_eq!(status.compliance_status, ComplianceStatus::Compliant);
        assert!(status.restart_available);
        assert_eq!(status.used_cycle_hours, 0);

        let empty = calculate_hos_status("drv-1", &to_duty_logs(Vec::new()).unwrap(), now);
        assert_eq!(empty.compliance_status, ComplianceStatus::Pending);
        assert!(!empty.restart_available);
    }

    #[test]
    fn test_refresh_summary() {
        let result = RefreshResult {
            drivers: 12,
            in_violation: 2,
            pending: 1,
            duration_secs: 0.42,
        };
        assert_eq!(result.summary(), "Drivers: 12, In violation: 2, Pending: 1 (took 0.4s)");
    }

    #[test]
    fn test_count_with() {
        let mut flagged = DriverHosStatus::pending("b");
        flagged.compliance_status = ComplianceStatus::Violation;
        let rows = vec![
            FleetStatusRow {
                driver_name: "A".to_string(),
                status: DriverHosStatus::pending("a"),
            },
            FleetStatusRow {
                driver_name: "B".to_string(),
                status: flagged,
            },
        ];
        assert_eq!(count_with(&rows, ComplianceStatus::Pending), 1);
        assert_eq!(count_with(&rows, ComplianceStatus::Violation), 1);
        assert_eq!(count_with(&rows, ComplianceStatus::Compliant), 0);
    }
}
