//! HOS snapshot repository.

use crate::entities::{hos_statuses, prelude::*};
use crate::hos::DriverHosStatus;
use crate::models::DriverSummary;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::*;

/// Insert or replace a driver's snapshot.
pub async fn upsert(db: &DatabaseConnection, status: &DriverHosStatus, computed_at: DateTime<Utc>) -> Result<(), DbErr> {
    let violations = serde_json::to_value(&status.violations).map_err(|e| DbErr::Json(e.to_string()))?;

    let model = hos_statuses::ActiveModel {
        driver_id: Set(status.driver_id.clone()),
        current_status: Set(status.current_status.as_str().to_owned()),
        available_drive_time: Set(to_i32(status.available_drive_time)),
        available_on_duty_time: Set(to_i32(status.available_on_duty_time)),
        used_drive_time: Set(to_i32(status.used_drive_time)),
        used_on_duty_time: Set(to_i32(status.used_on_duty_time)),
        cycle_hours: Set(to_i32(status.cycle_hours)),
        used_cycle_hours: Set(to_i32(status.used_cycle_hours)),
        restart_available: Set(status.restart_available),
        violations: Set(violations),
        last_logged_at: Set(status.last_logged_at.map(|t| t.fixed_offset())),
        compliance_status: Set(status.compliance_status.as_str().to_owned()),
        computed_at: Set(computed_at.fixed_offset()),
    };

    HosStatuses::insert(model)
        .on_conflict(
            OnConflict::column(hos_statuses::Column::DriverId)
                .update_columns([
                    hos_statuses::Column::CurrentStatus,
                    hos_statuses::Column::AvailableDriveTime,
                    hos_statuses::Column::AvailableOnDutyTime,
                    hos_statuses::Column::UsedDriveTime,
                    hos_statuses::Column::UsedOnDutyTime,
                    hos_statuses::Column::CycleHours,
                    hos_statuses::Column::UsedCycleHours,
                    hos_statuses::Column::RestartAvailable,
                    hos_statuses::Column::Violations,
                    hos_statuses::Column::LastLoggedAt,
                    hos_statuses::Column::ComplianceStatus,
                    hos_statuses::Column::ComputedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    Ok(())
}

/// Get the stored snapshot for a driver.
pub async fn get_by_driver(db: &DatabaseConnection, driver_id: &str) -> Result<Option<hos_statuses::Model>, DbErr> {
    HosStatuses::find_by_id(driver_id.to_owned()).one(db).await
}

/// List active drivers of an organization with their stored snapshot.
pub async fn list_for_organization(db: &DatabaseConnection, organization_id: &str) -> Result<Vec<DriverSummary>, DbErr> {
    DriverSummary::find_by_statement(Statement::from_sql_and_values(
        DbBackend::Postgres,
        r#"
        SELECT
            d.id AS driver_id,
            d.first_name,
            d.last_name,
            s.current_status,
            s.available_drive_time,
            s.used_cycle_hours,
            s.compliance_status,
            s.computed_at
        FROM app.drivers d
        LEFT JOIN app.hos_statuses s ON s.driver_id = d.id
        WHERE d.organization_id = $1 AND d.is_active
        ORDER BY d.last_name, d.first_name
        "#,
        [organization_id.into()],
    ))
    .all(db)
    .await
}

/// Minute counts stay far below i32::MAX; saturate rather than wrap.
fn to_i32(minutes: i64) -> i32 {
    i32::try_from(minutes).unwrap_or(i32::MAX)
}
