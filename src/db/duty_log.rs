//! Duty log repository.

use crate::entities::{duty_logs, prelude::*};
use chrono::{NaiveDate, Utc};
use sea_orm::*;

/// Get a driver's logs dated on or after `since`, oldest first.
pub async fn get_for_driver_since(
    db: &DatabaseConnection,
    driver_id: &str,
    since: NaiveDate,
) -> Result<Vec<duty_logs::Model>, DbErr> {
    DutyLogs::find()
        .filter(duty_logs::Column::DriverId.eq(driver_id))
        .filter(duty_logs::Column::LogDate.gte(since))
        .order_by_asc(duty_logs::Column::LogDate)
        .all(db)
        .await
}

/// Get a driver's most recent log dated before `before`.
pub async fn get_latest_before(
    db: &DatabaseConnection,
    driver_id: &str,
    before: NaiveDate,
) -> Result<Option<duty_logs::Model>, DbErr> {
    DutyLogs::find()
        .filter(duty_logs::Column::DriverId.eq(driver_id))
        .filter(duty_logs::Column::LogDate.lt(before))
        .order_by_desc(duty_logs::Column::LogDate)
        .order_by_desc(duty_logs::Column::Id)
        .one(db)
        .await
}

/// Store a daily log. Entries must already be validated.
pub async fn create(
    db: &DatabaseConnection,
    driver_id: &str,
    log_date: NaiveDate,
    entries: serde_json::Value,
) -> Result<duty_logs::Model, DbErr> {
    let model = duty_logs::ActiveModel {
        driver_id: Set(driver_id.to_owned()),
        log_date: Set(log_date),
        logs: Set(entries),
        created_at: Set(Utc::now().fixed_offset()),
        ..Default::default()
    };
    model.insert(db).await
}

/// Delete logs dated before a given date.
pub async fn delete_before(db: &DatabaseConnection, before_date: NaiveDate) -> Result<u64, DbErr> {
    let result = DutyLogs::delete_many()
        .filter(duty_logs::Column::LogDate.lt(before_date))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
