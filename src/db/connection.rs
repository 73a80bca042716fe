//! Database connection pool and utility functions.

use crate::entities::prelude::*;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Statement,
};
use std::fmt;
use std::time::Duration;
use tracing::log::LevelFilter;

/// Create a new database connection with configured pool settings.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(5)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Debug);

    Database::connect(opt).await
}

/// Test database connection by executing a simple query.
pub async fn test_connection(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute_unprepared("SELECT 1").await?;
    Ok(())
}

/// Get PostgreSQL version string.
pub async fn get_version(db: &DatabaseConnection) -> Result<String, DbErr> {
    let result = db
        .query_one(Statement::from_string(
            sea_orm::DatabaseBackend::Postgres,
            "SELECT version()".to_owned(),
        ))
        .await?;

    match result {
        Some(row) => {
            let version: String = row.try_get("", "version")?;
            Ok(version)
        }
        None => Ok("Unknown".to_owned()),
    }
}

/// Get record counts for the HOS tables.
pub async fn get_table_counts(db: &DatabaseConnection) -> Result<TableCounts, DbErr> {
    let drivers = Drivers::find().count(db).await?;
    let duty_logs = DutyLogs::find().count(db).await?;
    let hos_statuses = HosStatuses::find().count(db).await?;

    Ok(TableCounts {
        drivers,
        duty_logs,
        hos_statuses,
    })
}

/// Table record counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCounts {
    pub drivers: u64,
    pub duty_logs: u64,
    pub hos_statuses: u64,
}

impl TableCounts {
    /// Drivers with no stored snapshot yet.
    pub fn missing_snapshots(&self) -> u64 {
        self.drivers.saturating_sub(self.hos_statuses)
    }
}

impl fmt::Display for TableCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} drivers, {} duty logs, {} HOS snapshots",
            self.drivers, self.duty_logs, self.hos_statuses
        )?;
        match self.missing_snapshots() {
            0 => Ok(()),
            n => write!(f, " ({n} without snapshot)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_display() {
        let counts = TableCounts {
            drivers: 12,
            duty_logs: 96,
            hos_statuses: 12,
        };
        assert_eq!(counts.to_string(), "12 drivers, 96 duty logs, 12 HOS snapshots");
    }

    #[test]
    fn test_counts_flag_missing_snapshots() {
        let counts = TableCounts {
            drivers: 12,
            duty_logs: 40,
            hos_statuses: 9,
        };
        assert_eq!(counts.missing_snapshots(), 3);
        assert!(counts.to_string().ends_with("(3 without snapshot)"));
    }
}
