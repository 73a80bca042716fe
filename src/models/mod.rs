//! Data models for drivers, duty logs, and HOS snapshots.

pub mod driver;
pub mod duty_log;
pub mod hos_status;

pub use driver::DriverSummary;
pub use duty_log::CreateDutyLog;
pub use hos_status::FleetStatusRow;
