//! Hours-of-Service compliance calculation.
//!
//! Takes a driver's duty status history and derives the remaining drive and
//! on-duty time, cycle usage, restart eligibility and any rule violations.
//!
//! # Example
//!
//! ```ignore
//! use fleet_hos::hos::{calculate_hos_status, DutyLog};
//!
//! let logs: Vec<DutyLog> = serde_json::from_str(&json)?;
//! let status = calculate_hos_status("drv-42", &logs, chrono::Utc::now());
//! println!("{} minutes of driving left", status.available_drive_time);
//! ```

mod calculator;
mod types;


pub use calculator::{calculate_hos_status, calculate_hos_status_now};
pub use types::{
    CYCLE_LIMIT_MINUTES, CYCLE_LOOKBACK_DAYS, ComplianceStatus, DRIVE_LIMIT_MINUTES, DriverHosStatus, DutyLog,
    DutyStatus, DutyStatusEntry, EntryMetadata, ON_DUTY_LIMIT_MINUTES, RESTART_HOURS, Severity, Violation,
    ViolationType, minutes_to_hours,
};
