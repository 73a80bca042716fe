//! HOS data types and regulatory constants.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum driving time per day (11 hours).
pub const DRIVE_LIMIT_MINUTES: i64 = 11 * 60;
/// Maximum on-duty window per day (14 hours).
pub const ON_DUTY_LIMIT_MINUTES: i64 = 14 * 60;
/// Maximum on-duty time over the cycle (70 hours).
pub const CYCLE_LIMIT_MINUTES: i64 = 70 * 60;
/// Consecutive rest required for a cycle restart.
pub const RESTART_HOURS: i64 = 34;
/// Trailing window used for cycle accounting.
pub const CYCLE_LOOKBACK_DAYS: i64 = 7;

/// Driver duty status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyStatus {
    Driving,
    OnDuty,
    OffDuty,
    SleeperBerth,
    PersonalConveyance,
    YardMoves,
}

impl DutyStatus {
    /// Stored string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::OnDuty => "on_duty",
            Self::OffDuty => "off_duty",
            Self::SleeperBerth => "sleeper_berth",
            Self::PersonalConveyance => "personal_conveyance",
            Self::YardMoves => "yard_moves",
        }
    }

    /// Human-readable label for reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Driving => "Driving",
            Self::OnDuty => "On Duty",
            Self::OffDuty => "Off Duty",
            Self::SleeperBerth => "Sleeper Berth",
            Self::PersonalConveyance => "Personal Conveyance",
            Self::YardMoves => "Yard Moves",
        }
    }

    /// Whether time in this status counts toward on-duty totals.
    pub fn counts_as_on_duty(self) -> bool {
        matches!(self, Self::Driving | Self::OnDuty)
    }

    /// Whether time in this status counts toward a restart.
    pub fn is_rest(self) -> bool {
        matches!(self, Self::OffDuty | Self::SleeperBerth)
    }
}

impl fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DutyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "driving" => Ok(Self::Driving),
            "on_duty" => Ok(Self::OnDuty),
            "off_duty" => Ok(Self::OffDuty),
            "sleeper_berth" => Ok(Self::SleeperBerth),
            "personal_conveyance" => Ok(Self::PersonalConveyance),
            "yard_moves" => Ok(Self::YardMoves),
            other => Err(format!("unknown duty status: {other}")),
        }
    }
}

/// Optional details recorded alongside a duty status change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odometer: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A single duty status interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyStatusEntry {
    pub status: DutyStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EntryMetadata>,
}

impl DutyStatusEntry {
    pub fn new(status: DutyStatus, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            status,
            start_time,
            end_time,
            metadata: None,
        }
    }

    /// Interval length, zero for reversed intervals.
    pub fn duration(&self) -> TimeDelta {
        (self.end_time - self.start_time).max(TimeDelta::zero())
    }

    /// Portion of the interval that falls inside `[from, to)`.
    pub fn overlap(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> TimeDelta {
        let start = self.start_time.max(from);
        let end = self.end_time.min(to);
        (end - start).max(TimeDelta::zero())
    }
}

/// A driver's daily log holding its duty status entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyLog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_date: Option<NaiveDate>,
    #[serde(default)]
    pub logs: Vec<DutyStatusEntry>,
}

impl DutyLog {
    pub fn new(logs: Vec<DutyStatusEntry>) -> Self {
        Self {
            driver_id: None,
            log_date: None,
            logs,
        }
    }
}

/// Rule that a violation breaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    #[serde(rename = "11_hour")]
    ElevenHour,
    #[serde(rename = "14_hour")]
    FourteenHour,
    #[serde(rename = "70_hour")]
    SeventyHour,
}

impl ViolationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ElevenHour => "11_hour",
            Self::FourteenHour => "14_hour",
            Self::SeventyHour => "70_hour",
        }
    }
}

impl fmt::Display for ViolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Violation severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minor,
    Major,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Major => "major",
        }
    }
}

/// A detected rule breach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    #[serde(rename = "type")]
    pub violation_type: ViolationType,
    pub severity: Severity,
    pub message: String,
}

impl Violation {
    pub fn major(violation_type: ViolationType, message: impl Into<String>) -> Self {
        Self {
            violation_type,
            severity: Severity::Major,
            message: message.into(),
        }
    }
}

/// Overall compliance classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    Violation,
    /// No duty entries recorded yet.
    Pending,
}

impl ComplianceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::Violation => "violation",
            Self::Pending => "pending",
        }
    }
}

impl FromStr for ComplianceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compliant" => Ok(Self::Compliant),
            "violation" => Ok(Self::Violation),
            "pending" => Ok(Self::Pending),
            other => Err(format!("unknown compliance status: {other}")),
        }
    }
}

/// Derived HOS compliance snapshot for one driver. All times are in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverHosStatus {
    pub driver_id: String,
    pub current_status: DutyStatus,
    pub available_drive_time: i64,
    pub available_on_duty_time: i64,
    pub used_drive_time: i64,
    pub used_on_duty_time: i64,
    pub cycle_hours: i64,
    pub used_cycle_hours: i64,
    pub restart_available: bool,
    pub violations: Vec<Violation>,
    pub last_logged_at: Option<DateTime<Utc>>,
    pub compliance_status: ComplianceStatus,
}

impl DriverHosStatus {
    /// Status for a driver with no recorded entries.
    pub fn pending(driver_id: impl Into<String>) -> Self {
        Self {
            driver_id: driver_id.into(),
            current_status: DutyStatus::OffDuty,
            available_drive_time: DRIVE_LIMIT_MINUTES,
            available_on_duty_time: ON_DUTY_LIMIT_MINUTES,
            used_drive_time: 0,
            used_on_duty_time: 0,
            cycle_hours: CYCLE_LIMIT_MINUTES,
            used_cycle_hours: 0,
            restart_available: false,
            violations: Vec::new(),
            last_logged_at: None,
            compliance_status: ComplianceStatus::Pending,
        }
    }

    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Remaining cycle minutes, floored at zero.
    pub fn available_cycle_time(&self) -> i64 {
        (self.cycle_hours - self.used_cycle_hours).max(0)
    }
}

/// Convert minutes to fractional hours for display.
pub fn minutes_to_hours(minutes: i64) -> f64 {
    minutes as f64 / 60.0
}
