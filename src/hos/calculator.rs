//! HOS status calculation.
//!
//! Derives a driver's compliance snapshot from the full history of duty
//! status entries. The computation is pure: `now` is passed in so boundary
//! cases can be evaluated deterministically.

use super::types::{
    ComplianceStatus, CYCLE_LIMIT_MINUTES, CYCLE_LOOKBACK_DAYS, DRIVE_LIMIT_MINUTES, DriverHosStatus, DutyLog,
    DutyStatus, DutyStatusEntry, ON_DUTY_LIMIT_MINUTES, RESTART_HOURS, Violation, ViolationType,
};
use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

/// Calculate HOS status using the current system time.
pub fn calculate_hos_status_now(driver_id: &str, logs: &[DutyLog]) -> DriverHosStatus {
    calculate_hos_status(driver_id, logs, Utc::now())
}

/// Calculate HOS status for a driver as of `now`.
///
/// Entries from all logs are merged and sorted by start time, so neither
/// the order of logs nor the order of entries within a log matters.
pub fn calculate_hos_status(driver_id: &str, logs: &[DutyLog], now: DateTime<Utc>) -> DriverHosStatus {
    let mut entries: Vec<&DutyStatusEntry> = logs.iter().flat_map(|log| log.logs.iter()).collect();

    if entries.is_empty() {
        return DriverHosStatus::pending(driver_id);
    }

    // Full tiebreak keeps the result independent of input order.
    entries.sort_by(|a, b| {
        a.start_time
            .cmp(&b.start_time)
            .then(a.end_time.cmp(&b.end_time))
            .then(a.status.as_str().cmp(b.status.as_str()))
    });

    let window = DayWindow::containing(now);
    let totals = accumulate(&entries, &window);

    let drive_limit = TimeDelta::minutes(DRIVE_LIMIT_MINUTES);
    let on_duty_limit = TimeDelta::minutes(ON_DUTY_LIMIT_MINUTES);
    let cycle_limit = TimeDelta::minutes(CYCLE_LIMIT_MINUTES);

    let mut violations = Vec::new();
    if totals.drive > drive_limit {
        violations.push(Violation::major(
            ViolationType::ElevenHour,
            "Exceeded 11-hour driving limit",
        ));
    }
    if totals.on_duty > on_duty_limit {
        violations.push(Violation::major(
            ViolationType::FourteenHour,
            "Exceeded 14-hour on-duty limit",
        ));
    }
    if totals.cycle > cycle_limit {
        violations.push(Violation::major(
            ViolationType::SeventyHour,
            "Exceeded 70-hour 8-day limit",
        ));
    }
    // Clipped to the calendar day; can fire alongside the first 11-hour check.
    if totals.driving_today > drive_limit {
        violations.push(Violation::major(
            ViolationType::ElevenHour,
            "Exceeded 11 hours driving in a day",
        ));
    }

    let current_status = entries.last().map(|e| e.status).unwrap_or(DutyStatus::OffDuty);
    let last_logged_at = entries.last().map(|e| e.end_time);
    let restart_available = restart_available(&entries, now);

    let compliance_status = if violations.is_empty() {
        ComplianceStatus::Compliant
    } else {
        ComplianceStatus::Violation
    };

    let used_drive_time = totals.drive.num_minutes();
    let used_on_duty_time = totals.on_duty.num_minutes();

    debug!(
        "HOS status for {driver_id}: {} entries, drive={used_drive_time}m, on_duty={used_on_duty_time}m, cycle={}m, {} violation(s)",
        entries.len(),
        totals.cycle.num_minutes(),
        violations.len()
    );

    DriverHosStatus {
        driver_id: driver_id.to_string(),
        current_status,
        available_drive_time: (DRIVE_LIMIT_MINUTES - used_drive_time).max(0),
        available_on_duty_time: (ON_DUTY_LIMIT_MINUTES - used_on_duty_time).max(0),
        used_drive_time,
        used_on_duty_time,
        cycle_hours: CYCLE_LIMIT_MINUTES,
        used_cycle_hours: totals.cycle.num_minutes(),
        restart_available,
        violations,
        last_logged_at,
        compliance_status,
    }
}

/// UTC calendar day containing `now`, plus the cycle window start.
struct DayWindow {
    start_of_today: DateTime<Utc>,
    end_of_today: DateTime<Utc>,
    cycle_start: DateTime<Utc>,
}

impl DayWindow {
    fn containing(now: DateTime<Utc>) -> Self {
        let start_of_today = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|midnight| midnight.and_utc())
            .unwrap_or(now);

        Self {
            start_of_today,
            end_of_today: start_of_today + TimeDelta::days(1),
            cycle_start: now - TimeDelta::days(CYCLE_LOOKBACK_DAYS),
        }
    }
}

struct Totals {
    /// Driving that started today.
    drive: TimeDelta,
    /// Driving plus on-duty that started today.
    on_duty: TimeDelta,
    /// Driving plus on-duty that started inside the cycle window.
    cycle: TimeDelta,
    /// Driving clipped to today's boundaries.
    driving_today: TimeDelta,
}

impl Totals {
    fn zero() -> Self {
        Self {
            drive: TimeDelta::zero(),
            on_duty: TimeDelta::zero(),
            cycle: TimeDelta::zero(),
            driving_today: TimeDelta::zero(),
        }
    }
}

fn accumulate(entries: &[&DutyStatusEntry], window: &DayWindow) -> Totals {
    let mut totals = Totals::zero();

    for entry in entries {
        let duration = entry.duration();
        let on_duty = entry.status.counts_as_on_duty();
        let driving = entry.status == DutyStatus::Driving;

        if entry.start_time >= window.start_of_today {
            if on_duty {
                totals.on_duty = totals.on_duty + duration;
            }
            if driving {
                totals.drive = totals.drive + duration;
            }
        }

        if entry.start_time >= window.cycle_start && on_duty {
            totals.cycle = totals.cycle + duration;
        }

        if driving {
            totals.driving_today = totals.driving_today + entry.overlap(window.start_of_today, window.end_of_today);
        }
    }

    totals
}

/// True when the driver has rested at least 34 hours since the last
/// non-rest entry ended, or has never had one.
fn restart_available(entries: &[&DutyStatusEntry], now: DateTime<Utc>) -> bool {
    let last_on_duty_end = entries
        .iter()
        .filter(|e| !e.status.is_rest())
        .map(|e| e.end_time)
        .max();

    match last_on_duty_end {
        Some(end) => now - end >= TimeDelta::hours(RESTART_HOURS),
        None => true,
    }
}
