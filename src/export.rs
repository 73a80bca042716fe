//! Excel export functionality.

use crate::hos::{Severity, minutes_to_hours};
use crate::models::FleetStatusRow;
use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet, XlsxError};
use std::path::Path;

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin)
}

fn write_headers(worksheet: &mut Worksheet, headers: &[(&str, f64)]) -> Result<(), XlsxError> {
    let format = header_format();
    for (col, (header, width)) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &format)?;
        worksheet.set_column_width(col as u16, *width)?;
    }
    Ok(())
}

fn finish_sheet(worksheet: &mut Worksheet, rows: usize, last_col: u16) -> Result<(), XlsxError> {
    if rows > 0 {
        worksheet.autofilter(0, 0, rows as u32, last_col)?;
    }
    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

/// Export fleet HOS status to Excel file.
/// One row per driver with hours shown as decimals.
pub fn export_hos_statuses_to_excel(data: &[FleetStatusRow], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name("HOS Status")?;

    let hours_format = Format::new().set_num_format("0.00");
    let violation_format = Format::new().set_font_color(Color::RGB(0xC00000)).set_bold();

    let headers = [
        ("Driver ID", 15.0),
        ("Driver", 28.0),
        ("Current Status", 18.0),
        ("Drive Used (h)", 14.0),
        ("Drive Left (h)", 14.0),
        ("On-Duty Used (h)", 16.0),
        ("On-Duty Left (h)", 16.0),
        ("Cycle Used (h)", 14.0),
        ("Cycle Left (h)", 14.0),
        ("Restart", 9.0),
        ("Compliance", 12.0),
        ("Violations", 10.0),
        ("Last Logged", 18.0),
    ];
    write_headers(worksheet, &headers)?;

    for (idx, row) in data.iter().enumerate() {
        let r = (idx + 1) as u32;
        let status = &row.status;

        worksheet.write_string(r, 0, &status.driver_id)?;
        worksheet.write_string(r, 1, &row.driver_name)?;
        worksheet.write_string(r, 2, status.current_status.label())?;
        worksheet.write_number_with_format(r, 3, minutes_to_hours(status.used_drive_time), &hours_format)?;
        worksheet.write_number_with_format(r, 4, minutes_to_hours(status.available_drive_time), &hours_format)?;
        worksheet.write_number_with_format(r, 5, minutes_to_hours(status.used_on_duty_time), &hours_format)?;
        worksheet.write_number_with_format(r, 6, minutes_to_hours(status.available_on_duty_time), &hours_format)?;
        worksheet.write_number_with_format(r, 7, minutes_to_hours(status.used_cycle_hours), &hours_format)?;
        worksheet.write_number_with_format(r, 8, minutes_to_hours(status.available_cycle_time()), &hours_format)?;
        worksheet.write_string(r, 9, if status.restart_available { "Yes" } else { "No" })?;

        if status.has_violations() {
            worksheet.write_string_with_format(r, 10, status.compliance_status.as_str(), &violation_format)?;
        } else {
            worksheet.write_string(r, 10, status.compliance_status.as_str())?;
        }
        worksheet.write_number(r, 11, status.violations.len() as f64)?;

        // Convert UTC to local time for display
        let last_logged = status
            .last_logged_at
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        worksheet.write_string(r, 12, last_logged)?;
    }

    finish_sheet(worksheet, data.len(), 12)?;

    workbook.save(path)?;
    Ok(())
}

/// Export every detected violation to Excel file, one row each.
pub fn export_violations_to_excel(data: &[FleetStatusRow], path: &Path) -> Result<usize, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name("Violations")?;

    let major_format = Format::new().set_font_color(Color::RGB(0xC00000)).set_bold();

    let headers = [
        ("Driver ID", 15.0),
        ("Driver", 28.0),
        ("Rule", 10.0),
        ("Severity", 10.0),
        ("Message", 40.0),
    ];
    write_headers(worksheet, &headers)?;

    let mut r = 0u32;
    for row in data {
        for violation in &row.status.violations {
            r += 1;
            worksheet.write_string(r, 0, &row.status.driver_id)?;
            worksheet.write_string(r, 1, &row.driver_name)?;
            worksheet.write_string(r, 2, violation.violation_type.as_str())?;
            match violation.severity {
                Severity::Major => worksheet.write_string_with_format(r, 3, violation.severity.as_str(), &major_format)?,
                Severity::Minor => worksheet.write_string(r, 3, violation.severity.as_str())?,
            };
            worksheet.write_string(r, 4, &violation.message)?;
        }
    }

    finish_sheet(worksheet, r as usize, 4)?;

    workbook.save(path)?;
    Ok(r as usize)
}

/// Generate default filename for export.
pub fn generate_export_filename(prefix: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.xlsx", ts = now.format("%Y%m%d_%H%M%S"))
}
