//! Excel importer implementation - sensor workbooks (.xlsx) → typed records

use crate::core::format_number;
use crate::error::{DashboardError, DashboardResult};
use crate::types::{RawTable, SensorDatabase, SensorHistory, SensorRecord};
use calamine::{open_workbook, Data, ExcelDateTime, Range, Reader, Xlsx};
use chrono::{NaiveDate, NaiveDateTime};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const SERVER_UPDATE_TIME: &str = "ServerUpdateTime";
pub const SENSOR_SCAN_TIME: &str = "SensorScanTime";
pub const INITIAL_THICKNESS: &str = "InitialThickness";
pub const CURRENT_THICKNESS: &str = "CurrentThickness";
pub const WEAR: &str = "Wear";

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M",
];

pub(crate) const DISPLAY_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Largest Excel date serial (9999-12-31)
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Header positions of one sensor sheet
struct SheetColumns {
    server_update_time: Option<usize>,
    scan_time: usize,
    initial_thickness: usize,
    current_thickness: usize,
    wear: Option<usize>,
}

/// Excel importer for the latest-readings and sensor database workbooks
pub struct ExcelImporter {
    path: PathBuf,
}

impl ExcelImporter {
    /// Create a new Excel importer
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn open(&self) -> DashboardResult<Xlsx<BufReader<File>>> {
        if !self.path.exists() {
            return Err(DashboardError::FileNotFound(self.path.clone()));
        }
        open_workbook::<Xlsx<_>, _>(&self.path)
            .map_err(|e| DashboardError::Excel(format!("Failed to open Excel file: {}", e)))
    }

    /// Import the sensor database: one worksheet per sensor
    pub fn import_database(&self) -> DashboardResult<SensorDatabase> {
        let mut workbook = self.open()?;
        let mut database = SensorDatabase::new();

        for sheet_name in workbook.sheet_names().to_vec() {
            let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
                DashboardError::Excel(format!("Failed to read worksheet '{}': {}", sheet_name, e))
            })?;
            let history = parse_sensor_sheet(&sheet_name, &range)?;
            debug!(sensor = %sheet_name, records = history.len(), "loaded sensor sheet");
            database.add_sensor(history);
        }

        info!(
            path = %self.path.display(),
            sensors = database.len(),
            "loaded sensor database"
        );
        Ok(database)
    }

    /// Import the first worksheet as display strings
    pub fn import_table(&self) -> DashboardResult<RawTable> {
        let mut workbook = self.open()?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| DashboardError::Excel("Workbook has no worksheets".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
            DashboardError::Excel(format!("Failed to read worksheet '{}': {}", sheet_name, e))
        })?;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .map(|row| row.iter().map(cell_to_string).collect())
            .unwrap_or_default();
        let rows: Vec<Vec<String>> = rows
            .filter(|row| !row_is_empty(row))
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();

        let table = RawTable {
            sheet_name,
            headers,
            rows,
        };
        info!(
            path = %self.path.display(),
            rows = table.row_count(),
            "loaded latest readings"
        );
        Ok(table)
    }
}

/// Parse one sensor worksheet. An empty sheet is a sensor with no history.
fn parse_sensor_sheet(sheet_name: &str, range: &Range<Data>) -> DashboardResult<SensorHistory> {
    let mut history = SensorHistory::new(sheet_name);
    if range.is_empty() {
        return Ok(history);
    }

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(cell_to_string).collect())
        .unwrap_or_default();
    let columns = locate_columns(sheet_name, &header)?;

    // Excel rows are 1-based; the range starts at the header row
    let header_row = range.start().map(|(r, _)| r as usize).unwrap_or(0) + 1;
    for (idx, row) in rows.enumerate() {
        if row_is_empty(row) {
            continue;
        }
        let excel_row = header_row + idx + 1;
        history.push(parse_record(sheet_name, excel_row, row, &columns)?);
    }

    Ok(history)
}

fn normalize_header(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

fn find_column(header: &[String], name: &str) -> Option<usize> {
    let wanted = normalize_header(name);
    header.iter().position(|h| normalize_header(h) == wanted)
}

fn locate_columns(sheet_name: &str, header: &[String]) -> DashboardResult<SheetColumns> {
    let required = |name: &str| {
        find_column(header, name).ok_or_else(|| DashboardError::MissingField {
            sheet: sheet_name.to_string(),
            column: name.to_string(),
        })
    };

    Ok(SheetColumns {
        server_update_time: find_column(header, SERVER_UPDATE_TIME),
        scan_time: required(SENSOR_SCAN_TIME)?,
        initial_thickness: required(INITIAL_THICKNESS)?,
        current_thickness: required(CURRENT_THICKNESS)?,
        wear: find_column(header, WEAR),
    })
}

fn parse_record(
    sheet_name: &str,
    row_number: usize,
    row: &[Data],
    columns: &SheetColumns,
) -> DashboardResult<SensorRecord> {
    let invalid = |column: &str, message: String| DashboardError::InvalidCell {
        sheet: sheet_name.to_string(),
        row: row_number,
        column: column.to_string(),
        message,
    };
    let cell = |idx: usize| row.get(idx).unwrap_or(&Data::Empty);

    let number = |idx: usize, column: &str| {
        cell_to_f64(cell(idx)).map_err(|message| invalid(column, message))
    };
    let datetime = |idx: usize, column: &str| {
        cell_to_datetime(cell(idx)).map_err(|message| invalid(column, message))
    };

    let scan_time = datetime(columns.scan_time, SENSOR_SCAN_TIME)?
        .ok_or_else(|| invalid(SENSOR_SCAN_TIME, "scan time is empty".to_string()))?;

    let server_update_time = match columns.server_update_time {
        Some(idx) => datetime(idx, SERVER_UPDATE_TIME)?,
        None => None,
    };
    let wear = match columns.wear {
        Some(idx) => number(idx, WEAR)?,
        None => None,
    };

    Ok(SensorRecord {
        server_update_time,
        scan_time,
        initial_thickness: number(columns.initial_thickness, INITIAL_THICKNESS)?,
        current_thickness: number(columns.current_thickness, CURRENT_THICKNESS)?,
        wear,
    })
}

fn row_is_empty(row: &[Data]) -> bool {
    row.iter().all(|cell| match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    })
}

/// Render a cell for display
pub(crate) fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) => format_number(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => excel_datetime(dt)
            .map(|t| t.format(DISPLAY_DATETIME_FORMAT).to_string())
            .unwrap_or_else(|| format_number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
        Data::Empty => String::new(),
    }
}

fn cell_to_f64(cell: &Data) -> Result<Option<f64>, String> {
    let value = match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a") {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| format!("cannot parse number from '{}'", s))?
        }
        Data::Empty => return Ok(None),
        other => return Err(format!("expected number, got {:?}", other)),
    };

    if value.is_finite() {
        Ok(Some(value))
    } else {
        Err(format!("number is not finite: {}", value))
    }
}

fn cell_to_datetime(cell: &Data) -> Result<Option<NaiveDateTime>, String> {
    match cell {
        Data::DateTime(dt) => excel_datetime(dt)
            .map(Some)
            .ok_or_else(|| format!("invalid Excel date value {}", dt.as_f64())),
        Data::DateTimeIso(s) | Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                parse_datetime(trimmed)
                    .map(Some)
                    .ok_or_else(|| format!("cannot parse timestamp from '{}'", s))
            }
        }
        Data::Float(f) => excel_serial_to_datetime(*f)
            .map(Some)
            .ok_or_else(|| format!("invalid Excel date serial {}", f)),
        Data::Int(i) => excel_serial_to_datetime(*i as f64)
            .map(Some)
            .ok_or_else(|| format!("invalid Excel date serial {}", i)),
        Data::Empty => Ok(None),
        other => Err(format!("expected timestamp, got {:?}", other)),
    }
}

/// Parse a text timestamp in any of the accepted layouts
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Excel serial day number (1900 date system) to a timestamp.
/// Serials outside 1899-12-30..=9999-12-31 are rejected.
fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !(0.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    base.checked_add_signed(chrono::Duration::try_milliseconds(millis)?)
}

/// Date-formatted cell to a timestamp, range-checked before calamine converts it
fn excel_datetime(dt: &ExcelDateTime) -> Option<NaiveDateTime> {
    if (0.0..=MAX_EXCEL_SERIAL).contains(&dt.as_f64()) {
        dt.as_datetime()
    } else {
        None
    }
}
