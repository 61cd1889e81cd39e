//! Workbook fixtures shared by the integration tests

#![allow(dead_code)]

use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const HEADER: [&str; 5] = [
    "ServerUpdateTime",
    "SensorScanTime",
    "InitialThickness",
    "CurrentThickness",
    "Wear",
];

#[derive(Debug, Clone)]
pub enum Cell {
    Text(String),
    Number(f64),
    /// Excel serial date with a date-time number format
    Date(f64),
    Empty,
}

pub fn text(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

pub fn header_row(names: &[&str]) -> Vec<Cell> {
    names.iter().map(|n| text(n)).collect()
}

/// A five-column sensor row with text timestamps
pub fn reading(scan_time: &str, initial: f64, current: f64) -> Vec<Cell> {
    vec![
        text(scan_time),
        text(scan_time),
        Cell::Number(initial),
        Cell::Number(current),
        Cell::Number(initial - current),
    ]
}

pub fn sensor_sheet(name: &str, readings: Vec<Vec<Cell>>) -> (String, Vec<Vec<Cell>>) {
    let mut rows = vec![header_row(&HEADER)];
    rows.extend(readings);
    (name.to_string(), rows)
}

pub fn write_workbook(path: &Path, sheets: &[(String, Vec<Vec<Cell>>)]) {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                match cell {
                    Cell::Text(s) => {
                        worksheet.write_string(r, c, s).unwrap();
                    }
                    Cell::Number(n) => {
                        worksheet.write_number(r, c, *n).unwrap();
                    }
                    Cell::Date(serial) => {
                        worksheet
                            .write_number_with_format(r, c, *serial, &date_format)
                            .unwrap();
                    }
                    Cell::Empty => {}
                }
            }
        }
    }

    workbook.save(path).unwrap();
}

/// Temp dir with a latest-readings workbook and a three-sensor database:
/// S1 worn to 19 mm, S2 at exactly 10 mm, S3 empty
pub struct Fixture {
    pub dir: TempDir,
    pub latest: PathBuf,
    pub database: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let latest = dir.path().join("pwsReadingsLatest.xlsx");
        let database = dir.path().join("database.xlsx");

        write_workbook(
            &latest,
            &[(
                "Latest".to_string(),
                vec![
                    header_row(&["UploadTime", "SensorID", "TotalLength", "CurrentLength"]),
                    vec![
                        text("2025-03-05 10:00:00"),
                        text("S1"),
                        Cell::Number(25.0),
                        Cell::Number(19.0),
                    ],
                    vec![
                        text("2025-03-05 10:00:00"),
                        text("S2"),
                        Cell::Number(25.0),
                        Cell::Number(10.0),
                    ],
                ],
            )],
        );

        write_workbook(
            &database,
            &[
                sensor_sheet(
                    "S1",
                    vec![
                        reading("2025-03-05 10:00:00", 25.0, 19.0),
                        reading("2025-03-01 10:00:00", 25.0, 25.0),
                    ],
                ),
                sensor_sheet(
                    "S2",
                    vec![
                        reading("2025-03-01 10:00:00", 25.0, 18.0),
                        reading("2025-03-05 10:00:00", 25.0, 10.0),
                    ],
                ),
                sensor_sheet("S3", vec![]),
            ],
        );

        Self {
            dir,
            latest,
            database,
        }
    }
}
