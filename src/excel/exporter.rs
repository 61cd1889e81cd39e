//! Excel exporter implementation - normalized sensor database download

use crate::error::{DashboardError, DashboardResult};
use crate::excel::importer::{
    ExcelImporter, CURRENT_THICKNESS, INITIAL_THICKNESS, SENSOR_SCAN_TIME, SERVER_UPDATE_TIME,
    WEAR,
};
use calamine::{Data, Range, Reader};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Header row written to every worksheet of the export
pub const NORMALIZED_COLUMNS: [&str; 5] = [
    SERVER_UPDATE_TIME,
    SENSOR_SCAN_TIME,
    INITIAL_THICKNESS,
    CURRENT_THICKNESS,
    WEAR,
];

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const DATETIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

fn write_err(e: XlsxError) -> DashboardError {
    DashboardError::Export(format!("Failed to write worksheet: {}", e))
}

/// Rewrites the sensor database with normalized column names.
///
/// Sheet order and data rows are kept as-is. Every worksheet must have
/// exactly five columns or the whole export fails.
pub struct DatabaseExporter {
    path: PathBuf,
}

impl DatabaseExporter {
    /// Create a new exporter for the given database workbook
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name offered for download
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sensor_database.xlsx".to_string())
    }

    /// Read every worksheet and check its column count
    fn read_sheets(&self) -> DashboardResult<Vec<(String, Range<Data>)>> {
        let mut workbook = ExcelImporter::new(&self.path).open()?;
        let mut sheets = Vec::new();

        for sheet_name in workbook.sheet_names().to_vec() {
            let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
                DashboardError::Excel(format!("Failed to read worksheet '{}': {}", sheet_name, e))
            })?;

            let width = range.width();
            if width != NORMALIZED_COLUMNS.len() {
                warn!(sheet = %sheet_name, columns = width, "column count mismatch");
                return Err(DashboardError::ColumnCountMismatch {
                    sheet: sheet_name,
                    expected: NORMALIZED_COLUMNS.len(),
                    actual: width,
                });
            }
            sheets.push((sheet_name, range));
        }

        Ok(sheets)
    }

    /// Check the workbook can be exported; returns the worksheet count
    pub fn validate(&self) -> DashboardResult<usize> {
        Ok(self.read_sheets()?.len())
    }

    /// Build the normalized workbook in memory
    pub fn export_bytes(&self) -> DashboardResult<Vec<u8>> {
        let mut workbook = self.build_workbook()?;
        let bytes = workbook.save_to_buffer().map_err(|e| {
            DashboardError::Export(format!("Failed to serialize Excel file: {}", e))
        })?;
        info!(path = %self.path.display(), bytes = bytes.len(), "exported sensor database");
        Ok(bytes)
    }

    /// Write the normalized workbook to a file
    pub fn export_to(&self, output_path: &Path) -> DashboardResult<()> {
        let mut workbook = self.build_workbook()?;
        workbook
            .save(output_path)
            .map_err(|e| DashboardError::Export(format!("Failed to save Excel file: {}", e)))?;
        info!(
            path = %self.path.display(),
            output = %output_path.display(),
            "exported sensor database"
        );
        Ok(())
    }

    fn build_workbook(&self) -> DashboardResult<Workbook> {
        let sheets = self.read_sheets()?;
        let mut workbook = Workbook::new();
        let datetime_format = Format::new().set_num_format(DATETIME_NUM_FORMAT);

        for (sheet_name, range) in &sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(sheet_name).map_err(|e| {
                DashboardError::Export(format!("Failed to set worksheet name: {}", e))
            })?;
            export_sheet(worksheet, range, &datetime_format)?;
        }

        Ok(workbook)
    }
}

fn export_sheet(
    worksheet: &mut Worksheet,
    range: &Range<Data>,
    datetime_format: &Format,
) -> DashboardResult<()> {
    for (col, name) in NORMALIZED_COLUMNS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *name)
            .map_err(write_err)?;
    }

    // Row 0 of the source is its own header, replaced above
    for (idx, row) in range.rows().enumerate().skip(1) {
        let row_num = idx as u32;
        for (col, cell) in row.iter().enumerate() {
            write_cell(worksheet, row_num, col as u16, cell, datetime_format)?;
        }
    }

    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Data,
    datetime_format: &Format,
) -> DashboardResult<()> {
    match cell {
        Data::Float(f) => {
            worksheet.write_number(row, col, *f).map_err(write_err)?;
        }
        Data::Int(i) => {
            worksheet
                .write_number(row, col, *i as f64)
                .map_err(write_err)?;
        }
        Data::Bool(b) => {
            worksheet.write_boolean(row, col, *b).map_err(write_err)?;
        }
        Data::DateTime(dt) => {
            worksheet
                .write_number_with_format(row, col, dt.as_f64(), datetime_format)
                .map_err(write_err)?;
        }
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            worksheet.write_string(row, col, s).map_err(write_err)?;
        }
        Data::Error(e) => {
            worksheet
                .write_string(row, col, e.to_string())
                .map_err(write_err)?;
        }
        Data::Empty => {}
    }
    Ok(())
}
