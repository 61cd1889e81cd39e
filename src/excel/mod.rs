//! Excel import/export for sensor workbooks
//!
//! - Import: latest-readings sheet and per-sensor database sheets (.xlsx)
//! - Export: the database rewritten with normalized column names

mod exporter;
mod importer;

pub use exporter::{DatabaseExporter, NORMALIZED_COLUMNS, XLSX_MIME};
pub use importer::{
    parse_datetime, ExcelImporter, CURRENT_THICKNESS, INITIAL_THICKNESS, SENSOR_SCAN_TIME,
    SERVER_UPDATE_TIME, WEAR,
};

pub(crate) use importer::DISPLAY_DATETIME_FORMAT;
