//! Page view model
//!
//! [`render_page`] runs the whole pipeline for one request: read both
//! workbooks, derive and classify sensor statuses, build the chart and check
//! the export. Every failure is turned into a [`Notice`] here, so callers
//! always get a complete [`ViewModel`].

use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

use crate::config::DashboardConfig;
use crate::core::{assess_database, build_chart, format_number, ChartModel, Classification};
use crate::error::{DashboardError, DashboardResult};
use crate::excel::{DatabaseExporter, ExcelImporter, DISPLAY_DATETIME_FORMAT};
use crate::types::{RawTable, SensorDatabase};

pub const DOWNLOAD_PATH: &str = "/api/v1/download";

const FUTURE_TRIALS_PLACEHOLDER: &str = "Something Great is on the Way! Stay tuned.";
const INSTALL_CAPTION: &str = "Linerless Tray Passive Wear Sensor Install Locations";

/// Everything one render needs. Built once from config and passed explicitly.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub title: String,
    pub installation_tabs: Vec<String>,
    pub status_tabs: Vec<String>,
    pub latest_path: PathBuf,
    pub database_path: PathBuf,
}

impl From<&DashboardConfig> for RenderContext {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            title: config.title.clone(),
            installation_tabs: config.installation_tabs.clone(),
            status_tabs: config.status_tabs.clone(),
            latest_path: config.latest_file.clone(),
            database_path: config.database_file.clone(),
        }
    }
}

impl RenderContext {
    pub fn load_database(&self) -> DashboardResult<SensorDatabase> {
        ExcelImporter::new(&self.database_path).import_database()
    }

    pub fn load_latest(&self) -> DashboardResult<RawTable> {
        ExcelImporter::new(&self.latest_path).import_table()
    }

    pub fn exporter(&self) -> DatabaseExporter {
        DatabaseExporter::new(&self.database_path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Notices shown when loading or exporting fails
pub fn error_notices(error: &DashboardError) -> Vec<Notice> {
    match error {
        DashboardError::FileNotFound(_) => vec![
            Notice::new(NoticeLevel::Error, error.to_string()),
            Notice::new(NoticeLevel::Info, "Please confirm file path and permission!"),
        ],
        other => vec![Notice::new(NoticeLevel::Error, format!("Error: {}", other))],
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstallationSection {
    pub tabs: Vec<String>,
    pub caption: String,
    pub placeholder: String,
}

/// One sensor's metric widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorMetric {
    pub sensor_name: String,
    pub label: String,
    /// "Latest Reading at: ..." when the sensor has data
    pub caption: Option<String>,
    pub value: String,
    /// Current minus initial thickness
    pub delta: Option<f64>,
    pub classification: Classification,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadSection {
    pub available: bool,
    pub href: Option<String>,
    pub file_name: String,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LiveStatus {
    Ready {
        metrics: Vec<SensorMetric>,
        chart: ChartModel,
        download: DownloadSection,
    },
    Unavailable {
        notices: Vec<Notice>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugTable {
    pub title: String,
    pub table: Option<RawTable>,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub title: String,
    pub installation: InstallationSection,
    pub status_tabs: Vec<String>,
    pub live_status: LiveStatus,
    pub debug_table: DebugTable,
}

/// Metric widgets for every sensor, in sheet order
pub fn build_metrics(database: &SensorDatabase) -> Vec<SensorMetric> {
    assess_database(database)
        .into_iter()
        .map(|assessment| {
            let status = assessment.status;
            let classification = assessment.classification;
            let label = format!("{} Sensor Reading", status.sensor_name);

            let (caption, value) = match (status.has_data(), status.actual_length) {
                (true, Some(actual)) => (
                    status
                        .latest_time
                        .map(|t| format!("Latest Reading at: {}", t.format(DISPLAY_DATETIME_FORMAT))),
                    format!("{}mm", format_number(actual)),
                ),
                _ => (None, "No Wear Data Received".to_string()),
            };

            SensorMetric {
                sensor_name: status.sensor_name.clone(),
                label,
                caption,
                value,
                delta: status.delta(),
                hint: classification.hint_message(),
                classification,
            }
        })
        .collect()
}

fn download_section(ctx: &RenderContext) -> DownloadSection {
    let exporter = ctx.exporter();
    let file_name = exporter.file_name();

    match exporter.validate() {
        Ok(_) => DownloadSection {
            available: true,
            href: Some(DOWNLOAD_PATH.to_string()),
            file_name,
            notices: vec![Notice::new(
                NoticeLevel::Success,
                "Sensor database available. Please click button to download!!!",
            )],
        },
        Err(e) => {
            warn!(error = %e, "database export unavailable");
            DownloadSection {
                available: false,
                href: None,
                file_name,
                notices: error_notices(&e),
            }
        }
    }
}

fn live_status(ctx: &RenderContext) -> LiveStatus {
    match ctx.load_database() {
        Ok(database) => LiveStatus::Ready {
            metrics: build_metrics(&database),
            chart: build_chart(&database),
            download: download_section(ctx),
        },
        Err(e) => {
            warn!(error = %e, "sensor database unavailable");
            LiveStatus::Unavailable {
                notices: error_notices(&e),
            }
        }
    }
}

fn debug_table(ctx: &RenderContext) -> DebugTable {
    let title = format!(
        "Latest Readings from {}",
        ctx.latest_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    );

    match ctx.load_latest() {
        Ok(table) => DebugTable {
            title,
            table: Some(table),
            notices: Vec::new(),
        },
        Err(e) => {
            warn!(error = %e, "latest readings unavailable");
            DebugTable {
                title,
                table: None,
                notices: error_notices(&e),
            }
        }
    }
}

/// Build the full page for one request
pub fn render_page(ctx: &RenderContext) -> ViewModel {
    ViewModel {
        title: ctx.title.clone(),
        installation: InstallationSection {
            tabs: ctx.installation_tabs.clone(),
            caption: INSTALL_CAPTION.to_string(),
            placeholder: FUTURE_TRIALS_PLACEHOLDER.to_string(),
        },
        status_tabs: ctx.status_tabs.clone(),
        live_status: live_status(ctx),
        debug_table: debug_table(ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WearStatus;
    use crate::types::{SensorHistory, SensorRecord};
    use chrono::NaiveDate;

    fn missing_context() -> RenderContext {
        RenderContext::from(&DashboardConfig {
            latest_file: PathBuf::from("/nonexistent/latest.xlsx"),
            database_file: PathBuf::from("/nonexistent/db.xlsx"),
            ..DashboardConfig::default()
        })
    }

    #[test]
    fn test_missing_files_render_notices() {
        let view = render_page(&missing_context());

        match view.live_status {
            LiveStatus::Unavailable { notices } => {
                assert_eq!(notices.len(), 2);
                assert_eq!(notices[0].level, NoticeLevel::Error);
                assert_eq!(notices[0].message, "File not found : /nonexistent/db.xlsx");
                assert_eq!(notices[1].message, "Please confirm file path and permission!");
            }
            other => panic!("Expected Unavailable, got {:?}", other),
        }
        assert!(view.debug_table.table.is_none());
        assert_eq!(view.debug_table.title, "Latest Readings from latest.xlsx");
    }

    #[test]
    fn test_other_errors_render_single_notice() {
        let notices = error_notices(&DashboardError::ColumnCountMismatch {
            sheet: "S1".to_string(),
            expected: 5,
            actual: 4,
        });
        assert_eq!(notices.len(), 1);
        assert!(notices[0].message.starts_with("Error: Worksheet 'S1'"));
    }

    #[test]
    fn test_metrics_for_data_and_no_data() {
        let t = NaiveDate::from_ymd_opt(2025, 7, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let mut db = SensorDatabase::new();
        db.add_sensor(SensorHistory::with_records(
            "S1",
            vec![SensorRecord::new(t, 25.0, 19.5)],
        ));
        db.add_sensor(SensorHistory::new("S2"));

        let metrics = build_metrics(&db);

        assert_eq!(metrics[0].label, "S1 Sensor Reading");
        assert_eq!(metrics[0].value, "19.5mm");
        assert_eq!(
            metrics[0].caption.as_deref(),
            Some("Latest Reading at: 2025-07-01 09:30:00")
        );
        assert_eq!(metrics[0].delta, Some(-5.5));
        assert_eq!(metrics[0].classification.status, WearStatus::Acceptable);

        assert_eq!(metrics[1].value, "No Wear Data Received");
        assert!(metrics[1].caption.is_none());
        assert!(metrics[1].delta.is_none());
        assert_eq!(metrics[1].classification.status, WearStatus::NoData);
    }

    #[test]
    fn test_view_model_serializes_state_tag() {
        let view = render_page(&missing_context());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["live_status"]["state"], "unavailable");
        assert_eq!(json["installation"]["tabs"][1], "Future Trials");
    }
}
