//! End-to-end tests: workbooks on disk → rendered view model

mod common;

use common::{reading, sensor_sheet, write_workbook, Cell, Fixture};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tray_wear_dashboard::api::html::render_html;
use tray_wear_dashboard::config::DashboardConfig;
use tray_wear_dashboard::core::{Severity, WearStatus};
use tray_wear_dashboard::view::{render_page, LiveStatus, NoticeLevel, RenderContext, SensorMetric};

fn context(latest: PathBuf, database: PathBuf) -> RenderContext {
    RenderContext::from(&DashboardConfig {
        latest_file: latest,
        database_file: database,
        ..DashboardConfig::default()
    })
}

fn metrics(ctx: &RenderContext) -> Vec<SensorMetric> {
    match render_page(ctx).live_status {
        LiveStatus::Ready { metrics, .. } => metrics,
        other => panic!("Expected Ready, got {:?}", other),
    }
}

/// Single-sensor database with the given (scan time, initial, current) rows
fn single_sensor(fixture: &Fixture, rows: &[(&str, f64, f64)]) -> RenderContext {
    let path = fixture.dir.path().join("single.xlsx");
    let readings = rows
        .iter()
        .map(|&(t, init, cur)| reading(t, init, cur))
        .collect();
    write_workbook(&path, &[sensor_sheet("S1", readings)]);
    context(fixture.latest.clone(), path)
}

// ═══════════════════════════════════════════════════════════════════════════
// SCENARIOS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_scenario_a_new_tray_is_acceptable_without_hint() {
    let fixture = Fixture::new();
    let ctx = single_sensor(&fixture, &[("2025-03-01 10:00:00", 25.0, 25.0)]);

    let metric = &metrics(&ctx)[0];
    assert_eq!(metric.classification.status, WearStatus::Acceptable);
    assert_eq!(metric.classification.severity, Severity::Info);
    assert_eq!(
        metric.classification.message,
        Some("Acceptable thickness, use as normal")
    );
    assert_eq!(metric.hint, None);
    assert_eq!(metric.value, "25mm");
    assert_eq!(metric.delta, Some(0.0));
}

#[test]
fn test_scenario_b_worn_tray_gets_bracketing_hint() {
    let fixture = Fixture::new();
    let ctx = context(fixture.latest.clone(), fixture.database.clone());

    let metric = &metrics(&ctx)[0];
    assert_eq!(metric.sensor_name, "S1");
    assert_eq!(metric.classification.status, WearStatus::Acceptable);
    assert_eq!(
        metric.hint.as_deref(),
        Some("Actual thickness is between 19 and 25")
    );
    assert_eq!(
        metric.caption.as_deref(),
        Some("Latest Reading at: 2025-03-05 10:00:00")
    );
}

#[test]
fn test_scenario_c_exactly_eighteen_orders_trays() {
    let fixture = Fixture::new();
    let ctx = single_sensor(
        &fixture,
        &[
            ("2025-03-01 10:00:00", 25.0, 25.0),
            ("2025-03-02 10:00:00", 25.0, 18.0),
        ],
    );

    let metric = &metrics(&ctx)[0];
    assert_eq!(metric.classification.status, WearStatus::OrderTrays);
    assert_eq!(metric.classification.message, Some("Please order trays"));
    assert_eq!(metric.hint, None);
}

#[test]
fn test_scenario_d_wearing_thin() {
    let fixture = Fixture::new();
    let ctx = single_sensor(&fixture, &[("2025-03-01 10:00:00", 25.0, 12.0)]);

    let metric = &metrics(&ctx)[0];
    assert_eq!(metric.classification.status, WearStatus::WearingThin);
    assert_eq!(metric.classification.severity, Severity::Warning);
}

#[test]
fn test_scenario_e_exactly_ten_is_replace() {
    let fixture = Fixture::new();
    let ctx = context(fixture.latest.clone(), fixture.database.clone());

    let metric = &metrics(&ctx)[1];
    assert_eq!(metric.sensor_name, "S2");
    assert_eq!(metric.classification.status, WearStatus::Replace);
    assert_eq!(metric.classification.severity, Severity::Error);
    assert_eq!(metric.classification.message, Some("Replace"));
}

#[test]
fn test_scenario_f_empty_sheet_is_no_data() {
    let fixture = Fixture::new();
    let ctx = context(fixture.latest.clone(), fixture.database.clone());

    let metric = &metrics(&ctx)[2];
    assert_eq!(metric.sensor_name, "S3");
    assert_eq!(metric.value, "No Wear Data Received");
    assert_eq!(metric.classification.status, WearStatus::NoData);
    assert_eq!(metric.caption, None);
    assert_eq!(metric.delta, None);
}

// ═══════════════════════════════════════════════════════════════════════════
// PAGE SECTIONS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_ready_page_has_chart_and_download() {
    let fixture = Fixture::new();
    let view = render_page(&context(fixture.latest.clone(), fixture.database.clone()));

    match view.live_status {
        LiveStatus::Ready {
            chart, download, ..
        } => {
            assert_eq!(chart.series.len(), 2);
            assert_eq!(chart.series[0].name, "S1 (Current)");
            assert!(download.available);
            assert_eq!(download.href.as_deref(), Some("/api/v1/download"));
            assert_eq!(download.file_name, "database.xlsx");
            assert_eq!(download.notices[0].level, NoticeLevel::Success);
        }
        other => panic!("Expected Ready, got {:?}", other),
    }

    let table = view.debug_table.table.unwrap();
    assert_eq!(table.row_count(), 2);
    assert_eq!(view.debug_table.title, "Latest Readings from pwsReadingsLatest.xlsx");
}

#[test]
fn test_missing_database_keeps_debug_table() {
    let fixture = Fixture::new();
    let view = render_page(&context(
        fixture.latest.clone(),
        fixture.dir.path().join("gone.xlsx"),
    ));

    assert!(matches!(view.live_status, LiveStatus::Unavailable { .. }));
    assert!(view.debug_table.table.is_some());
}

#[test]
fn test_download_unavailable_on_column_mismatch() {
    let fixture = Fixture::new();
    let path = fixture.dir.path().join("six.xlsx");
    let mut sheet = sensor_sheet("S1", vec![reading("2025-03-01 10:00:00", 25.0, 24.0)]);
    for row in sheet.1.iter_mut() {
        row.push(common::text("extra"));
    }
    write_workbook(&path, &[sheet]);

    let view = render_page(&context(fixture.latest.clone(), path));
    match view.live_status {
        LiveStatus::Ready {
            metrics, download, ..
        } => {
            // Status still renders; only the download is refused
            assert_eq!(metrics.len(), 1);
            assert!(!download.available);
            assert!(download.notices[0].message.contains("column count mismatch"));
        }
        other => panic!("Expected Ready, got {:?}", other),
    }
}

#[test]
fn test_out_of_range_date_renders_notice() {
    let fixture = Fixture::new();
    let path = fixture.dir.path().join("corrupt.xlsx");
    write_workbook(
        &path,
        &[sensor_sheet(
            "S1",
            vec![vec![
                Cell::Date(-1e300),
                Cell::Number(-1e300),
                Cell::Number(25.0),
                Cell::Number(24.0),
                Cell::Number(1.0),
            ]],
        )],
    );

    let view = render_page(&context(fixture.latest.clone(), path));
    match view.live_status {
        LiveStatus::Unavailable { notices } => {
            assert_eq!(notices[0].level, NoticeLevel::Error);
            assert!(notices[0].message.contains("SensorScanTime"));
        }
        other => panic!("Expected Unavailable, got {:?}", other),
    }
    assert!(view.debug_table.table.is_some());
}

#[test]
fn test_html_page_renders_all_sections() {
    let fixture = Fixture::new();
    let html = render_html(&render_page(&context(
        fixture.latest.clone(),
        fixture.database.clone(),
    )));

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("1. Wear Sensor Installation Details"));
    assert!(html.contains("S1 Sensor Reading"));
    assert!(html.contains("Actual thickness is between 19 and 25"));
    assert!(html.contains("Replace!"));
    assert!(html.contains("No Wear Data Received"));
    assert!(html.contains("<svg"));
    assert!(html.contains("Debug &amp; Data Table"));
    assert!(html.contains("<td>S2</td>"));
}
