//! Thickness-over-time chart model
//!
//! One line series per sensor, plus a dashed reference line at the sensor's
//! initial thickness. Renderers (HTML/SVG, JSON) consume [`ChartModel`].

use chrono::NaiveDateTime;
use serde::Serialize;

use super::format_number;
use crate::types::{SensorDatabase, SensorHistory};

pub const X_AXIS_TITLE: &str = "Sensor Scan Time";
pub const Y_AXIS_TITLE: &str = "Thickness (mm)";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub scan_time: NaiveDateTime,
    pub thickness: f64,
}

/// Horizontal line marking a sensor's as-installed thickness
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub y: f64,
    pub label: String,
    pub dashed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub sensor_name: String,
    pub name: String,
    pub points: Vec<ChartPoint>,
    pub reference: Option<ReferenceLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartModel {
    pub x_title: String,
    pub y_title: String,
    pub series: Vec<ChartSeries>,
}

impl ChartModel {
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    /// Earliest and latest scan time across all series
    pub fn x_bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let mut times = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.scan_time));
        let first = times.next()?;
        Some(times.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
    }

    /// Smallest and largest thickness across points and reference lines
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        let mut values = self.series.iter().flat_map(|s| {
            s.points
                .iter()
                .map(|p| p.thickness)
                .chain(s.reference.iter().map(|r| r.y))
        });
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

fn build_series(history: &SensorHistory) -> ChartSeries {
    let sorted = history.sorted_records();

    let points = sorted
        .iter()
        .filter_map(|r| {
            r.current_thickness
                .filter(|v| v.is_finite())
                .map(|thickness| ChartPoint {
                    scan_time: r.scan_time,
                    thickness,
                })
        })
        .collect();

    let reference = sorted
        .first()
        .and_then(|r| r.initial_thickness)
        .filter(|v| v.is_finite())
        .map(|y| ReferenceLine {
            y,
            label: format!("{} Init: {}mm", history.name, format_number(y)),
            dashed: true,
        });

    ChartSeries {
        sensor_name: history.name.clone(),
        name: format!("{} (Current)", history.name),
        points,
        reference,
    }
}

/// Build the chart, skipping sensors without records
pub fn build_chart(database: &SensorDatabase) -> ChartModel {
    ChartModel {
        x_title: X_AXIS_TITLE.to_string(),
        y_title: Y_AXIS_TITLE.to_string(),
        series: database
            .iter()
            .filter(|h| !h.is_empty())
            .map(build_series)
            .collect(),
    }
}
