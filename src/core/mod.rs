//! Core wear logic: latest-status derivation, threshold classification and
//! the chart model built from sensor histories.

pub mod chart;
pub mod classifier;
pub mod status;

pub use chart::{build_chart, ChartModel, ChartPoint, ChartSeries, ReferenceLine};
pub use classifier::{
    assess_database, classify, distinct_thickness_desc, BracketHint, Classification,
    SensorAssessment, Severity, WearStatus,
};
pub use status::{derive_statuses, latest_status};

/// Format a thickness for display, removing unnecessary decimal places
pub fn format_number(n: f64) -> String {
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
