//! Wear classification
//!
//! Maps a sensor's current thickness onto the tray maintenance guidance:
//!
//! | Current thickness | Status       | Severity     |
//! |-------------------|--------------|--------------|
//! | absent / NaN      | NoData       | no-data      |
//! | > 18 mm           | Acceptable   | info         |
//! | = 18 mm           | OrderTrays   | info         |
//! | 10 < x < 18 mm    | WearingThin  | warning      |
//! | = 10 mm           | Replace      | error        |
//! | < 10 mm           | Unclassified | unclassified |
//!
//! The 18 mm and 10 mm points are exact-equality cases, distinct from the
//! open intervals around them.

use serde::Serialize;

use super::format_number;
use super::status::latest_status;
use crate::types::{SensorDatabase, SensorHistory, SensorStatus};

/// Thickness at which replacement trays should be ordered (mm)
pub const ORDER_TRAYS_MM: f64 = 18.0;

/// Thickness at which the tray must be replaced (mm)
pub const REPLACE_MM: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    NoData,
    Info,
    Warning,
    Error,
    Unclassified,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::NoData => "no-data",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Unclassified => "unclassified",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WearStatus {
    NoData,
    Acceptable,
    OrderTrays,
    WearingThin,
    Replace,
    /// Below the replacement threshold. No guidance is defined for this range.
    Unclassified,
}

impl WearStatus {
    pub fn severity(&self) -> Severity {
        match self {
            WearStatus::NoData => Severity::NoData,
            WearStatus::Acceptable | WearStatus::OrderTrays => Severity::Info,
            WearStatus::WearingThin => Severity::Warning,
            WearStatus::Replace => Severity::Error,
            WearStatus::Unclassified => Severity::Unclassified,
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            WearStatus::NoData => Some("No Wear Data Received"),
            WearStatus::Acceptable => Some("Acceptable thickness, use as normal"),
            WearStatus::OrderTrays => Some("Please order trays"),
            WearStatus::WearingThin => Some("Wearing thin, inspections required"),
            WearStatus::Replace => Some("Replace"),
            WearStatus::Unclassified => None,
        }
    }
}

/// The historical reading just above the current one
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BracketHint {
    pub actual: f64,
    pub next_larger: f64,
}

impl BracketHint {
    pub fn message(&self) -> String {
        format!(
            "Actual thickness is between {} and {}",
            format_number(self.actual),
            format_number(self.next_larger)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub status: WearStatus,
    pub severity: Severity,
    pub message: Option<&'static str>,
    pub hint: Option<BracketHint>,
}

impl Classification {
    fn new(status: WearStatus, hint: Option<BracketHint>) -> Self {
        Self {
            status,
            severity: status.severity(),
            message: status.message(),
            hint,
        }
    }

    pub fn hint_message(&self) -> Option<String> {
        self.hint.map(|h| h.message())
    }
}

fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

/// Classify a sensor reading.
///
/// `history_desc` is the sensor's distinct current-thickness values sorted
/// descending (see [`distinct_thickness_desc`]). Never fails: an absent or
/// NaN length routes to `NoData` before any threshold is compared.
pub fn classify(actual: Option<f64>, total: Option<f64>, history_desc: &[f64]) -> Classification {
    let (actual, total) = match (present(actual), present(total)) {
        (Some(actual), Some(total)) => (actual, total),
        _ => return Classification::new(WearStatus::NoData, None),
    };

    let status = if actual > ORDER_TRAYS_MM {
        WearStatus::Acceptable
    } else if actual == ORDER_TRAYS_MM {
        WearStatus::OrderTrays
    } else if actual > REPLACE_MM {
        WearStatus::WearingThin
    } else if actual == REPLACE_MM {
        WearStatus::Replace
    } else {
        WearStatus::Unclassified
    };

    let hint = if status == WearStatus::Acceptable && actual != total {
        bracket_hint(actual, history_desc)
    } else {
        None
    };

    Classification::new(status, hint)
}

/// Next-larger historical value, if `actual` is in the history and is not its maximum
pub fn bracket_hint(actual: f64, history_desc: &[f64]) -> Option<BracketHint> {
    let idx = history_desc.iter().position(|&v| v == actual)?;
    if idx == 0 {
        return None;
    }
    Some(BracketHint {
        actual,
        next_larger: history_desc[idx - 1],
    })
}

/// Distinct current-thickness values of a sensor, largest first
pub fn distinct_thickness_desc(history: &SensorHistory) -> Vec<f64> {
    let mut values: Vec<f64> = history
        .records
        .iter()
        .filter_map(|r| present(r.current_thickness))
        .collect();
    values.sort_by(|a, b| b.total_cmp(a));
    values.dedup();
    values
}

/// A sensor's latest status together with its classification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorAssessment {
    pub status: SensorStatus,
    pub classification: Classification,
}

impl SensorAssessment {
    pub fn from_history(history: &SensorHistory) -> Self {
        let status = latest_status(history);
        let classification = classify(
            status.actual_length,
            status.total_length,
            &distinct_thickness_desc(history),
        );
        Self {
            status,
            classification,
        }
    }
}

/// Assess every sensor of the database, in sheet order
pub fn assess_database(database: &SensorDatabase) -> Vec<SensorAssessment> {
    database.iter().map(SensorAssessment::from_history).collect()
}
