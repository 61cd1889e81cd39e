//! Latest-status derivation

use crate::types::{SensorDatabase, SensorHistory, SensorStatus};

/// Latest reading of one sensor.
///
/// An empty sheet yields a status with every field absent.
pub fn latest_status(history: &SensorHistory) -> SensorStatus {
    match history.sorted_records().last() {
        None => SensorStatus::no_data(&history.name),
        Some(latest) => SensorStatus {
            sensor_name: history.name.clone(),
            latest_time: Some(latest.scan_time),
            total_length: latest.initial_thickness,
            actual_length: latest.current_thickness,
        },
    }
}

/// One status per sensor sheet, in sheet order
pub fn derive_statuses(database: &SensorDatabase) -> Vec<SensorStatus> {
    database.iter().map(latest_status).collect()
}
