use chrono::NaiveDateTime;
use serde::Serialize;

//==============================================================================
// Sensor Records
//==============================================================================

/// One row of a sensor worksheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorRecord {
    /// When the reading reached the server (optional column)
    pub server_update_time: Option<NaiveDateTime>,
    /// When the sensor was scanned
    pub scan_time: NaiveDateTime,
    /// As-installed thickness in millimeters
    pub initial_thickness: Option<f64>,
    /// Measured thickness in millimeters
    pub current_thickness: Option<f64>,
    /// Stored wear value (optional column)
    pub wear: Option<f64>,
}

impl SensorRecord {
    pub fn new(scan_time: NaiveDateTime, initial_thickness: f64, current_thickness: f64) -> Self {
        Self {
            server_update_time: None,
            scan_time,
            initial_thickness: Some(initial_thickness),
            current_thickness: Some(current_thickness),
            wear: None,
        }
    }

    pub fn with_server_update_time(mut self, time: NaiveDateTime) -> Self {
        self.server_update_time = Some(time);
        self
    }

    pub fn with_wear(mut self, wear: f64) -> Self {
        self.wear = Some(wear);
        self
    }
}

/// All records of one sensor, as read from its worksheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorHistory {
    pub name: String,
    pub records: Vec<SensorRecord>,
}

impl SensorHistory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
        }
    }

    pub fn with_records(name: impl Into<String>, records: Vec<SensorRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    pub fn push(&mut self, record: SensorRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records ordered by scan time ascending.
    ///
    /// Row order in the workbook is not trusted. The sort is stable, so rows
    /// sharing a scan time keep their workbook order.
    pub fn sorted_records(&self) -> Vec<&SensorRecord> {
        let mut records: Vec<&SensorRecord> = self.records.iter().collect();
        records.sort_by_key(|r| r.scan_time);
        records
    }
}

/// Every sensor sheet of the database workbook, in sheet order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SensorDatabase {
    pub sensors: Vec<SensorHistory>,
}

impl SensorDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sensor(&mut self, history: SensorHistory) {
        self.sensors.push(history);
    }

    pub fn get(&self, name: &str) -> Option<&SensorHistory> {
        self.sensors.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SensorHistory> {
        self.sensors.iter()
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    pub fn sensor_names(&self) -> Vec<&str> {
        self.sensors.iter().map(|s| s.name.as_str()).collect()
    }
}

//==============================================================================
// Derived Status
//==============================================================================

/// Latest reading of one sensor, derived per render and never stored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorStatus {
    pub sensor_name: String,
    pub latest_time: Option<NaiveDateTime>,
    pub total_length: Option<f64>,
    pub actual_length: Option<f64>,
}

impl SensorStatus {
    /// Status for a sensor whose sheet has no rows
    pub fn no_data(sensor_name: impl Into<String>) -> Self {
        Self {
            sensor_name: sensor_name.into(),
            latest_time: None,
            total_length: None,
            actual_length: None,
        }
    }

    /// Both lengths are present and numeric
    pub fn has_data(&self) -> bool {
        matches!(
            (self.total_length, self.actual_length),
            (Some(total), Some(actual)) if !total.is_nan() && !actual.is_nan()
        )
    }

    /// Current minus initial thickness
    pub fn delta(&self) -> Option<f64> {
        if self.has_data() {
            Some(self.actual_length? - self.total_length?)
        } else {
            None
        }
    }
}

//==============================================================================
// Raw Tables
//==============================================================================

/// A worksheet rendered to display strings (header row + data rows)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawTable {
    pub sheet_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}
