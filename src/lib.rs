//! Tray Wear - wear sensor dashboard for linerless truck trays
//!
//! Reads the sensor workbooks, derives each sensor's latest reading,
//! classifies tray wear against the 18 mm / 10 mm thresholds and serves the
//! result as an HTML page, a JSON view model and a normalized workbook
//! download.
//!
//! # Example
//!
//! ```no_run
//! use tray_wear_dashboard::config::DashboardConfig;
//! use tray_wear_dashboard::view::{render_page, RenderContext};
//!
//! let config = DashboardConfig::default();
//! let view = render_page(&RenderContext::from(&config));
//!
//! println!("{}", view.title);
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use error::{DashboardError, DashboardResult};
pub use types::{RawTable, SensorDatabase, SensorHistory, SensorRecord, SensorStatus};
