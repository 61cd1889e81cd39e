//! Dashboard HTTP server
//!
//! Serves the page, its JSON view model and the database download.
//! Run with `tray-wear serve` or `tray-wear-server`.

pub mod handlers;
pub mod html;
pub mod plot;
pub mod server;

pub use server::{build_router, run_api_server};
