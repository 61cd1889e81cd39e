//! Tray Wear dashboard server binary
//!
//! Serves the dashboard page, its JSON view model and the normalized
//! database download.

use clap::Parser;
use std::path::PathBuf;
use tray_wear_dashboard::api::{run_api_server, server::ApiConfig};
use tray_wear_dashboard::config::DashboardConfig;
use tray_wear_dashboard::view::RenderContext;

#[derive(Parser, Debug)]
#[command(name = "tray-wear-server")]
#[command(version)]
#[command(about = "Tray Wear dashboard server")]
#[command(long_about = r#"
Tray Wear dashboard server

Endpoints:
  - GET /                  - Dashboard page
  - GET /api/v1/dashboard  - Page view model (JSON)
  - GET /api/v1/sensors    - Latest status per sensor (JSON)
  - GET /api/v1/download   - Normalized sensor database (.xlsx)
  - GET /health            - Health check
  - GET /version           - Server version info

Every request re-reads the workbooks, so replacing a file on disk is picked
up on the next page load.

Example usage:
  tray-wear-server                              # Start on localhost:8080
  tray-wear-server --host 0.0.0.0 --port 3000
  tray-wear-server --config dashboard.yaml
  tray-wear-server --database /data/Boddington_pwsTray_Database_update.xlsx
"#)]
struct Args {
    /// Dashboard config file (YAML)
    #[arg(short, long, env = "TRAY_WEAR_CONFIG")]
    config: Option<PathBuf>,

    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, env = "TRAY_WEAR_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "TRAY_WEAR_PORT")]
    port: Option<u16>,

    /// Latest-readings workbook (overrides config)
    #[arg(long, env = "TRAY_WEAR_LATEST")]
    latest: Option<PathBuf>,

    /// Sensor database workbook (overrides config)
    #[arg(long, env = "TRAY_WEAR_DATABASE")]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = DashboardConfig::load_or_default(args.config.as_deref())?
        .with_workbooks(args.latest, args.database);

    let api_config = ApiConfig {
        host: args.host.unwrap_or_else(|| config.host.clone()),
        port: args.port.unwrap_or(config.port),
    };

    run_api_server(api_config, RenderContext::from(&config)).await
}
