use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tray_wear_dashboard::api::{run_api_server, server::ApiConfig};
use tray_wear_dashboard::cli;
use tray_wear_dashboard::config::DashboardConfig;
use tray_wear_dashboard::view::RenderContext;

#[derive(Parser)]
#[command(name = "tray-wear")]
#[command(about = "Wear sensor dashboard for linerless truck trays")]
#[command(long_about = "Tray Wear - passive wear sensor dashboard

Reads the latest-readings workbook and the per-sensor database workbook,
classifies each tray sensor against the wear thresholds and serves the
result as a web page.

THRESHOLDS:
  > 18 mm        Acceptable thickness, use as normal
  = 18 mm        Please order trays
  10 - 18 mm     Wearing thin, inspections required
  = 10 mm        Replace

COMMANDS:
  serve   - Run the dashboard web server
  status  - Print the latest status of every sensor
  export  - Write the database with normalized column names

EXAMPLES:
  tray-wear status
  tray-wear --config dashboard.yaml serve --port 3000
  tray-wear export -o normalized.xlsx")]
#[command(version)]
struct Cli {
    /// Dashboard config file (YAML)
    #[arg(short, long, global = true, env = "TRAY_WEAR_CONFIG")]
    config: Option<PathBuf>,

    /// Latest-readings workbook (overrides config)
    #[arg(long, global = true, env = "TRAY_WEAR_LATEST")]
    latest: Option<PathBuf>,

    /// Sensor database workbook (overrides config)
    #[arg(long, global = true, env = "TRAY_WEAR_DATABASE")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard web server
    Serve {
        /// Host address to bind to (use 0.0.0.0 for all interfaces)
        #[arg(short = 'H', long, env = "TRAY_WEAR_HOST")]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long, env = "TRAY_WEAR_PORT")]
        port: Option<u16>,
    },

    /// Print the latest status of every sensor
    Status {
        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write the database workbook with normalized column names
    Export {
        /// Output Excel file
        #[arg(short, long)]
        output: PathBuf,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let config = DashboardConfig::load_or_default(args.config.as_deref())?
        .with_workbooks(args.latest, args.database);
    let context = RenderContext::from(&config);

    match args.command {
        Commands::Serve { host, port } => {
            let api_config = ApiConfig {
                host: host.unwrap_or(config.host),
                port: port.unwrap_or(config.port),
            };
            run_api_server(api_config, context).await
        }

        Commands::Status { verbose } => Ok(cli::status(&context, verbose)?),

        Commands::Export { output, verbose } => Ok(cli::export(&context, output, verbose)?),
    }
}
