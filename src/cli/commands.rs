use crate::core::{assess_database, format_number, SensorAssessment, Severity};
use crate::error::DashboardResult;
use crate::excel::DISPLAY_DATETIME_FORMAT;
use crate::view::RenderContext;
use colored::{ColoredString, Colorize};
use std::path::PathBuf;

fn paint(text: &str, severity: Severity) -> ColoredString {
    match severity {
        Severity::Info => text.green(),
        Severity::Warning => text.yellow().bold(),
        Severity::Error => text.red().bold(),
        Severity::NoData | Severity::Unclassified => text.dimmed(),
    }
}

/// One terminal line per sensor, without colors
pub fn format_assessment(assessment: &SensorAssessment) -> String {
    let status = &assessment.status;
    let classification = &assessment.classification;

    let reading = match (status.has_data(), status.actual_length, status.total_length) {
        (true, Some(actual), Some(total)) => format!(
            "{}mm / {}mm",
            format_number(actual),
            format_number(total)
        ),
        _ => "-".to_string(),
    };
    let time = status
        .latest_time
        .map(|t| t.format(DISPLAY_DATETIME_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{:<16} {:<20} {:<18} {}",
        status.sensor_name,
        time,
        reading,
        classification.message.unwrap_or("-")
    )
}

/// Execute the status command
pub fn status(context: &RenderContext, verbose: bool) -> DashboardResult<()> {
    println!("{}", "🔩 Tray Wear - Sensor Status".bold().green());
    println!("   Database: {}\n", context.database_path.display());

    let database = context.load_database()?;

    if verbose {
        println!(
            "   Found {} sensors: {}\n",
            database.len(),
            database.sensor_names().join(", ")
        );
    }

    println!(
        "{}",
        format!(
            "{:<16} {:<20} {:<18} {}",
            "Sensor", "Latest Reading", "Actual / Initial", "Status"
        )
        .bold()
    );
    for assessment in assess_database(&database) {
        let line = format_assessment(&assessment);
        println!("{}", paint(&line, assessment.classification.severity));
        if let Some(hint) = assessment.classification.hint_message() {
            println!("{:<16} {}", "", hint.cyan());
        }
    }
    println!();

    Ok(())
}

/// Execute the export command
pub fn export(context: &RenderContext, output: PathBuf, verbose: bool) -> DashboardResult<()> {
    println!("{}", "🔩 Tray Wear - Database Export".bold().green());
    println!("   Input:  {}", context.database_path.display());
    println!("   Output: {}\n", output.display());

    let exporter = context.exporter();

    if verbose {
        println!("{}", "📖 Checking worksheets...".cyan());
        let sheets = exporter.validate()?;
        println!("   Found {} sensor worksheets\n", sheets);
    }

    exporter.export_to(&output)?;

    println!("{}", "✅ Export Complete!".bold().green());
    println!("   Excel file: {}\n", output.display());

    Ok(())
}
