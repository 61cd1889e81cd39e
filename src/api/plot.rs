//! Thickness chart drawn with plotters into an inline SVG string

use std::ops::Range;

use chrono::{DateTime, NaiveDateTime};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use tracing::warn;

use crate::core::{format_number, ChartModel};

const CHART_SIZE: (u32, u32) = (960, 380);

/// Half a day either side of a single scan
const SINGLE_SCAN_PADDING_SECS: f64 = 43_200.0;

const PALETTE: [RGBColor; 6] = [
    RGBColor(76, 114, 176),
    RGBColor(221, 132, 82),
    RGBColor(85, 168, 104),
    RGBColor(196, 78, 82),
    RGBColor(129, 114, 179),
    RGBColor(147, 120, 96),
];

fn seconds(t: NaiveDateTime) -> f64 {
    t.and_utc().timestamp() as f64
}

fn date_label(secs: f64) -> String {
    DateTime::from_timestamp(secs.round() as i64, 0)
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn thickness_label(mm: f64) -> String {
    format_number((mm * 10.0).round() / 10.0)
}

/// Time axis in epoch seconds and a padded thickness axis
fn axis_ranges(chart: &ChartModel) -> Option<(Range<f64>, Range<f64>)> {
    let (x_min, x_max) = chart.x_bounds()?;
    let (y_min, y_max) = chart.y_bounds()?;

    let (mut x_lo, mut x_hi) = (seconds(x_min), seconds(x_max));
    if x_hi <= x_lo {
        x_lo -= SINGLE_SCAN_PADDING_SECS;
        x_hi += SINGLE_SCAN_PADDING_SECS;
    }
    let y_pad = ((y_max - y_min) * 0.1).max(1.0);

    Some((x_lo..x_hi, (y_min - y_pad)..(y_max + y_pad)))
}

fn draw_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    chart: &ChartModel,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let Some((x_range, y_range)) = axis_ranges(chart) else {
        let (width, height) = root.dim_in_pixel();
        root.draw(&Text::new(
            "No sensor data",
            (width as i32 / 2 - 60, height as i32 / 2),
            ("sans-serif", 20),
        ))?;
        return Ok(());
    };
    let (x_lo, x_hi) = (x_range.start, x_range.end);

    let mut plot = ChartBuilder::on(root)
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(x_range, y_range)?;

    plot.configure_mesh()
        .x_desc(chart.x_title.as_str())
        .y_desc(chart.y_title.as_str())
        .x_labels(6)
        .x_label_formatter(&|secs| date_label(*secs))
        .y_label_formatter(&|mm| thickness_label(*mm))
        .draw()?;

    for (idx, series) in chart.series.iter().enumerate() {
        let color = PALETTE[idx % PALETTE.len()];

        if let Some(reference) = &series.reference {
            let style = color.mix(0.7).stroke_width(1);
            let line = [(x_lo, reference.y), (x_hi, reference.y)];
            let anno = if reference.dashed {
                plot.draw_series(DashedLineSeries::new(line, 8, 5, style))?
            } else {
                plot.draw_series(LineSeries::new(line, style))?
            };
            anno.label(reference.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        }

        let points: Vec<(f64, f64)> = series
            .points
            .iter()
            .map(|p| (seconds(p.scan_time), p.thickness))
            .collect();
        let line_style = color.stroke_width(2);
        plot.draw_series(LineSeries::new(points.iter().copied(), line_style))?
            .label(series.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
        plot.draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, 3, color.filled())),
        )?;
    }

    plot.configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

/// Render the chart as an `<svg>` element. Returns an empty string if drawing fails.
pub fn render_chart_svg(chart: &ChartModel) -> String {
    let mut svg = String::new();
    let drawn = {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        draw_chart(&root, chart).and_then(|_| root.present())
    };

    if let Err(e) = drawn {
        warn!(error = %e, "chart rendering failed");
        return String::new();
    }
    svg
}
