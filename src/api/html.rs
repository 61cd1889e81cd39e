//! HTML rendering of the dashboard view model
//!
//! Plain server-side markup with the plotters chart inlined; no scripts.

use std::fmt::Write;

use super::plot::render_chart_svg;
use crate::core::{format_number, Severity};
use crate::view::{DownloadSection, LiveStatus, Notice, NoticeLevel, SensorMetric, ViewModel};

const STYLE: &str = "body{font-family:sans-serif;max-width:1800px;margin:0 auto;padding:0 1rem}\
.metric{border:1px solid #ccc;border-radius:6px;padding:.6rem 1rem;margin:.5rem 0}\
.metric .value{font-size:1.8rem}.delta-neg{color:#c44e52}.delta-pos{color:#55a868}\
.notice{padding:.5rem 1rem;border-radius:4px;margin:.3rem 0}\
.info{background:#e7f0fb}.success{background:#e6f4ea}.warning{background:#fff4d6}\
.error{background:#fde8e8}table{border-collapse:collapse}td,th{border:1px solid #ddd;padding:.2rem .5rem}";

/// Escape text for HTML element and attribute content
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn notice_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "info",
        NoticeLevel::Success => "success",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    }
}

fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Warning => "warning",
        Severity::Error => "error",
        _ => "info",
    }
}

fn render_notices(out: &mut String, notices: &[Notice]) {
    for notice in notices {
        let _ = write!(
            out,
            "<div class=\"notice {}\">{}</div>",
            notice_class(notice.level),
            escape(&notice.message)
        );
    }
}

fn render_metric(out: &mut String, metric: &SensorMetric) {
    out.push_str("<div class=\"metric\">");
    if let Some(caption) = &metric.caption {
        let _ = write!(out, "<small>{}</small>", escape(caption));
    }
    let _ = write!(
        out,
        "<div class=\"label\">{}</div><div class=\"value\">{}</div>",
        escape(&metric.label),
        escape(&metric.value)
    );
    if let Some(delta) = metric.delta {
        let class = if delta < 0.0 { "delta-neg" } else { "delta-pos" };
        let _ = write!(out, "<div class=\"{}\">{}</div>", class, format_number(delta));
    }
    out.push_str("</div>");

    // No-data sensors show only the widget
    if metric.delta.is_none() {
        return;
    }
    let class = severity_class(metric.classification.severity);
    if let Some(message) = metric.classification.message {
        let _ = write!(out, "<div class=\"notice {}\">{}!</div>", class, escape(message));
    }
    if let Some(hint) = &metric.hint {
        let _ = write!(out, "<div class=\"notice info\">{}</div>", escape(hint));
    }
}

fn render_download(out: &mut String, download: &DownloadSection) {
    if let Some(href) = &download.href {
        let _ = write!(
            out,
            "<p><a href=\"{}\" download=\"{}\">Download Database</a></p>",
            escape(href),
            escape(&download.file_name)
        );
    }
    render_notices(out, &download.notices);
}

/// Render the full dashboard page
pub fn render_html(view: &ViewModel) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"UTF-8\">\
         <title>{title}</title><style>{style}</style></head><body><h2>{title}</h2>",
        title = escape(&view.title),
        style = STYLE
    );

    // 1. Installation details
    out.push_str("<h3>1. Wear Sensor Installation Details</h3>");
    let tabs = &view.installation.tabs;
    if let Some(first) = tabs.first() {
        let _ = write!(
            out,
            "<details open><summary>{}</summary><p>{}</p></details>",
            escape(first),
            escape(&view.installation.caption)
        );
    }
    if let Some(second) = tabs.get(1) {
        let _ = write!(
            out,
            "<details><summary>{}</summary><p>{}</p></details>",
            escape(second),
            escape(&view.installation.placeholder)
        );
    }

    // 2. Live status
    out.push_str("<h3>2. Wear Sensor Live Status</h3>");
    let _ = write!(
        out,
        "<details open><summary>{}</summary>",
        escape(view.status_tabs.first().map(String::as_str).unwrap_or_default())
    );
    match &view.live_status {
        LiveStatus::Ready {
            metrics,
            chart,
            download,
        } => {
            for metric in metrics {
                render_metric(&mut out, metric);
            }
            out.push_str("<h3>3. Wear Sensor Plots</h3>");
            out.push_str(&render_chart_svg(chart));
            render_download(&mut out, download);
        }
        LiveStatus::Unavailable { notices } => render_notices(&mut out, notices),
    }
    out.push_str("</details>");

    // Debug table
    let _ = write!(
        out,
        "<details><summary>{}</summary><p>{}</p>",
        escape(view.status_tabs.get(1).map(String::as_str).unwrap_or_default()),
        escape(&view.debug_table.title)
    );
    render_notices(&mut out, &view.debug_table.notices);
    if let Some(table) = &view.debug_table.table {
        out.push_str("<table><thead><tr>");
        for header in &table.headers {
            let _ = write!(out, "<th>{}</th>", escape(header));
        }
        out.push_str("</tr></thead><tbody>");
        for row in &table.rows {
            out.push_str("<tr>");
            for cell in row {
                let _ = write!(out, "<td>{}</td>", escape(cell));
            }
            out.push_str("</tr>");
        }
        out.push_str("</tbody></table>");
    }
    out.push_str("</details></body></html>");
    out
}
