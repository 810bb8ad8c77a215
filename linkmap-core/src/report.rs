// Edge table and run summary in the supported output formats

use crate::config::NodeSizing;
use crate::error::{LinkMapError, Result};
use crate::model::EdgeRecord;
use crate::pipeline::{Analysis, Outcome};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
    Html,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "csv" => Some(ReportFormat::Csv),
            "html" => Some(ReportFormat::Html),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
            ReportFormat::Html => "html",
            ReportFormat::Markdown => "md",
        }
    }
}

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

/// Render the full edge list, in input order, in the requested format
pub fn render_edge_table(edges: &[EdgeRecord], format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(generate_text_table(edges)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(edges)?),
        ReportFormat::Csv => generate_csv_table(edges),
        ReportFormat::Html => Ok(generate_html_table(edges)),
        ReportFormat::Markdown => Ok(generate_markdown_table(edges)),
    }
}

fn generate_text_table(edges: &[EdgeRecord]) -> String {
    let source_width = column_width("Source", edges.iter().map(|e| e.source.as_str()));
    let target_width = column_width("Target", edges.iter().map(|e| e.target.as_str()));

    let mut table = String::new();
    table.push_str(&format!(
        "{:<sw$}  {:<tw$}  {}\n",
        "Source",
        "Target",
        "Anchor_Text",
        sw = source_width,
        tw = target_width
    ));
    table.push_str(&format!(
        "{}  {}  {}\n",
        "─".repeat(source_width),
        "─".repeat(target_width),
        "─".repeat(11)
    ));
    for edge in edges {
        table.push_str(&format!(
            "{:<sw$}  {:<tw$}  {}\n",
            edge.source,
            edge.target,
            edge.anchor_or_empty(),
            sw = source_width,
            tw = target_width
        ));
    }
    table
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len())
}

fn generate_csv_table(edges: &[EdgeRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for edge in edges {
        writer.serialize(edge)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| LinkMapError::render("edge table", e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| LinkMapError::render("edge table", e.to_string()))
}

fn generate_html_table(edges: &[EdgeRecord]) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Internal links</title>\n");
    html.push_str(
        "<style>body{font-family:sans-serif;margin:1.5em}table{border-collapse:collapse;width:100%}\
         th,td{border:1px solid #ccc;padding:4px 8px;text-align:left}th{background:#eee}</style>\n",
    );
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>All detected links ({})</h1>\n", edges.len()));
    html.push_str("<table>\n<thead><tr><th>Source</th><th>Target</th><th>Anchor_Text</th></tr></thead>\n<tbody>\n");
    for edge in edges {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            html_escape(&edge.source),
            html_escape(&edge.target),
            html_escape(edge.anchor_or_empty())
        ));
    }
    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}

fn generate_markdown_table(edges: &[EdgeRecord]) -> String {
    let mut md = String::new();
    md.push_str("| Source | Target | Anchor_Text |\n");
    md.push_str("|---|---|---|\n");
    for edge in edges {
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            markdown_escape(&edge.source),
            markdown_escape(&edge.target),
            markdown_escape(edge.anchor_or_empty())
        ));
    }
    md
}

/// Console summary of a run
pub fn generate_summary_text(outcome: &Outcome) -> String {
    let mut report = String::new();
    report.push_str(RULE);
    report.push_str("                        LINKMAP INTERNAL LINK REPORT\n");
    report.push_str(RULE);
    report.push('\n');

    match outcome {
        Outcome::Empty { stats, layout } => {
            report.push_str(&format!("Layout:        {}\n", layout));
            report.push_str(&format!("Rows read:     {}\n", stats.rows_read));
            report.push_str("Links found:   0\n\n");
            report.push_str("No valid links were found. Check that the file follows the expected layout.\n");
        }
        Outcome::Complete(analysis) => {
            report.push_str(&format!("Layout:        {}\n", analysis.layout));
            report.push_str(&format!("Rows read:     {}\n", analysis.stats.rows_read));
            report.push_str(&format!("Rows skipped:  {}\n", analysis.stats.rows_skipped));
            report.push_str(&format!("Malformed:     {}\n", analysis.stats.rows_malformed));
            report.push_str(&format!("Empty pairs:   {}\n", analysis.stats.pairs_skipped));
            report.push_str(&format!("Links found:   {}\n", analysis.link_count()));
            report.push_str(&format!("Pages:         {}\n", analysis.graph.node_count()));
            report.push_str(&format!("Unique links:  {}\n\n", analysis.graph.edge_count()));

            report.push_str(RULE);
            report.push_str("MOST LINKED PAGES\n");
            report.push_str(RULE);
            report.push('\n');
            for (idx, ranked) in analysis.ranking.iter().enumerate() {
                report.push_str(&format!("  {:>2}. {:>5}  {}\n", idx + 1, ranked.count, ranked.target));
            }
            report.push('\n');
        }
    }

    report
}

/// Machine readable summary: stats, ranking, per-node degrees and the edge list
pub fn generate_json_report(analysis: &Analysis, sizing: &NodeSizing) -> Result<String> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "linkmap",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "layout": analysis.layout,
            },
            "summary": {
                "rows_read": analysis.stats.rows_read,
                "rows_skipped": analysis.stats.rows_skipped,
                "rows_malformed": analysis.stats.rows_malformed,
                "pairs_skipped": analysis.stats.pairs_skipped,
                "links": analysis.link_count(),
                "pages": analysis.graph.node_count(),
                "unique_links": analysis.graph.edge_count(),
            },
            "top_linked": analysis.ranking,
            "nodes": analysis.graph.node_stats(sizing),
            "edges": analysis.edges,
        }
    });

    Ok(serde_json::to_string_pretty(&json_report)?)
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

pub(crate) fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn markdown_escape(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}
