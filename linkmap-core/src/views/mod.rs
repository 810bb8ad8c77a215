//! Presentation adapters. Each one consumes the analysis read-only and renders
//! to an in-memory string; a failure in one never blocks the others.

pub mod chart;
pub mod network;

pub use chart::render_ranking_svg;
pub use network::render_network_html;

use crate::config::RenderOptions;
use crate::error::Result;
use crate::pipeline::Analysis;
use crate::report::{ReportFormat, render_edge_table};
use tracing::warn;

#[derive(Debug)]
pub struct Views {
    pub network: Result<String>,
    pub ranking: Result<String>,
    pub table: Result<String>,
}

impl Views {
    pub fn all_ok(&self) -> bool {
        self.network.is_ok() && self.ranking.is_ok() && self.table.is_ok()
    }
}

pub fn render_views(analysis: &Analysis, options: &RenderOptions, table_format: ReportFormat) -> Views {
    let views = Views {
        network: render_network_html(&analysis.graph, &options.network),
        ranking: render_ranking_svg(&analysis.ranking, &options.chart),
        table: render_edge_table(&analysis.edges, table_format),
    };

    for (name, result) in [
        ("network", &views.network),
        ("ranking", &views.ranking),
        ("table", &views.table),
    ] {
        if let Err(e) = result {
            warn!("{} view failed: {}", name, e);
        }
    }

    views
}
