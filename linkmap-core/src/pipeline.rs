use crate::config::AnalysisOptions;
use crate::error::Result;
use crate::graph::LinkGraph;
use crate::loader::{load_csv, load_csv_bytes};
use crate::model::{EdgeRecord, NormalizeStats, RankedTarget, RawTable};
use crate::normalize::normalize_with;
use crate::ranking::rank_targets;
use std::path::Path;
use tracing::{info, warn};

/// Everything derived from one input file
#[derive(Debug, Clone)]
pub struct Analysis {
    pub edges: Vec<EdgeRecord>,
    pub graph: LinkGraph,
    pub ranking: Vec<RankedTarget>,
    pub stats: NormalizeStats,
    pub layout: &'static str,
}

impl Analysis {
    pub fn link_count(&self) -> usize {
        self.edges.len()
    }
}

/// Result of a run: either a full analysis or a well-formed file with no links
#[derive(Debug, Clone)]
pub enum Outcome {
    Empty {
        stats: NormalizeStats,
        layout: &'static str,
    },
    Complete(Analysis),
}

impl Outcome {
    pub fn analysis(&self) -> Option<&Analysis> {
        match self {
            Outcome::Complete(analysis) => Some(analysis),
            Outcome::Empty { .. } => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Outcome::Empty { .. })
    }
}

/// Run the normalizer, graph builder and ranking over an in-memory table
pub fn analyze_table(table: &RawTable, options: &AnalysisOptions) -> Result<Outcome> {
    let normalized = normalize_with(table, options.layout, &options.markers)?;

    if normalized.edges.is_empty() {
        warn!("No valid links found in {} rows", normalized.stats.rows_read);
        return Ok(Outcome::Empty {
            stats: normalized.stats,
            layout: normalized.layout,
        });
    }

    let graph = LinkGraph::from_edges(&normalized.edges);
    let ranking = rank_targets(&normalized.edges, options.top_n);
    info!(
        "Analysis complete: {} links, {} pages",
        normalized.edges.len(),
        graph.node_count()
    );

    Ok(Outcome::Complete(Analysis {
        edges: normalized.edges,
        graph,
        ranking,
        stats: normalized.stats,
        layout: normalized.layout,
    }))
}

pub fn analyze_file(path: &Path, options: &AnalysisOptions) -> Result<Outcome> {
    let table = load_csv(path)?;
    analyze_table(&table, options)
}

pub fn analyze_bytes(bytes: &[u8], options: &AnalysisOptions) -> Result<Outcome> {
    let table = load_csv_bytes(bytes)?;
    analyze_table(&table, options)
}
