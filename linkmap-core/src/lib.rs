pub mod config;
pub mod error;
pub mod graph;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod ranking;
pub mod report;
pub mod views;

pub use config::{AnalysisOptions, LayoutChoice, MarkerConfig, NodeSizing, RenderOptions};
pub use error::LinkMapError;
pub use graph::LinkGraph;
pub use model::{EdgeRecord, NormalizeStats, RankedTarget, RawTable};
pub use normalize::{NamedPatternPairing, PairingStrategy, PositionalPairing, normalize};
pub use pipeline::{Analysis, Outcome, analyze_bytes, analyze_file, analyze_table};
pub use report::ReportFormat;
