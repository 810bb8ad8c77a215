use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE_COLUMN: &str = "Dirección";
pub const DEFAULT_URL_MARKER: &str = "URL_Destino";
pub const DEFAULT_ANCHOR_MARKER: &str = "Texto_Ancla";
pub const DEFAULT_TOP_N: usize = 20;

/// Which column pairing convention to apply to the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutChoice {
    /// Inspect the header row and pick a convention
    #[default]
    Auto,
    /// Column 0 is the source, then alternating (url, anchor) columns
    Positional,
    /// A named source column plus marker-token columns joined on a numeric suffix
    Named,
}

impl LayoutChoice {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(LayoutChoice::Auto),
            "positional" | "pairs" => Some(LayoutChoice::Positional),
            "named" | "pattern" => Some(LayoutChoice::Named),
            _ => None,
        }
    }
}

/// Column names and marker tokens for the named-pattern convention
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerConfig {
    pub source_column: String,
    pub url_marker: String,
    pub anchor_marker: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            source_column: DEFAULT_SOURCE_COLUMN.to_string(),
            url_marker: DEFAULT_URL_MARKER.to_string(),
            anchor_marker: DEFAULT_ANCHOR_MARKER.to_string(),
        }
    }
}

/// Options for a single analysis run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub layout: LayoutChoice,
    pub markers: MarkerConfig,
    pub top_n: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            layout: LayoutChoice::Auto,
            markers: MarkerConfig::default(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Node size = base + in_degree * scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSizing {
    pub base: u32,
    pub scale: u32,
}

impl Default for NodeSizing {
    fn default() -> Self {
        Self { base: 10, scale: 3 }
    }
}

impl NodeSizing {
    pub fn size_for(&self, in_degree: usize) -> u32 {
        let degree = u32::try_from(in_degree).unwrap_or(u32::MAX);
        self.base.saturating_add(degree.saturating_mul(self.scale))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStyle {
    pub sizing: NodeSizing,
    pub height: String,
    pub background: String,
    pub font_color: String,
}

impl Default for NetworkStyle {
    fn default() -> Self {
        Self {
            sizing: NodeSizing::default(),
            height: "750px".to_string(),
            background: "#222222".to_string(),
            font_color: "white".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub width: u32,
    pub bar_height: u32,
    pub label_width: u32,
    pub max_label_chars: usize,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            bar_height: 28,
            label_width: 460,
            max_label_chars: 60,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub network: NetworkStyle,
    pub chart: ChartStyle,
}
