//! Reshape a wide link export (one row per page, repeated link columns) into
//! a long list of [`EdgeRecord`]s.
//!
//! Two header conventions are supported, both expressed as a [`PairingStrategy`]
//! that resolves the header row into a [`ColumnLayout`]. Row extraction is shared.

use crate::config::{LayoutChoice, MarkerConfig};
use crate::error::{LinkMapError, Result};
use crate::model::{ColumnLayout, ColumnPair, EdgeRecord, NormalizeStats, RawTable};
use tracing::{debug, info, warn};

/// Maps a header row to a source column and a set of (url, anchor) column pairs
pub trait PairingStrategy {
    fn name(&self) -> &'static str;
    fn resolve(&self, headers: &[String]) -> Result<ColumnLayout>;
}

/// Column 0 is the source page; columns 1.. alternate (target URL, anchor text)
/// regardless of their names. A trailing unpaired column is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalPairing;

impl PairingStrategy for PositionalPairing {
    fn name(&self) -> &'static str {
        "positional"
    }

    fn resolve(&self, headers: &[String]) -> Result<ColumnLayout> {
        if headers.is_empty() {
            return Err(LinkMapError::format(self.name(), "the file has no columns"));
        }

        let pairs: Vec<ColumnPair> = (1..headers.len())
            .step_by(2)
            .filter(|&i| i + 1 < headers.len())
            .map(|i| ColumnPair {
                url: i,
                anchor: i + 1,
                key: ((i - 1) / 2 + 1) as u32,
            })
            .collect();

        if pairs.is_empty() {
            return Err(LinkMapError::format(
                self.name(),
                format!(
                    "found {} column(s); need a source column and at least one (URL, anchor) pair",
                    headers.len()
                ),
            ));
        }

        if headers.len() % 2 == 0 {
            debug!("Ignoring trailing unpaired column '{}'", headers[headers.len() - 1]);
        }

        Ok(ColumnLayout { source: 0, pairs })
    }
}

/// A named source column plus marker-token columns paired by numeric suffix
/// (`URL_Destino_Contenido_2` joins `Texto_Ancla_Contenido_2`).
#[derive(Debug, Clone)]
pub struct NamedPatternPairing {
    pub markers: MarkerConfig,
}

impl NamedPatternPairing {
    pub fn new(markers: MarkerConfig) -> Self {
        Self { markers }
    }

    fn source_index(&self, headers: &[String]) -> Option<usize> {
        find_source_column(headers, &self.markers.source_column)
    }
}

impl Default for NamedPatternPairing {
    fn default() -> Self {
        Self::new(MarkerConfig::default())
    }
}

impl PairingStrategy for NamedPatternPairing {
    fn name(&self) -> &'static str {
        "named"
    }

    fn resolve(&self, headers: &[String]) -> Result<ColumnLayout> {
        let source = self.source_index(headers).ok_or_else(|| {
            LinkMapError::format(
                self.name(),
                format!("no '{}' source column", self.markers.source_column),
            )
        })?;

        let url_columns = marker_columns(headers, source, &self.markers.url_marker);
        let anchor_columns = marker_columns(headers, source, &self.markers.anchor_marker);

        if url_columns.is_empty() {
            return Err(LinkMapError::format(
                self.name(),
                format!("no columns containing '{}'", self.markers.url_marker),
            ));
        }

        // Inner join on the suffix
        let mut pairs = Vec::new();
        for &(url, key) in &url_columns {
            let mut matched = false;
            for &(anchor, anchor_key) in &anchor_columns {
                if anchor_key == key && anchor != url {
                    pairs.push(ColumnPair { url, anchor, key });
                    matched = true;
                }
            }
            if !matched {
                warn!(
                    "Column '{}' has no matching '{}' column for suffix {}; ignoring it",
                    headers[url], self.markers.anchor_marker, key
                );
            }
        }

        if pairs.is_empty() {
            return Err(LinkMapError::format(
                self.name(),
                format!(
                    "no '{}' column shares a numeric suffix with a '{}' column",
                    self.markers.url_marker, self.markers.anchor_marker
                ),
            ));
        }

        // Stable sort keeps header order within a suffix
        pairs.sort_by_key(|p| p.key);
        Ok(ColumnLayout { source, pairs })
    }
}

/// Columns other than `source` whose name contains `marker`, with their suffix key
fn marker_columns(headers: &[String], source: usize, marker: &str) -> Vec<(usize, u32)> {
    headers
        .iter()
        .enumerate()
        .filter(|(idx, h)| *idx != source && h.contains(marker))
        .filter_map(|(idx, h)| match numeric_suffix(h) {
            Some(key) => Some((idx, key)),
            None => {
                warn!("Column '{}' has an out of range numeric suffix; ignoring it", h);
                None
            }
        })
        .collect()
}

/// Exact (trimmed, case-insensitive) match of the configured source column name
pub fn find_source_column(headers: &[String], source_column: &str) -> Option<usize> {
    let wanted = source_column.trim().to_lowercase();
    headers
        .iter()
        .position(|h| h.trim().to_lowercase() == wanted)
}

/// Last run of ASCII digits in a column name, or 0 when there is none.
/// `None` when the digits do not fit a `u32`; such a column joins nothing.
pub fn numeric_suffix(column: &str) -> Option<u32> {
    let bytes = column.as_bytes();
    let Some(end) = bytes.iter().rposition(|b| b.is_ascii_digit()) else {
        return Some(0);
    };
    let start = bytes[..end]
        .iter()
        .rposition(|b| !b.is_ascii_digit())
        .map(|i| i + 1)
        .unwrap_or(0);
    column[start..=end].parse().ok()
}

/// Pick the strategy for a header row. `Auto` selects the named convention when the
/// configured source column and at least one URL marker column are present.
pub fn detect_layout(
    headers: &[String],
    choice: LayoutChoice,
    markers: &MarkerConfig,
) -> Box<dyn PairingStrategy> {
    match choice {
        LayoutChoice::Positional => Box::new(PositionalPairing),
        LayoutChoice::Named => Box::new(NamedPatternPairing::new(markers.clone())),
        LayoutChoice::Auto => {
            let has_source = find_source_column(headers, &markers.source_column).is_some();
            let has_marker = headers.iter().any(|h| h.contains(&markers.url_marker));
            if has_source && has_marker {
                debug!("Header matches named-pattern layout");
                Box::new(NamedPatternPairing::new(markers.clone()))
            } else {
                debug!("Falling back to positional layout");
                Box::new(PositionalPairing)
            }
        }
    }
}

/// Result of reshaping a table
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub edges: Vec<EdgeRecord>,
    pub stats: NormalizeStats,
    pub layout: &'static str,
}

/// Reshape `table` into edge records using `strategy`.
///
/// Rows without a usable source and pairs without a target URL are skipped and
/// counted in [`NormalizeStats`]. Source and target are trimmed; anchor text is not.
pub fn normalize(table: &RawTable, strategy: &dyn PairingStrategy) -> Result<Normalized> {
    let layout = strategy.resolve(&table.headers)?;
    info!(
        "Normalizing {} rows with {} layout ({} column pairs)",
        table.row_count(),
        strategy.name(),
        layout.pairs.len()
    );

    let mut stats = NormalizeStats {
        rows_malformed: table.malformed_rows,
        ..NormalizeStats::default()
    };
    let mut edges = Vec::new();

    for (row_idx, row) in table.rows.iter().enumerate() {
        stats.rows_read += 1;

        let Some(source) = non_blank(row.get(layout.source)) else {
            debug!("Row {} has no source page; skipping", row_idx + 1);
            stats.rows_skipped += 1;
            continue;
        };

        for pair in &layout.pairs {
            match non_blank(row.get(pair.url)) {
                Some(target) => {
                    let anchor_text = row.get(pair.anchor).cloned().flatten();
                    edges.push(EdgeRecord::new(source, target, anchor_text));
                }
                None => stats.pairs_skipped += 1,
            }
        }
    }

    stats.edges = edges.len();
    info!(
        "Found {} links ({} rows skipped, {} malformed rows, {} empty pairs)",
        stats.edges, stats.rows_skipped, stats.rows_malformed, stats.pairs_skipped
    );

    Ok(Normalized {
        edges,
        stats,
        layout: strategy.name(),
    })
}

/// Detect the layout and normalize in one step
pub fn normalize_with(
    table: &RawTable,
    choice: LayoutChoice,
    markers: &MarkerConfig,
) -> Result<Normalized> {
    let strategy = detect_layout(&table.headers, choice, markers);
    normalize(table, strategy.as_ref())
}

fn non_blank(cell: Option<&Option<String>>) -> Option<&str> {
    cell.and_then(|c| c.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
