use serde::{Deserialize, Serialize};

/// A CSV file loaded into memory: ordered headers and ordered rows.
///
/// Cells are `None` when the row is shorter than the header or the cell is empty.
/// Rows that could not be decoded are left out and only counted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
    pub malformed_rows: usize,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self {
            headers,
            rows,
            malformed_rows: 0,
        }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|c| c.as_deref())
    }
}

/// One internal link: the page it sits on, the page it points to and its anchor text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Target")]
    pub target: String,
    #[serde(rename = "Anchor_Text")]
    pub anchor_text: Option<String>,
}

impl EdgeRecord {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        anchor_text: Option<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            anchor_text,
        }
    }

    pub fn anchor_or_empty(&self) -> &str {
        self.anchor_text.as_deref().unwrap_or("")
    }
}

/// A (target URL column, anchor text column) pair plus the key used to match them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPair {
    pub url: usize,
    pub anchor: usize,
    pub key: u32,
}

/// Resolved column roles for a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub source: usize,
    pub pairs: Vec<ColumnPair>,
}

/// Counters collected while reshaping a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeStats {
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub rows_malformed: usize,
    pub pairs_skipped: usize,
    pub edges: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStats {
    pub id: String,
    pub in_degree: usize,
    pub out_degree: usize,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedTarget {
    pub target: String,
    pub count: usize,
}
