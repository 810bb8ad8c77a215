use crate::error::Result;
use crate::model::RawTable;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

const BOM: char = '\u{feff}';

/// Load a CSV export from disk into a [`RawTable`]
pub fn load_csv(path: &Path) -> Result<RawTable> {
    info!("Loading CSV export {}", path.display());
    let file = File::open(path)?;
    load_csv_reader(file)
}

/// Load a CSV export that is already in memory (e.g. an uploaded file)
pub fn load_csv_bytes(bytes: &[u8]) -> Result<RawTable> {
    load_csv_reader(bytes)
}

/// Parse CSV from any reader. Rows may be shorter or longer than the header row.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<RawTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, h)| {
            if idx == 0 {
                h.trim_start_matches(BOM).to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    let mut malformed = 0;
    for (idx, record) in csv_reader.byte_records().enumerate() {
        let record = record?;
        match decode_row(&record) {
            Some(row) => rows.push(row),
            None => {
                warn!("Row {} is not valid UTF-8; skipping", idx + 1);
                malformed += 1;
            }
        }
    }

    let mut table = RawTable::new(headers, rows);
    table.malformed_rows = malformed;
    debug!(
        "Loaded {} columns x {} rows ({} malformed)",
        table.column_count(),
        table.row_count(),
        malformed
    );
    Ok(table)
}

/// `None` when any cell of the row is not valid UTF-8
fn decode_row(record: &csv::ByteRecord) -> Option<Vec<Option<String>>> {
    record
        .iter()
        .map(|cell| {
            std::str::from_utf8(cell)
                .ok()
                .map(|text| (!text.is_empty()).then(|| text.to_string()))
        })
        .collect()
}
