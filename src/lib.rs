mod columns;
mod stats;
mod tokenizer;
mod types;

use serde::ser::{SerializeMap, Serializer};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, trace};

pub use columns::{ColumnSet, DuplicateHeaders};
pub use stats::{ColumnAccumulator, ColumnStats};
pub use tokenizer::tokenize;
pub use types::{CellKind, classify, parse_numeric};

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("no header found")]
    NoHeader,
    #[error("header has no columns")]
    EmptyHeader,
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

impl StatsError {
    /// True for the two ways an input can lack anything to describe.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, StatsError::NoHeader | StatsError::EmptyHeader)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DescribeOptions {
    pub duplicate_headers: DuplicateHeaders,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    rows_processed: usize,
    #[serde(serialize_with = "serialize_columns")]
    columns: Vec<(String, ColumnStats)>,
}

impl Report {
    pub fn rows_processed(&self) -> usize {
        self.rows_processed
    }

    /// Columns in header order.
    pub fn columns(&self) -> &[(String, ColumnStats)] {
        &self.columns
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, StatsError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

// Emitted as an object so key order follows the header rather than a hash.
fn serialize_columns<S: Serializer>(
    columns: &[(String, ColumnStats)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(columns.len()))?;
    for (name, stats) in columns {
        map.serialize_entry(name, stats)?;
    }
    map.end()
}

/// Computes the report for CSV text already held in memory.
///
/// Every line is trimmed and blank lines are skipped. The first remaining line
/// is the header and every later one is a data row.
pub fn describe(text: &str, options: &DescribeOptions) -> Result<Report, StatsError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_line, header) = lines.next().ok_or(StatsError::NoHeader)?;
    let mut columns = ColumnSet::new(tokenize(header), options.duplicate_headers)?;
    debug!(line = header_line, columns = columns.width(), "found header");

    let mut rows_processed = 0;
    for (line_no, line) in lines {
        let cells = tokenize(line);
        trace!(line = line_no, cells = cells.len(), "row");
        columns.accumulate_row(&cells);
        rows_processed += 1;
    }

    let columns = columns.finalize();
    let invalid_cells: usize = columns.iter().map(|(_, stats)| stats.invalid_cells).sum();
    info!(
        rows = rows_processed,
        columns = columns.len(),
        invalid_cells,
        "described input"
    );

    Ok(Report {
        rows_processed,
        columns,
    })
}

pub fn describe_file(path: &Path, options: &DescribeOptions) -> Result<Report, StatsError> {
    debug!(path = %path.display(), "reading input");
    let text = fs::read_to_string(path).map_err(|source| StatsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    describe(&text, options)
}
