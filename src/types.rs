/// What a single cell contributes to its column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellKind {
    /// Blank after trimming. Counted nowhere.
    Empty,
    Number(f64),
    /// Non-blank but not a finite decimal number.
    Invalid,
}

/// Parses an already-trimmed cell as a finite decimal number.
///
/// Accepts whatever `f64::from_str` accepts (signs, decimals, exponents,
/// forms like `.5` and `5.`), then rejects non-finite results, so `inf`,
/// `NaN` and overflowing literals such as `1e400` all come back `None`.
/// Hex, digit separators and repeated decimal points are rejected by the parser itself.
pub fn parse_numeric(trimmed: &str) -> Option<f64> {
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn classify(cell: &str) -> CellKind {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return CellKind::Empty;
    }
    match parse_numeric(trimmed) {
        Some(value) => CellKind::Number(value),
        None => CellKind::Invalid,
    }
}
