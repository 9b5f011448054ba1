use crate::types::{CellKind, classify};
use serde::Serialize;

/// Running aggregate for one column while rows are still being read.
///
/// Only [`ColumnAccumulator::finalize`] turns it into [`ColumnStats`], and it
/// consumes the accumulator, so nothing can be added afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnAccumulator {
    count_numbers: usize,
    invalid_cells: usize,
    sum: f64,
    /// Incremental mean, used when `sum` overflows.
    running_mean: f64,
    min: Option<f64>,
    max: Option<f64>,
}

/// Finalized statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStats {
    pub count_numbers: usize,
    pub invalid_cells: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl ColumnAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one raw cell. Empty cells are ignored; anything non-numeric only
    /// bumps `invalid_cells`.
    pub fn accumulate(&mut self, cell: &str) {
        match classify(cell) {
            CellKind::Empty => {}
            CellKind::Number(value) => self.push(value),
            CellKind::Invalid => self.invalid_cells += 1,
        }
    }

    fn push(&mut self, value: f64) {
        self.count_numbers += 1;
        self.sum += value;
        let n = self.count_numbers as f64;
        self.running_mean += value / n - self.running_mean / n;
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    pub fn finalize(self) -> ColumnStats {
        let mean = (self.count_numbers > 0).then(|| {
            let mean = self.sum / self.count_numbers as f64;
            if mean.is_finite() {
                mean
            } else {
                self.running_mean
            }
        });
        ColumnStats {
            count_numbers: self.count_numbers,
            invalid_cells: self.invalid_cells,
            min: self.min,
            max: self.max,
            mean,
        }
    }
}
