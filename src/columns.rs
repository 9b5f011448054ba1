use crate::StatsError;
use crate::stats::{ColumnAccumulator, ColumnStats};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// How repeated header names are mapped onto accumulators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DuplicateHeaders {
    /// Every column with the same name feeds one shared accumulator, reported
    /// once at the position of its first occurrence.
    #[default]
    Merge,
    /// Later occurrences become `name_2`, `name_3`, ... with their own
    /// accumulators.
    Suffix,
}

/// The open accumulators for one run, keyed by header position.
#[derive(Debug)]
pub struct ColumnSet {
    names: Vec<String>,
    accumulators: Vec<ColumnAccumulator>,
    /// Header position -> index into `names`/`accumulators`.
    slots: Vec<usize>,
}

impl ColumnSet {
    pub fn new(header: Vec<String>, policy: DuplicateHeaders) -> Result<Self, StatsError> {
        if header.is_empty() {
            return Err(StatsError::EmptyHeader);
        }

        let reserved: HashSet<&str> = header.iter().map(String::as_str).collect();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut names = Vec::new();
        let mut slots = Vec::with_capacity(header.len());

        for name in &header {
            let existing = index.get(name).copied();
            let slot = match (existing, policy) {
                (Some(slot), DuplicateHeaders::Merge) => {
                    debug!(column = %name, "merging duplicate header");
                    slot
                }
                (Some(_), DuplicateHeaders::Suffix) => {
                    let mut n = 2;
                    let renamed = loop {
                        let candidate = format!("{name}_{n}");
                        if !reserved.contains(candidate.as_str()) && !index.contains_key(&candidate)
                        {
                            break candidate;
                        }
                        n += 1;
                    };
                    debug!(column = %name, renamed = %renamed, "renaming duplicate header");
                    index.insert(renamed.clone(), names.len());
                    names.push(renamed);
                    names.len() - 1
                }
                (None, _) => {
                    index.insert(name.clone(), names.len());
                    names.push(name.clone());
                    names.len() - 1
                }
            };
            slots.push(slot);
        }

        let accumulators = vec![ColumnAccumulator::new(); names.len()];
        Ok(Self {
            names,
            accumulators,
            slots,
        })
    }

    /// Number of header positions, including merged duplicates.
    pub fn width(&self) -> usize {
        self.slots.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Feeds one tokenized row. Missing trailing cells count as empty and
    /// cells past the header width are dropped.
    pub fn accumulate_row(&mut self, cells: &[String]) {
        for (position, &slot) in self.slots.iter().enumerate() {
            let cell = cells.get(position).map_or("", String::as_str);
            self.accumulators[slot].accumulate(cell);
        }
    }

    pub fn finalize(self) -> Vec<(String, ColumnStats)> {
        self.names
            .into_iter()
            .zip(self.accumulators.into_iter().map(ColumnAccumulator::finalize))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        header(cells)
    }

    #[test]
    fn test_empty_header_is_rejected() {
        assert!(matches!(
            ColumnSet::new(vec![], DuplicateHeaders::Merge),
            Err(StatsError::EmptyHeader)
        ));
    }

    #[test]
    fn test_short_row_pads_with_empty() {
        let mut set = ColumnSet::new(header(&["a", "b", "c"]), DuplicateHeaders::Merge).unwrap();
        set.accumulate_row(&row(&["1"]));
        let stats = set.finalize();
        assert_eq!(stats[0].1.count_numbers, 1);
        for (_, s) in &stats[1..] {
            assert_eq!(s.count_numbers, 0);
            assert_eq!(s.invalid_cells, 0);
        }
    }

    #[test]
    fn test_extra_cells_are_ignored() {
        let mut set = ColumnSet::new(header(&["a"]), DuplicateHeaders::Merge).unwrap();
        set.accumulate_row(&row(&["1", "oops", "2"]));
        let stats = set.finalize();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].1.count_numbers, 1);
        assert_eq!(stats[0].1.invalid_cells, 0);
    }

    #[test]
    fn test_duplicate_headers_merge_into_first_slot() {
        let mut set =
            ColumnSet::new(header(&["x", "y", "x"]), DuplicateHeaders::Merge).unwrap();
        assert_eq!(set.width(), 3);
        assert_eq!(set.names(), ["x", "y"]);
        set.accumulate_row(&row(&["1", "2", "5"]));
        let stats = set.finalize();
        assert_eq!(stats[0].0, "x");
        assert_eq!(stats[0].1.count_numbers, 2);
        assert_eq!(stats[0].1.min, Some(1.0));
        assert_eq!(stats[0].1.max, Some(5.0));
    }

    #[test]
    fn test_duplicate_headers_suffix_get_own_columns() {
        let mut set =
            ColumnSet::new(header(&["x", "x", "x"]), DuplicateHeaders::Suffix).unwrap();
        assert_eq!(set.names(), ["x", "x_2", "x_3"]);
        set.accumulate_row(&row(&["1", "2", "3"]));
        let stats = set.finalize();
        assert_eq!(stats[1].1.mean, Some(2.0));
        assert_eq!(stats[2].1.mean, Some(3.0));
    }

    #[test]
    fn test_suffix_avoids_real_header_names() {
        let set =
            ColumnSet::new(header(&["a", "a", "a_2"]), DuplicateHeaders::Suffix).unwrap();
        assert_eq!(set.names(), ["a", "a_3", "a_2"]);
    }
}
