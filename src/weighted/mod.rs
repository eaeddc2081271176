//! Cumulative-weight selection over labelled tables.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One row of a weighted table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedEntry<T> {
    pub label: T,
    pub weight: u32,
}

impl<T> WeightedEntry<T> {
    pub fn new(label: T, weight: u32) -> Self {
        Self { label, weight }
    }
}

/// Sum of all weights. Zero means the table cannot be selected from.
pub fn total_weight<T>(entries: &[WeightedEntry<T>]) -> u64 {
    entries.iter().map(|e| e.weight as u64).sum()
}

/// Return the first entry whose cumulative weight exceeds `draw`.
///
/// `draw` is expected in `[0, total_weight)`; anything at or past the end
/// lands on the last entry.
pub fn select_weighted<T>(entries: &[WeightedEntry<T>], draw: u64) -> EngineResult<&T> {
    let Some(last) = entries.last() else {
        return Err(EngineError::Generation("weighted table is empty".into()));
    };
    if total_weight(entries) == 0 {
        return Err(EngineError::Generation(
            "weighted table has zero total weight".into(),
        ));
    }

    let mut accumulated = 0u64;
    for entry in entries {
        accumulated += entry.weight as u64;
        if draw < accumulated {
            return Ok(&entry.label);
        }
    }
    Ok(&last.label)
}

/// Named weighted table, as stored in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedTable {
    pub name: String,
    pub entries: Vec<WeightedEntry<String>>,
}

impl WeightedTable {
    pub fn new(name: &str, entries: &[(&str, u32)]) -> Self {
        Self {
            name: name.to_string(),
            entries: entries
                .iter()
                .map(|(label, weight)| WeightedEntry::new(label.to_string(), *weight))
                .collect(),
        }
    }

    pub fn total_weight(&self) -> u64 {
        total_weight(&self.entries)
    }

    pub fn select(&self, draw: u64) -> EngineResult<&str> {
        select_weighted(&self.entries, draw)
            .map(String::as_str)
            .map_err(|e| match e {
                EngineError::Generation(msg) => {
                    EngineError::Generation(format!("{}: {msg}", self.name))
                }
                other => other,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots() -> WeightedTable {
        WeightedTable::new("slot", &[("head", 2), ("body", 5), ("ring", 3)])
    }

    #[test]
    fn test_cumulative_boundaries() {
        let table = slots();
        assert_eq!(table.select(0).unwrap(), "head");
        assert_eq!(table.select(1).unwrap(), "head");
        assert_eq!(table.select(2).unwrap(), "body");
        assert_eq!(table.select(6).unwrap(), "body");
        assert_eq!(table.select(7).unwrap(), "ring");
        assert_eq!(table.select(9).unwrap(), "ring");
    }

    #[test]
    fn test_out_of_range_draw_falls_back_to_last() {
        assert_eq!(slots().select(10_000).unwrap(), "ring");
    }

    #[test]
    fn test_monotonic_in_draw() {
        let table = slots();
        let index_of = |label: &str| table.entries.iter().position(|e| e.label == label);
        let mut previous = 0;
        for draw in 0..table.total_weight() {
            let idx = index_of(table.select(draw).unwrap()).unwrap();
            assert!(idx >= previous);
            previous = idx;
        }
    }

    #[test]
    fn test_exact_proportions_over_full_range() {
        let table = slots();
        let mut body = 0;
        for draw in 0..table.total_weight() {
            if table.select(draw).unwrap() == "body" {
                body += 1;
            }
        }
        assert_eq!(body, 5);
    }

    #[test]
    fn test_zero_weight_entries_never_selected() {
        let table = WeightedTable::new("t", &[("never", 0), ("always", 4)]);
        for draw in 0..4 {
            assert_eq!(table.select(draw).unwrap(), "always");
        }
    }

    #[test]
    fn test_empty_and_zero_total_rejected() {
        let empty = WeightedTable::new("empty", &[]);
        assert!(matches!(empty.select(0), Err(EngineError::Generation(_))));

        let zero = WeightedTable::new("zero", &[("a", 0)]);
        let err = zero.select(0).unwrap_err();
        assert!(err.to_string().contains("zero"));
    }
}
