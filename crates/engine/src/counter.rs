use gridsent_grid::GridIndex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregate for one grid cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellTally {
    pub total: u64,
    pub score: i64,
}

/// Mapping from cell name to aggregate count and summed score.
///
/// One instance per worker, written only by that worker's scan loop; the
/// merge step folds the per-worker instances into the final table. Report
/// ordering comes from the grid index, not from this map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellCounter {
    tallies: HashMap<String, CellTally>,
}

impl CellCounter {
    /// Counter with a zeroed entry for every known cell. Entries are
    /// never removed.
    #[must_use]
    pub fn seeded(grid: &GridIndex) -> Self {
        Self {
            tallies: grid
                .names()
                .map(|name| (name.to_string(), CellTally::default()))
                .collect(),
        }
    }

    /// Add one record to a known cell. A name without an entry is
    /// dropped, not stored under a sentinel bucket.
    pub fn record(&mut self, cell: &str, score: i64) {
        if let Some(tally) = self.tallies.get_mut(cell) {
            tally.total += 1;
            tally.score += score;
        }
    }

    /// Entry-wise sum of another counter into this one, creating entries
    /// on first sight.
    pub fn absorb(&mut self, other: CellCounter) {
        for (name, tally) in other.tallies {
            let entry = self.tallies.entry(name).or_default();
            entry.total += tally.total;
            entry.score += tally.score;
        }
    }

    /// Fold a sequence of counters into one final table.
    ///
    /// Commutative and associative: any grouping or ordering of the
    /// inputs produces the same result, so partial merges are safe as
    /// worker results arrive.
    #[must_use]
    pub fn merge(counters: impl IntoIterator<Item = CellCounter>) -> CellCounter {
        let mut merged = CellCounter::default();
        for counter in counters {
            merged.absorb(counter);
        }
        merged
    }

    /// Tally for one cell, zero when absent
    #[must_use]
    pub fn get(&self, cell: &str) -> CellTally {
        self.tallies.get(cell).copied().unwrap_or_default()
    }

    /// Sum of record counts across all cells
    #[must_use]
    pub fn grand_total(&self) -> u64 {
        self.tallies.values().map(|tally| tally.total).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }
}
