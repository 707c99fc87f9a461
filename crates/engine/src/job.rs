use crate::counter::CellCounter;
use crate::error::Result;
use crate::partition::{self, PartitionRange};
use crate::record::{Outcome, RecordParser};
use crate::scanner::RangeScanner;
use gridsent_grid::GridIndex;
use gridsent_lexicon::Lexicon;
use std::path::PathBuf;

/// One scan of one input file against fixed reference tables.
///
/// Holds shared references to the grid and lexicon plus a compiled record
/// parser; workers borrow the job and each writes a private counter, so
/// the scan phase needs no synchronization.
pub struct ScanJob<'a> {
    grid: &'a GridIndex,
    lexicon: &'a Lexicon,
    parser: RecordParser,
    input: PathBuf,
}

impl<'a> ScanJob<'a> {
    pub fn new(grid: &'a GridIndex, lexicon: &'a Lexicon, input: impl Into<PathBuf>) -> Self {
        Self {
            grid,
            lexicon,
            parser: RecordParser::new(),
            input: input.into(),
        }
    }

    /// Scan one partition range into a fresh counter.
    ///
    /// Parse failures skip the line (at most one boundary fragment per
    /// range plus whatever malformed input the file carries); IO errors
    /// mid-scan are fatal to the worker and propagate.
    pub fn run_worker(&self, range: &PartitionRange) -> Result<CellCounter> {
        let scanner = RangeScanner::open(&self.input, range)?;
        let counter = self.consume(scanner)?;
        log::debug!(
            "worker {} finished bytes {}..{} with {} records",
            range.worker_index,
            range.start,
            range.end,
            counter.grand_total()
        );
        Ok(counter)
    }

    /// Scan the whole file sequentially, no partitioning.
    pub fn run_single(&self) -> Result<CellCounter> {
        self.consume(RangeScanner::whole_file(&self.input)?)
    }

    /// Full run: plan the partitions, scan them on a scoped worker pool,
    /// and merge the per-worker counters in worker order.
    ///
    /// One worker (or a file too small to split) dispatches to the
    /// sequential whole-file path. A worker's typed error fails the run;
    /// there is no partial result for a failed worker.
    pub fn run(&self, worker_count: usize) -> Result<CellCounter> {
        let file_size = std::fs::metadata(&self.input)?.len();
        if worker_count <= 1 || file_size < worker_count as u64 {
            if worker_count > 1 {
                log::debug!(
                    "{} bytes across {} workers truncates to empty ranges, scanning sequentially",
                    file_size,
                    worker_count
                );
            }
            return self.run_single();
        }

        let ranges = partition::plan(file_size, worker_count)?;
        log::info!(
            "Scanning {} bytes with {} workers of {} bytes each",
            file_size,
            worker_count,
            ranges[0].len()
        );

        let results: Vec<Result<CellCounter>> = std::thread::scope(|scope| {
            let handles: Vec<_> = ranges
                .iter()
                .map(|range| scope.spawn(move || self.run_worker(range)))
                .collect();
            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(result) => result,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        let mut counters = Vec::with_capacity(results.len());
        for result in results {
            counters.push(result?);
        }
        Ok(CellCounter::merge(counters))
    }

    fn consume(&self, scanner: RangeScanner) -> Result<CellCounter> {
        let mut counter = CellCounter::seeded(self.grid);
        for line in scanner {
            let line = line?;
            let Outcome::Record(record) = self.parser.parse(&line) else {
                continue;
            };
            if let Some(cell) = self.grid.locate(record.x, record.y) {
                counter.record(cell, self.lexicon.score(&record.text));
            }
        }
        Ok(counter)
    }
}
