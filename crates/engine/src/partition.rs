use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Byte span of the input file assigned to one worker.
///
/// Computed once per run by the orchestrator and handed to workers;
/// workers never recompute ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionRange {
    pub start: u64,
    pub end: u64,
    pub worker_index: usize,
}

impl PartitionRange {
    /// Width of the range in bytes
    #[must_use]
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Split `file_size` bytes into `worker_count` contiguous ranges of
/// `file_size / worker_count` bytes each.
///
/// Integer division truncates: when the file size is not a multiple of
/// the worker count, the last range ends at `worker_count * block` and
/// the trailing remainder bytes belong to no range, so lines starting
/// there are never scanned.
pub fn plan(file_size: u64, worker_count: usize) -> Result<Vec<PartitionRange>> {
    if worker_count == 0 {
        return Err(EngineError::NoWorkers);
    }
    let block = file_size / worker_count as u64;
    Ok((0..worker_count as u64)
        .map(|index| PartitionRange {
            start: index * block,
            end: (index + 1) * block,
            worker_index: index as usize,
        })
        .collect())
}
