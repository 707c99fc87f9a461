//! Scan engine for Gridsent.
//!
//! The core pipeline over a line-delimited record file:
//!
//! ```text
//! file size ──> partition::plan ──> one PartitionRange per worker
//!                                         │
//!                              RangeScanner (owned lines only)
//!                                         │
//!                              RecordParser ──> {locate, score}
//!                                         │
//!                              CellCounter (private per worker)
//!                                         │
//!                 collected ──> CellCounter::merge ──> final table
//! ```
//!
//! Line ownership is by start offset: a line belongs to the range holding
//! its first byte, so N workers can scan the same file with no line
//! duplicated or dropped across ranges.

mod counter;
mod error;
mod job;
pub mod partition;
mod record;
mod scanner;

pub use counter::{CellCounter, CellTally};
pub use error::{EngineError, Result};
pub use job::ScanJob;
pub use partition::PartitionRange;
pub use record::{Outcome, Record, RecordParser};
pub use scanner::RangeScanner;
