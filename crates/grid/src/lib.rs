//! Geographic grid for Gridsent.
//!
//! Loads the grid-definition JSON into an ordered list of named
//! axis-aligned rectangles and answers point-to-cell lookups. Cells keep
//! their file order; a point matching several overlapping cells resolves
//! to the first one loaded.

mod error;
mod index;

pub use error::{GridError, Result};
pub use index::{GridCell, GridIndex};
