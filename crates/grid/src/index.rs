use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A named axis-aligned rectangle, immutable after load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub name: String,
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl GridCell {
    /// Containment test with inclusive bounds on all four edges
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.xmin <= x && x <= self.xmax && self.ymin <= y && y <= self.ymax
    }
}

/// Ordered list of grid cells, preserving load order.
///
/// Load order is the lookup precedence: `locate` returns the first cell
/// containing the point. It is also the row order of the final report.
pub struct GridIndex {
    cells: Vec<GridCell>,
}

impl GridIndex {
    /// Build an index from already-parsed cells.
    ///
    /// Fails with [`GridError::Empty`] when no cells are given.
    pub fn new(cells: Vec<GridCell>) -> Result<Self> {
        if cells.is_empty() {
            return Err(GridError::Empty);
        }
        Ok(Self { cells })
    }

    /// Load a grid definition: a JSON document with a top-level `features`
    /// array whose entries carry `properties` with an `id` plus
    /// `xmin`/`xmax`/`ymin`/`ymax` bounds as numbers or numeric strings.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw: Value = serde_json::from_reader(BufReader::new(File::open(path)?))?;

        let features = raw
            .get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                GridError::InvalidFeature("top-level \"features\" array is missing".to_string())
            })?;

        let mut cells = Vec::with_capacity(features.len());
        for feature in features {
            let properties = feature.get("properties").ok_or_else(|| {
                GridError::InvalidFeature("feature without \"properties\"".to_string())
            })?;
            let name = properties
                .get("id")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    GridError::InvalidFeature("feature without a string \"id\"".to_string())
                })?
                .to_string();
            cells.push(GridCell {
                xmin: bound(properties, "xmin", &name)?,
                xmax: bound(properties, "xmax", &name)?,
                ymin: bound(properties, "ymin", &name)?,
                ymax: bound(properties, "ymax", &name)?,
                name,
            });
        }

        let index = Self::new(cells)?;
        log::info!("Loaded {} grid cells from {}", index.len(), path.display());
        Ok(index)
    }

    /// Name of the first cell containing the point, in load order
    #[must_use]
    pub fn locate(&self, x: f64, y: f64) -> Option<&str> {
        self.cells
            .iter()
            .find(|cell| cell.contains(x, y))
            .map(|cell| cell.name.as_str())
    }

    /// Cells in load order
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter()
    }

    /// Cell names in load order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|cell| cell.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// One bound of a cell rectangle, accepting numbers and numeric strings
fn bound(properties: &Value, key: &str, cell: &str) -> Result<f64> {
    let value = properties.get(key).ok_or_else(|| {
        GridError::InvalidFeature(format!("cell {cell}: missing bound {key:?}"))
    })?;
    match value {
        Value::Number(number) => number.as_f64().ok_or_else(|| {
            GridError::InvalidFeature(format!("cell {cell}: bound {key}={number} overflows f64"))
        }),
        Value::String(text) => text.trim().parse().map_err(|_| {
            GridError::InvalidFeature(format!("cell {cell}: bound {key}={text:?} is not a number"))
        }),
        _ => Err(GridError::InvalidFeature(format!(
            "cell {cell}: bound {key} is neither a number nor a string"
        ))),
    }
}
