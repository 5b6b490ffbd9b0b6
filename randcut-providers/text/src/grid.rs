//! Occupancy grids where open cells link to their open neighbours.

use std::io::BufRead;

use randcut_core::{EdgeId, Graph, NodeId};

use crate::errors::GridError;

const OPEN: char = '.';
const WALL: char = '#';

/// Graph built from an ASCII occupancy mask.
///
/// Each character is one cell: `.` is open and `#` is a wall. Every cell is
/// a node numbered `x + y * width`, walls included, so node ids line up with
/// the mask. Each pair of horizontally or vertically adjacent open cells is
/// joined by two directed edges, one per direction. Blank lines are ignored
/// and trailing carriage returns are stripped.
///
/// # Examples
/// ```
/// use randcut_core::Graph;
/// use randcut_providers_text::GridGraph;
///
/// let grid = GridGraph::parse("corridor", "...\n#.#\n")?;
/// assert_eq!((grid.width(), grid.height()), (3, 2));
/// assert_eq!(grid.node_count(), 6);
/// // Two horizontal pairs and one vertical pair, each in both directions.
/// assert_eq!(grid.edge_count(), 6);
/// assert!(!grid.is_open(grid.node_at(0, 1)));
/// # Ok::<(), randcut_providers_text::GridError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridGraph {
    name: String,
    width: usize,
    height: usize,
    open: Vec<bool>,
    edges: Vec<(NodeId, NodeId)>,
}

impl GridGraph {
    /// Weight carried by every grid edge.
    pub const EDGE_WEIGHT: f64 = 1.0;

    /// Parses a mask held in memory.
    ///
    /// # Errors
    /// Returns [`GridError`] when rows differ in width, a cell is neither
    /// `.` nor `#`, or the input holds no rows.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, GridError> {
        let mut rows = RowCollector::default();
        for line in text.lines() {
            rows.push(line)?;
        }
        rows.finish(name.into())
    }

    /// Parses a mask from a buffered reader.
    ///
    /// # Errors
    /// Returns [`GridError::Io`] when reading fails, otherwise the same errors
    /// as [`Self::parse`].
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, GridError> {
        let mut rows = RowCollector::default();
        for line in reader.lines() {
            rows.push(&line?)?;
        }
        rows.finish(name.into())
    }

    /// Returns the grid's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of cells per row.
    #[must_use]
    #[rustfmt::skip]
    pub fn width(&self) -> usize { self.width }

    /// Number of rows.
    #[must_use]
    #[rustfmt::skip]
    pub fn height(&self) -> usize { self.height }

    /// Returns the node id of the cell at column `x`, row `y`.
    ///
    /// # Panics
    /// Panics when the coordinates fall outside the grid.
    #[must_use]
    pub fn node_at(&self, x: usize, y: usize) -> NodeId {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) is outside a {}x{} grid",
            self.width,
            self.height,
        );
        x + y * self.width
    }

    /// Reports whether `node` is an open cell. Out-of-range ids are closed.
    #[must_use]
    pub fn is_open(&self, node: NodeId) -> bool {
        self.open.get(node).copied().unwrap_or(false)
    }
}

impl Graph for GridGraph {
    fn node_count(&self) -> usize {
        self.open.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn node_a(&self, edge: EdgeId) -> NodeId {
        self.edges[edge].0
    }

    fn node_b(&self, edge: EdgeId) -> NodeId {
        self.edges[edge].1
    }
}

#[derive(Default)]
struct RowCollector {
    width: Option<usize>,
    height: usize,
    open: Vec<bool>,
}

impl RowCollector {
    fn push(&mut self, raw: &str) -> Result<(), GridError> {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.is_empty() {
            return Ok(());
        }
        let row = self.height + 1;
        let start = self.open.len();
        for (index, cell) in line.chars().enumerate() {
            let open = match cell {
                OPEN => true,
                WALL => false,
                other => {
                    return Err(GridError::UnknownCell {
                        row,
                        column: index + 1,
                        cell: other,
                    });
                }
            };
            self.open.push(open);
        }
        let found = self.open.len() - start;
        let expected = *self.width.get_or_insert(found);
        if found != expected {
            return Err(GridError::RaggedRow {
                row,
                expected,
                found,
            });
        }
        self.height = row;
        Ok(())
    }

    fn finish(self, name: String) -> Result<GridGraph, GridError> {
        let Some(width) = self.width else {
            return Err(GridError::EmptyInput);
        };
        let edges = link_open_cells(&self.open, width, self.height);
        Ok(GridGraph {
            name,
            width,
            height: self.height,
            open: self.open,
            edges,
        })
    }
}

fn link_open_cells(open: &[bool], width: usize, height: usize) -> Vec<(NodeId, NodeId)> {
    let mut edges = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let node = x + y * width;
            if !open[node] {
                continue;
            }
            if x + 1 < width && open[node + 1] {
                edges.push((node, node + 1));
                edges.push((node + 1, node));
            }
            if y + 1 < height && open[node + width] {
                edges.push((node, node + width));
                edges.push((node + width, node));
            }
        }
    }
    edges
}
