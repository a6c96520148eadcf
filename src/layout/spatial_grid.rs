// Spatial hash grid for overlap detection.
//
// Placed rects are bucketed into square cells so a candidate only has to be tested
// against rects in the cells it touches. Answers match a linear scan exactly.

use std::collections::{HashMap, HashSet};

use super::{Rect, Viewport};

/// Cells per viewport side when sizing the grid from a viewport.
const CELLS_PER_SIDE: f64 = 16.0;

/// A spatial hash grid of placed rectangles.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    /// Size of each cell in the grid.
    cell_size: f64,
    /// Every inserted rect, in insertion order.
    rects: Vec<Rect>,
    /// Map from cell coordinates to indices into `rects`.
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl SpatialGrid {
    /// Create a new spatial grid with the given cell size.
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size: cell_size.max(1.0), // Avoid division by zero
            rects: Vec::new(),
            cells: HashMap::new(),
        }
    }

    pub fn for_viewport(viewport: Viewport) -> Self {
        Self::new(viewport.width.max(viewport.height) / CELLS_PER_SIDE)
    }

    fn cell_of(&self, v: f64) -> i64 {
        (v / self.cell_size).floor() as i64
    }

    /// Compute which cells a rectangle touches (edges included).
    fn cell_range(&self, rect: &Rect) -> Vec<(i64, i64)> {
        let min_x = self.cell_of(rect.x);
        let max_x = self.cell_of(rect.right());
        let min_y = self.cell_of(rect.y);
        let max_y = self.cell_of(rect.bottom());

        let mut cells = Vec::new();
        for cx in min_x..=max_x {
            for cy in min_y..=max_y {
                cells.push((cx, cy));
            }
        }
        cells
    }

    /// Insert a rectangle into the grid.
    pub fn insert(&mut self, rect: Rect) {
        let idx = self.rects.len();
        self.rects.push(rect);
        for cell in self.cell_range(&rect) {
            self.cells.entry(cell).or_default().push(idx);
        }
    }

    /// Rects that might lie within `margin` of `rect`.
    /// May include false positives; caller should do the exact test.
    pub fn query(&self, rect: &Rect, margin: f64) -> Vec<Rect> {
        let mut result = Vec::new();
        let mut seen = HashSet::new();

        for cell in self.cell_range(&rect.inflate(margin)) {
            if let Some(indices) = self.cells.get(&cell) {
                for &idx in indices {
                    if seen.insert(idx) {
                        result.push(self.rects[idx]);
                    }
                }
            }
        }
        result
    }

    /// Check if `rect` comes within `margin` of any placed rectangle.
    pub fn collides_any(&self, rect: &Rect, margin: f64) -> bool {
        self.query(rect, margin)
            .iter()
            .any(|placed| rect.collides(placed, margin))
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}
