/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct used as the near-linear
 * alternative to testing every particle pair for a link. Render positions are
 * bucketed into square cells as wide as the link distance, so any pair closer
 * than that distance sits in the same or an adjacent cell.
 *
 * Positions outside the covered area are clamped into the border cells. The
 * clamp never pulls two points further apart, so no close pair is missed.
 */

use nannou::prelude::*;

pub struct SpatialGrid {
    pub cell_size: f32,
    pub origin: Vec2,
    pub columns: usize,
    pub rows: usize,
    pub grid: Vec<Vec<usize>>,
}

impl SpatialGrid {
    // Cover the rectangle [origin, origin + extent] with cells of `cell_size`
    pub fn new(cell_size: f32, origin: Vec2, extent: Vec2) -> Self {
        let (cell_size, columns, rows) = layout(cell_size, extent);

        Self {
            cell_size,
            origin,
            columns,
            rows,
            grid: vec![Vec::new(); columns * rows],
        }
    }

    // Does this grid still fit the requested layout?
    pub fn matches(&self, cell_size: f32, origin: Vec2, extent: Vec2) -> bool {
        (self.cell_size, self.columns, self.rows) == layout(cell_size, extent) && self.origin == origin
    }

    #[inline]
    fn cell_coords(&self, pos: Vec2) -> (usize, usize) {
        let local = (pos - self.origin) / self.cell_size;
        let x = local.x.floor().clamp(0.0, self.columns as f32 - 1.0) as usize;
        let y = local.y.floor().clamp(0.0, self.rows as f32 - 1.0) as usize;
        (x, y)
    }

    pub fn clear(&mut self) {
        for cell in &mut self.grid {
            cell.clear();
        }
    }

    #[inline]
    pub fn insert(&mut self, index: usize, pos: Vec2) {
        let (x, y) = self.cell_coords(pos);
        self.grid[y * self.columns + x].push(index);
    }

    pub fn rebuild(&mut self, positions: &[Vec2]) {
        self.clear();
        for (i, &pos) in positions.iter().enumerate() {
            self.insert(i, pos);
        }
    }

    /// Visit every unordered candidate pair `(i, j)` with `i < j` whose cells
    /// touch. Each pair is visited exactly once.
    pub fn for_each_candidate_pair<F: FnMut(usize, usize)>(&self, positions: &[Vec2], mut visit: F) {
        for (i, &pos) in positions.iter().enumerate() {
            let (cx, cy) = self.cell_coords(pos);

            let min_x = cx.saturating_sub(1);
            let max_x = (cx + 1).min(self.columns - 1);
            let min_y = cy.saturating_sub(1);
            let max_y = (cy + 1).min(self.rows - 1);

            for y in min_y..=max_y {
                let row = y * self.columns;
                for x in min_x..=max_x {
                    for &j in &self.grid[row + x] {
                        if j > i {
                            visit(i, j);
                        }
                    }
                }
            }
        }
    }
}

// Cell size (at least one unit) and the whole-cell column/row counts
fn layout(cell_size: f32, extent: Vec2) -> (f32, usize, usize) {
    let cell_size = cell_size.max(1.0);
    let columns = ((extent.x / cell_size).ceil() as usize).max(1);
    let rows = ((extent.y / cell_size).ceil() as usize).max(1);
    (cell_size, columns, rows)
}
