//! Walkability grid construction from an obstacle set.

use crate::model::{Obstacle, Point};

/// Routing parameters.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Side length of one grid cell in world units.
    pub cell_size: f64,
    /// Extra space kept around the obstacle bounding box.
    pub padding: f64,
    /// Upper bound on A* expansions before a search degrades to a direct line.
    pub max_expansions: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            cell_size: 20.0,
            padding: 100.0,
            max_expansions: 100_000,
        }
    }
}

/// Discretized walkable/blocked map of the obstacle area.
///
/// Cell topology is fixed at construction and searches never mutate it, so
/// one grid can serve any number of concurrent `find_path` calls. Rebuilding
/// after a layout change means constructing a new grid.
#[derive(Debug, Clone)]
pub struct RoutingGrid {
    cell_size: f64,
    min_x: f64,
    min_y: f64,
    width: usize,
    height: usize,
    walkable: Vec<bool>,
    pub(crate) max_expansions: usize,
}

impl RoutingGrid {
    /// Build a grid from an obstacle set with default parameters.
    pub fn build(obstacles: &[Obstacle]) -> Self {
        Self::build_with(obstacles, &RouterConfig::default())
    }

    /// Build a grid with explicit parameters.
    ///
    /// An empty obstacle set yields a zero-size grid; every search over it
    /// falls back to the direct line.
    pub fn build_with(obstacles: &[Obstacle], config: &RouterConfig) -> Self {
        let cell = config.cell_size;

        if obstacles.is_empty() {
            return Self {
                cell_size: cell,
                min_x: 0.0,
                min_y: 0.0,
                width: 0,
                height: 0,
                walkable: Vec::new(),
                max_expansions: config.max_expansions,
            };
        }

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for ob in obstacles {
            min_x = min_x.min(ob.x);
            min_y = min_y.min(ob.y);
            max_x = max_x.max(ob.x + ob.width);
            max_y = max_y.max(ob.y + ob.height);
        }

        // Snap the padded bounds outward to cell multiples so obstacle-adjacent
        // cells are never clipped by the grid border.
        let min_x = ((min_x - config.padding) / cell).floor() * cell;
        let min_y = ((min_y - config.padding) / cell).floor() * cell;
        let max_x = ((max_x + config.padding) / cell).ceil() * cell;
        let max_y = ((max_y + config.padding) / cell).ceil() * cell;

        let width = ((max_x - min_x) / cell).ceil() as usize;
        let height = ((max_y - min_y) / cell).ceil() as usize;

        let mut walkable = vec![true; width * height];
        for ob in obstacles {
            // Floor on the leading edge, ceil on the trailing edge: an obstacle
            // over-blocks at most one cell per side, which rules out diagonal
            // squeeze-through between touching rectangles.
            let cx0 = ((ob.x - min_x) / cell).floor() as i64;
            let cy0 = ((ob.y - min_y) / cell).floor() as i64;
            let cx1 = ((ob.x + ob.width - min_x) / cell).ceil() as i64;
            let cy1 = ((ob.y + ob.height - min_y) / cell).ceil() as i64;

            for cy in cy0.max(0)..cy1.min(height as i64) {
                for cx in cx0.max(0)..cx1.min(width as i64) {
                    walkable[cy as usize * width + cx as usize] = false;
                }
            }
        }

        Self {
            cell_size: cell,
            min_x,
            min_y,
            width,
            height,
            walkable,
            max_expansions: config.max_expansions,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Grid coordinates of the cell containing `p`, or `None` outside the grid.
    pub fn cell_at(&self, p: Point) -> Option<(usize, usize)> {
        let cx = ((p.x - self.min_x) / self.cell_size).floor();
        let cy = ((p.y - self.min_y) / self.cell_size).floor();
        if cx < 0.0 || cy < 0.0 || cx >= self.width as f64 || cy >= self.height as f64 {
            return None;
        }
        Some((cx as usize, cy as usize))
    }

    pub fn is_walkable(&self, cx: usize, cy: usize) -> bool {
        self.walkable[cy * self.width + cx]
    }

    /// World-space center of a cell.
    pub fn cell_center(&self, cx: usize, cy: usize) -> Point {
        Point::new(
            cx as f64 * self.cell_size + self.min_x + self.cell_size / 2.0,
            cy as f64 * self.cell_size + self.min_y + self.cell_size / 2.0,
        )
    }

    pub(crate) fn index(&self, cx: usize, cy: usize) -> usize {
        cy * self.width + cx
    }
}
