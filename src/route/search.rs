//! A* search over the routing grid.
//!
//! The grid stays read-only for the duration of a search: per-cell costs and
//! predecessor links live in scratch arrays owned by the call, so concurrent
//! searches over one grid cannot corrupt each other.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, trace};

use super::grid::RoutingGrid;
use crate::model::Point;

const DIRS: [(i64, i64); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Frontier entry ordered by lowest `f`, then by insertion sequence, so
/// equal-cost candidates pop in discovery order and routes are deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenEntry {
    f: u32,
    seq: u32,
    cell: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behavior.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a collision-avoiding route from `start` to `end`.
///
/// Total: always returns at least two points, the first and last of which are
/// the exact caller-supplied coordinates. Interior points are cell centers of
/// the grid route. Endpoints outside the grid, an exhausted frontier, or a
/// search that exceeds the grid's expansion ceiling all degrade to the direct
/// line `[start, end]`.
pub fn find_path(grid: &RoutingGrid, start: Point, end: Point) -> Vec<Point> {
    trace!(
        "find_path ({:.1},{:.1}) -> ({:.1},{:.1})",
        start.x, start.y, end.x, end.y
    );

    let (start_cell, end_cell) = match (grid.cell_at(start), grid.cell_at(end)) {
        (Some(s), Some(e)) => (s, e),
        _ => {
            debug!("endpoint outside grid bounds, using direct line");
            return vec![start, end];
        }
    };

    let start_idx = grid.index(start_cell.0, start_cell.1);
    let end_idx = grid.index(end_cell.0, end_cell.1);
    if start_idx == end_idx {
        return vec![start, end];
    }

    // Connector handles legitimately sit on a node border, so the two endpoint
    // cells count as walkable for this search even when the grid blocks them.
    // Overriding them here instead of flipping grid state keeps the grid
    // untouched on every exit path.
    let walkable = |cx: usize, cy: usize, idx: usize| {
        idx == start_idx || idx == end_idx || grid.is_walkable(cx, cy)
    };

    let cells = grid.width() * grid.height();
    let mut g = vec![u32::MAX; cells];
    let mut parent = vec![u32::MAX; cells];
    let mut closed = vec![false; cells];

    let mut open = BinaryHeap::new();
    let mut seq = 0u32;
    g[start_idx] = 0;
    open.push(OpenEntry {
        f: manhattan(start_cell, end_cell),
        seq,
        cell: start_idx,
    });

    let mut expansions = 0usize;
    while let Some(entry) = open.pop() {
        let idx = entry.cell;
        if closed[idx] {
            continue;
        }
        if idx == end_idx {
            return reconstruct(grid, &parent, end_idx, start, end);
        }
        closed[idx] = true;

        expansions += 1;
        if expansions >= grid.max_expansions {
            debug!(
                "expansion ceiling {} reached, using direct line",
                grid.max_expansions
            );
            return vec![start, end];
        }

        let cx = idx % grid.width();
        let cy = idx / grid.width();
        for (dx, dy) in DIRS {
            let nx = cx as i64 + dx;
            let ny = cy as i64 + dy;
            if nx < 0 || ny < 0 || nx >= grid.width() as i64 || ny >= grid.height() as i64 {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            let nidx = grid.index(nx, ny);
            if closed[nidx] || !walkable(nx, ny, nidx) {
                continue;
            }

            let tentative = g[idx] + 1;
            if tentative < g[nidx] {
                g[nidx] = tentative;
                parent[nidx] = idx as u32;
                seq += 1;
                open.push(OpenEntry {
                    f: tentative + manhattan((nx, ny), end_cell),
                    seq,
                    cell: nidx,
                });
            }
        }
    }

    debug!("frontier exhausted without reaching the end cell, using direct line");
    vec![start, end]
}

/// Manhattan distance in cell units: admissible and consistent for
/// 4-directional uniform-cost movement.
fn manhattan(a: (usize, usize), b: (usize, usize)) -> u32 {
    (a.0.abs_diff(b.0) + a.1.abs_diff(b.1)) as u32
}

fn reconstruct(
    grid: &RoutingGrid,
    parent: &[u32],
    end_idx: usize,
    start: Point,
    end: Point,
) -> Vec<Point> {
    let mut cells = vec![end_idx];
    let mut cur = end_idx;
    while parent[cur] != u32::MAX {
        cur = parent[cur] as usize;
        cells.push(cur);
    }
    cells.reverse();

    let mut path: Vec<Point> = cells
        .iter()
        .map(|&idx| grid.cell_center(idx % grid.width(), idx / grid.width()))
        .collect();

    // The endpoints are the caller's exact coordinates, never cell centers.
    let last = path.len() - 1;
    path[0] = start;
    path[last] = end;
    path
}
