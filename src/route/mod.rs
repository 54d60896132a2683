//! Obstacle-aware route planning: grid construction, A* search, and
//! waypoint simplification.

mod grid;
mod search;
mod simplify;

pub use grid::{RouterConfig, RoutingGrid};
pub use search::find_path;
pub use simplify::simplify;
