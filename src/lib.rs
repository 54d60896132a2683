pub mod curve;
pub mod measure;
pub mod model;
pub mod route;
pub mod scene;
pub mod svg;

use wasm_bindgen::prelude::*;

pub use curve::{
    bezier_path, multi_segment_path, polyline_midpoint, rounded_polyline_path, self_loop_path,
    smooth_step_path, step_path, straight_path, SELF_LOOP_OFFSET,
};
pub use measure::TextMetrics;
pub use model::{EdgeKind, LoopSide, Obstacle, Point};
pub use route::{find_path, simplify, RouterConfig, RoutingGrid};
pub use scene::{Scene, SceneEdge, SceneError};
pub use svg::SvgRenderer;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Route one edge through a set of rectangular obstacles.
///
/// `obstacles` is a flat array of `x, y, width, height` quads. Returns the
/// SVG path data of the simplified route; degenerate inputs give a direct
/// line.
#[wasm_bindgen(js_name = "routeEdge")]
pub fn route_edge(
    obstacles: &js_sys::Float64Array,
    source_x: f64,
    source_y: f64,
    target_x: f64,
    target_y: f64,
) -> String {
    let values = obstacles.to_vec();
    let rects: Vec<Obstacle> = values
        .chunks_exact(4)
        .enumerate()
        .map(|(i, quad)| Obstacle {
            id: i.to_string(),
            x: quad[0],
            y: quad[1],
            width: quad[2],
            height: quad[3],
        })
        .collect();

    let grid = RoutingGrid::build(&rects);
    let start = Point::new(source_x, source_y);
    let end = Point::new(target_x, target_y);
    let path = simplify(&find_path(&grid, start, end));
    multi_segment_path(&path)
}

/// Render a scene document to SVG
#[wasm_bindgen(js_name = "sceneToSvg")]
pub fn scene_to_svg(source: &str) -> Result<String, String> {
    let scene = Scene::parse(source).map_err(|e| e.to_string())?;
    Ok(SvgRenderer::default().render(&scene))
}
