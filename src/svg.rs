use std::collections::HashMap;
use std::fmt::Write;

use crate::curve::{
    self, bezier_path, polyline_midpoint, rounded_polyline_path, self_loop_path,
    smooth_step_path, step_points, straight_path,
};
use crate::measure::TextMetrics;
use crate::model::{EdgeKind, Obstacle, Point};
use crate::route::{find_path, simplify, RouterConfig, RoutingGrid};
use crate::scene::{Scene, SceneEdge};

pub struct SvgRenderer {
    metrics: TextMetrics,
    router: RouterConfig,
    corner_radius: f64,
    margin: f64,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            metrics: TextMetrics::default(),
            router: RouterConfig::default(),
            corner_radius: 8.0,
            margin: 100.0,
        }
    }
}

impl SvgRenderer {
    pub fn render(&self, scene: &Scene) -> String {
        let grid = RoutingGrid::build_with(&scene.nodes, &self.router);
        let (min_x, min_y, width, height) = self.document_bounds(&scene.nodes);

        let mut svg = String::new();
        writeln!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            width, height, min_x, min_y, width, height
        )
        .unwrap();

        writeln!(
            &mut svg,
            r#"<style>
  .node {{ fill: #fff; stroke: #333; stroke-width: 1.5; }}
  .node-label {{ font-family: monospace; font-size: 14px; }}
  .edge {{ stroke: #666; stroke-width: 1.5; fill: none; }}
  .edge-label {{ font-family: monospace; font-size: 11px; fill: #666; }}
  .edge-label-bg {{ fill: #fff; opacity: 0.8; }}
</style>"#
        )
        .unwrap();

        let node_map: HashMap<&str, &Obstacle> =
            scene.nodes.iter().map(|n| (n.id.as_str(), n)).collect();

        // Edges first so node bodies cover the route stubs.
        for edge in &scene.edges {
            self.render_edge(&mut svg, edge, &node_map, &grid);
        }
        for node in &scene.nodes {
            self.render_node(&mut svg, node);
        }

        writeln!(&mut svg, "</svg>").unwrap();
        svg
    }

    fn document_bounds(&self, nodes: &[Obstacle]) -> (f64, f64, f64, f64) {
        if nodes.is_empty() {
            return (0.0, 0.0, 200.0, 200.0);
        }
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for n in nodes {
            min_x = min_x.min(n.x);
            min_y = min_y.min(n.y);
            max_x = max_x.max(n.x + n.width);
            max_y = max_y.max(n.y + n.height);
        }
        (
            min_x - self.margin,
            min_y - self.margin,
            max_x - min_x + self.margin * 2.0,
            max_y - min_y + self.margin * 2.0,
        )
    }

    fn render_node(&self, svg: &mut String, node: &Obstacle) {
        writeln!(
            svg,
            r#"<rect class="node" x="{}" y="{}" width="{}" height="{}" rx="4" />"#,
            node.x, node.y, node.width, node.height
        )
        .unwrap();

        let center = node.center();
        writeln!(
            svg,
            r#"<text class="node-label" x="{}" y="{}" text-anchor="middle">{}</text>"#,
            center.x,
            center.y + 5.0,
            escape_xml(&node.id)
        )
        .unwrap();
    }

    fn render_edge(
        &self,
        svg: &mut String,
        edge: &SceneEdge,
        node_map: &HashMap<&str, &Obstacle>,
        grid: &RoutingGrid,
    ) {
        let (Some(from), Some(to)) = (
            node_map.get(edge.from.as_str()),
            node_map.get(edge.to.as_str()),
        ) else {
            return;
        };

        let (d, label_anchor) = if edge.from == edge.to {
            let anchor = from.side_anchor(edge.loop_side);
            let d = self_loop_path(anchor, edge.loop_side, curve::SELF_LOOP_OFFSET);
            // Arc-length middle of the loop cubic: 1.5 * offset out of the side.
            let (ox, oy) = edge.loop_side.outward();
            let label_anchor = Point::new(
                anchor.x + ox * curve::SELF_LOOP_OFFSET * 1.5,
                anchor.y + oy * curve::SELF_LOOP_OFFSET * 1.5,
            );
            (d, label_anchor)
        } else {
            let source = from.facing_anchor(to.center());
            let target = to.facing_anchor(from.center());
            match edge.kind {
                EdgeKind::Straight => {
                    (straight_path(source, target), polyline_midpoint(&[source, target]))
                }
                EdgeKind::Bezier => {
                    (bezier_path(source, target), polyline_midpoint(&[source, target]))
                }
                EdgeKind::Step => {
                    let points = step_points(source, target);
                    (curve::step_path(source, target), polyline_midpoint(&points))
                }
                EdgeKind::SmoothStep => {
                    let points = step_points(source, target);
                    (
                        smooth_step_path(source, target, self.corner_radius),
                        polyline_midpoint(&points),
                    )
                }
                EdgeKind::Smart => {
                    let route = simplify(&find_path(grid, source, target));
                    (
                        rounded_polyline_path(&route, self.corner_radius),
                        polyline_midpoint(&route),
                    )
                }
            }
        };

        writeln!(svg, r#"<path class="edge" d="{}" />"#, d).unwrap();

        if let Some(label) = &edge.label {
            let (x, y, w, h) = self.metrics.label_box(label, label_anchor);
            writeln!(
                svg,
                r#"<rect class="edge-label-bg" x="{}" y="{}" width="{}" height="{}" rx="2" />"#,
                x, y, w, h
            )
            .unwrap();
            writeln!(
                svg,
                r#"<text class="edge-label" x="{}" y="{}" text-anchor="middle">{}</text>"#,
                label_anchor.x,
                label_anchor.y + 4.0,
                escape_xml(label)
            )
            .unwrap();
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic() {
        let scene = Scene::parse(
            "node api 0 0 140 60\n\
             node db 320 200 140 60\n\
             edge api db smart \"reads\"",
        )
        .unwrap();
        let svg = SvgRenderer::default().render(&scene);

        assert!(svg.contains("<svg"));
        assert!(svg.contains(r#"class="edge""#));
        assert!(svg.contains("api"));
        assert!(svg.contains("reads"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_render_self_loop() {
        let scene = Scene::parse(
            "node a 0 0 100 60\n\
             edge a a loop right",
        )
        .unwrap();
        let svg = SvgRenderer::default().render(&scene);
        // Self-loops render as a single cubic command.
        assert!(svg.contains(" C "));
    }

    #[test]
    fn test_render_empty_scene() {
        let svg = SvgRenderer::default().render(&Scene::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_render_escapes_labels() {
        let scene = Scene::parse(
            "node a 0 0 100 60\n\
             node b 300 0 100 60\n\
             edge a b straight \"a < b\"",
        )
        .unwrap();
        let svg = SvgRenderer::default().render(&scene);
        assert!(svg.contains("a &lt; b"));
        assert!(!svg.contains("a < b"));
    }
}
