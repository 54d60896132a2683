//! Drawable curve generation.
//!
//! Every function is total and returns SVG path data; the renderer decides
//! stroke, markers, and styling. Degenerate inputs produce degenerate but
//! renderable output, never an error.

use std::fmt::Write;

use crate::model::{LoopSide, Point};

/// Default self-loop size in world units.
pub const SELF_LOOP_OFFSET: f64 = 30.0;

/// Direct two-point line.
pub fn straight_path(source: Point, target: Point) -> String {
    format!("M {},{} L {},{}", source.x, source.y, target.x, target.y)
}

/// One cubic segment with horizontal tangents at both ends.
///
/// Both control points sit at the horizontal midpoint, each on its own
/// endpoint's Y. That gives the flat S-curve look; the asymmetry against a
/// geometrically symmetric bezier is the intended style.
pub fn bezier_path(source: Point, target: Point) -> String {
    let mid_x = (source.x + target.x) / 2.0;
    format!(
        "M {},{} C {},{} {},{} {},{}",
        source.x, source.y, mid_x, source.y, mid_x, target.y, target.x, target.y
    )
}

/// Three orthogonal segments through the vertical midpoint.
pub fn step_path(source: Point, target: Point) -> String {
    multi_segment_path(&step_points(source, target))
}

/// The step route with every corner rounded by a quadratic segment.
pub fn smooth_step_path(source: Point, target: Point, radius: f64) -> String {
    rounded_polyline_path(&step_points(source, target), radius)
}

/// Waypoints of the orthogonal step route.
pub fn step_points(source: Point, target: Point) -> [Point; 4] {
    let mid_y = (source.y + target.y) / 2.0;
    [
        source,
        Point::new(source.x, mid_y),
        Point::new(target.x, mid_y),
        target,
    ]
}

/// Cubic loop anchored at a single point, exiting through the given side.
///
/// The loop extends `2 * offset` perpendicular to the exit side.
pub fn self_loop_path(anchor: Point, side: LoopSide, offset: f64) -> String {
    let Point { x, y } = anchor;
    let o = offset;
    let (c1, c2) = match side {
        LoopSide::Top => ((x - o, y - o * 2.0), (x + o, y - o * 2.0)),
        LoopSide::Right => ((x + o * 2.0, y - o), (x + o * 2.0, y + o)),
        LoopSide::Bottom => ((x + o, y + o * 2.0), (x - o, y + o * 2.0)),
        LoopSide::Left => ((x - o * 2.0, y + o), (x - o * 2.0, y - o)),
    };
    format!(
        "M {},{} C {},{} {},{} {},{}",
        x, y, c1.0, c1.1, c2.0, c2.1, x, y
    )
}

/// Connected polyline through every point, in order. Empty input yields an
/// empty descriptor.
pub fn multi_segment_path(points: &[Point]) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            write!(d, "M {},{}", p.x, p.y).unwrap();
        } else {
            write!(d, " L {},{}", p.x, p.y).unwrap();
        }
    }
    d
}

/// Connected polyline with each turn rounded by a quadratic corner.
///
/// The corner radius clamps to half the shorter adjacent segment so
/// neighboring corners cannot overlap.
pub fn rounded_polyline_path(points: &[Point], radius: f64) -> String {
    if points.len() < 3 || radius <= 0.0 {
        return multi_segment_path(points);
    }

    let mut d = format!("M {},{}", points[0].x, points[0].y);
    for i in 1..points.len() - 1 {
        let prev = points[i - 1];
        let corner = points[i];
        let next = points[i + 1];

        let len_in = prev.distance(&corner);
        let len_out = corner.distance(&next);
        if len_in == 0.0 || len_out == 0.0 {
            write!(d, " L {},{}", corner.x, corner.y).unwrap();
            continue;
        }

        let r = radius.min(len_in / 2.0).min(len_out / 2.0);
        let entry = lerp(corner, prev, r / len_in);
        let exit = lerp(corner, next, r / len_out);
        write!(
            d,
            " L {},{} Q {},{} {},{}",
            entry.x, entry.y, corner.x, corner.y, exit.x, exit.y
        )
        .unwrap();
    }
    let last = points[points.len() - 1];
    write!(d, " L {},{}", last.x, last.y).unwrap();
    d
}

/// Point halfway along the polyline by arc length. Labels placed here sit on
/// the visual middle of multi-segment routes, not the middle of the point
/// list.
pub fn polyline_midpoint(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::new(0.0, 0.0);
    }
    if points.len() == 1 {
        return points[0];
    }

    let total: f64 = points.windows(2).map(|w| w[0].distance(&w[1])).sum();
    if total == 0.0 {
        return points[0];
    }

    let mut remaining = total / 2.0;
    for w in points.windows(2) {
        let len = w[0].distance(&w[1]);
        if len > 0.0 && remaining <= len {
            return lerp(w[0], w[1], remaining / len);
        }
        remaining -= len;
    }
    points[points.len() - 1]
}

fn lerp(from: Point, to: Point, t: f64) -> Point {
    Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight() {
        let d = straight_path(Point::new(0.0, 0.0), Point::new(10.0, 5.0));
        assert_eq!(d, "M 0,0 L 10,5");
    }

    #[test]
    fn test_bezier_control_points() {
        let d = bezier_path(Point::new(0.0, 0.0), Point::new(100.0, 40.0));
        assert_eq!(d, "M 0,0 C 50,0 50,40 100,40");
    }

    #[test]
    fn test_step_through_vertical_midpoint() {
        let d = step_path(Point::new(0.0, 0.0), Point::new(100.0, 40.0));
        assert_eq!(d, "M 0,0 L 0,20 L 100,20 L 100,40");
    }

    #[test]
    fn test_self_loop_right() {
        let d = self_loop_path(Point::new(0.0, 0.0), LoopSide::Right, 30.0);
        assert_eq!(d, "M 0,0 C 60,-30 60,30 0,0");
    }

    #[test]
    fn test_self_loop_top() {
        let d = self_loop_path(Point::new(10.0, 10.0), LoopSide::Top, 30.0);
        assert_eq!(d, "M 10,10 C -20,-50 40,-50 10,10");
    }

    #[test]
    fn test_multi_segment_empty() {
        assert_eq!(multi_segment_path(&[]), "");
    }

    #[test]
    fn test_multi_segment() {
        let d = multi_segment_path(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ]);
        assert_eq!(d, "M 0,0 L 10,0 L 10,10");
    }

    #[test]
    fn test_rounded_polyline_zero_radius() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
        assert_eq!(rounded_polyline_path(&points, 0.0), multi_segment_path(&points));
    }

    #[test]
    fn test_rounded_polyline_corner() {
        let points = [Point::new(0.0, 0.0), Point::new(20.0, 0.0), Point::new(20.0, 20.0)];
        let d = rounded_polyline_path(&points, 5.0);
        assert_eq!(d, "M 0,0 L 15,0 Q 20,0 20,5 L 20,20");
    }

    #[test]
    fn test_smooth_step_has_rounded_corners() {
        let d = smooth_step_path(Point::new(0.0, 0.0), Point::new(100.0, 40.0), 5.0);
        assert!(d.contains('Q'));
        assert!(d.starts_with("M 0,0"));
        assert!(d.ends_with("L 100,40"));
    }

    #[test]
    fn test_midpoint_single_segment() {
        let mid = polyline_midpoint(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
        assert_eq!(mid, Point::new(5.0, 0.0));
    }

    #[test]
    fn test_midpoint_two_segments() {
        let mid = polyline_midpoint(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ]);
        assert_eq!(mid, Point::new(10.0, 0.0));
    }

    #[test]
    fn test_midpoint_degenerate() {
        assert_eq!(polyline_midpoint(&[]), Point::new(0.0, 0.0));
        assert_eq!(polyline_midpoint(&[Point::new(3.0, 4.0)]), Point::new(3.0, 4.0));
        // Coincident points have zero total length.
        assert_eq!(
            polyline_midpoint(&[Point::new(3.0, 4.0), Point::new(3.0, 4.0)]),
            Point::new(3.0, 4.0)
        );
    }
}
