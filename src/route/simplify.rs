//! Waypoint reduction for grid-aligned paths.

use crate::model::Point;

/// Collapse runs of same-direction segments into their turning points.
///
/// The first and last point always survive. Idempotent: simplifying an
/// already-simplified path returns it unchanged, and the output never has
/// more points than the input.
pub fn simplify(points: &[Point]) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut simplified = vec![points[0]];
    let mut direction = segment_direction(points[0], points[1]);

    for i in 1..points.len() - 1 {
        let next = segment_direction(points[i], points[i + 1]);
        if next != direction {
            simplified.push(points[i]);
            direction = next;
        }
    }

    simplified.push(points[points.len() - 1]);
    simplified
}

/// Unit sign-direction of a segment. Zero-length components stay zero, so
/// axis-aligned runs compare exactly.
fn segment_direction(from: Point, to: Point) -> (i8, i8) {
    (sign(to.x - from.x), sign(to.y - from.y))
}

fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_short_inputs_unchanged() {
        assert_eq!(simplify(&[]), vec![]);
        let two = pts(&[(0.0, 0.0), (10.0, 0.0)]);
        assert_eq!(simplify(&two), two);
    }

    #[test]
    fn test_straight_run_collapses() {
        let run = pts(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0)]);
        assert_eq!(simplify(&run), pts(&[(0.0, 0.0), (30.0, 0.0)]));
    }

    #[test]
    fn test_staircase_keeps_turning_points() {
        let stair = pts(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (20.0, 0.0),
            (20.0, 10.0),
            (20.0, 20.0),
            (30.0, 20.0),
        ]);
        assert_eq!(
            simplify(&stair),
            pts(&[(0.0, 0.0), (20.0, 0.0), (20.0, 20.0), (30.0, 20.0)])
        );
    }

    #[test]
    fn test_idempotent() {
        let stair = pts(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (10.0, 20.0),
            (20.0, 20.0),
        ]);
        let once = simplify(&stair);
        assert_eq!(simplify(&once), once);
        assert!(once.len() <= stair.len());
    }

    #[test]
    fn test_diagonal_run_collapses() {
        let diag = pts(&[(0.0, 0.0), (10.0, 10.0), (20.0, 20.0), (20.0, 30.0)]);
        assert_eq!(
            simplify(&diag),
            pts(&[(0.0, 0.0), (20.0, 20.0), (20.0, 30.0)])
        );
    }
}
