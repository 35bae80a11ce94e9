#[cfg(test)]
#[path = "../../tests/unit/utils/geometry_test.rs"]
mod geometry_test;

use crate::utils::compare_floats;

/// A point in the machine working plane, in mm.
pub type Point = (f64, f64);

/// Calculates the Euclidean distance between two points.
pub fn euclidean_distance(a: Point, b: Point) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

/// A minimum-area enclosing rectangle of a point set, possibly rotated.
pub struct RotatedRect {
    /// Unit direction of one rectangle side.
    axis: Point,
    /// Extents of the point set projected onto the axis.
    u_range: (f64, f64),
    /// Extents of the point set projected onto the axis normal.
    v_range: (f64, f64),
}

impl RotatedRect {
    /// Checks whether the point lies strictly inside the rectangle. Points on
    /// the boundary are considered outside.
    pub fn contains(&self, point: Point) -> bool {
        let (ux, uy) = self.axis;
        let u = point.0 * ux + point.1 * uy;
        let v = -point.0 * uy + point.1 * ux;

        u > self.u_range.0 && u < self.u_range.1 && v > self.v_range.0 && v < self.v_range.1
    }
}

/// Computes the minimum rotated rectangle spanning the given points using
/// rotating calipers over their convex hull. Returns `None` for a degenerate
/// point set (fewer than three non-collinear points): such a rectangle has
/// zero area and cannot strictly contain anything.
pub fn minimum_rotated_rect(points: &[Point]) -> Option<RotatedRect> {
    let hull = convex_hull(points);
    if hull.len() < 3 {
        return None;
    }

    let mut best: Option<(f64, RotatedRect)> = None;
    for (idx, &(x0, y0)) in hull.iter().enumerate() {
        let (x1, y1) = hull[(idx + 1) % hull.len()];
        let length = euclidean_distance((x0, y0), (x1, y1));
        if length == 0. {
            continue;
        }
        let axis = ((x1 - x0) / length, (y1 - y0) / length);

        let mut u_range = (f64::MAX, f64::MIN);
        let mut v_range = (f64::MAX, f64::MIN);
        for &(px, py) in hull.iter() {
            let u = px * axis.0 + py * axis.1;
            let v = -px * axis.1 + py * axis.0;
            u_range = (u_range.0.min(u), u_range.1.max(u));
            v_range = (v_range.0.min(v), v_range.1.max(v));
        }

        let area = (u_range.1 - u_range.0) * (v_range.1 - v_range.0);
        let is_better = best.as_ref().map_or(true, |(best_area, _)| area < *best_area);
        if is_better {
            best = Some((area, RotatedRect { axis, u_range, v_range }));
        }
    }

    best.map(|(_, rect)| rect)
}

/// Monotone chain convex hull in counter-clockwise order. Collinear points
/// are dropped.
fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| compare_floats(a.0, b.0).then(compare_floats(a.1, b.1)));
    sorted.dedup();

    if sorted.len() < 3 {
        return sorted;
    }

    let cross =
        |o: Point, a: Point, b: Point| (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0);

    let mut lower: Vec<Point> = Vec::new();
    for &point in sorted.iter() {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], point) <= 0.
        {
            lower.pop();
        }
        lower.push(point);
    }

    let mut upper: Vec<Point> = Vec::new();
    for &point in sorted.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], point) <= 0.
        {
            upper.pop();
        }
        upper.push(point);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);

    lower
}
