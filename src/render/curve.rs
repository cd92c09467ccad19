use crate::foundation::core::{BezPath, Point};

/// Arrow head length along the last segment, in field units.
pub const ARROW_LENGTH: f64 = 10.0;

/// Arrow head half-width across the last segment, in field units.
pub const ARROW_WIDTH: f64 = 10.0;

/// Straight polyline through `points`.
pub fn linear_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(&first) = iter.next() {
        path.move_to(first);
        for &p in iter {
            path.line_to(p);
        }
    }
    path
}

fn basis_segment(path: &mut BezPath, p0: Point, p1: Point, p: Point) {
    path.curve_to(
        ((2.0 * p0.x + p1.x) / 3.0, (2.0 * p0.y + p1.y) / 3.0),
        ((p0.x + 2.0 * p1.x) / 3.0, (p0.y + 2.0 * p1.y) / 3.0),
        ((p0.x + 4.0 * p1.x + p.x) / 6.0, (p0.y + 4.0 * p1.y + p.y) / 6.0),
    );
}

/// Uniform cubic B-spline through `points`, clamped to start at the first point and end at the
/// last one.
pub fn basis_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut seen = 0usize;
    let mut p0 = Point::ZERO;
    let mut p1 = Point::ZERO;

    for &p in points {
        match seen {
            0 => path.move_to(p),
            1 => {}
            2 => {
                path.line_to(((5.0 * p0.x + p1.x) / 6.0, (5.0 * p0.y + p1.y) / 6.0));
                basis_segment(&mut path, p0, p1, p);
            }
            _ => basis_segment(&mut path, p0, p1, p),
        }
        seen = (seen + 1).min(3);
        p0 = p1;
        p1 = p;
    }

    match seen {
        3 => {
            basis_segment(&mut path, p0, p1, p1);
            path.line_to(p1);
        }
        2 => path.line_to(p1),
        _ => {}
    }
    path
}

/// Stroke path for a route. Smooth routes get their final point repeated twice so the spline
/// reaches it with a stable tangent.
pub fn route_path(points: &[Point], smooth: bool) -> Option<BezPath> {
    if points.len() < 2 {
        return None;
    }
    if !smooth {
        return Some(linear_path(points));
    }
    let last = points[points.len() - 1];
    let mut padded = Vec::with_capacity(points.len() + 2);
    padded.extend_from_slice(points);
    padded.push(last);
    padded.push(last);
    Some(basis_path(&padded))
}

/// Direction of the last segment in radians.
fn end_angle(points: &[Point]) -> Option<(Point, f64)> {
    let [.., a, b] = points else {
        return None;
    };
    Some((*b, (b.y - a.y).atan2(b.x - a.x)))
}

/// Arrow head triangle `[tip, left, right]` at the end of `points`.
pub fn arrow_head(points: &[Point], length: f64, width: f64) -> Option<[Point; 3]> {
    let (tip, angle) = end_angle(points)?;
    let (sin, cos) = angle.sin_cos();
    let left = Point::new(
        tip.x - length * cos + width * sin,
        tip.y - length * sin - width * cos,
    );
    let right = Point::new(
        tip.x - length * cos - width * sin,
        tip.y - length * sin + width * cos,
    );
    Some([tip, left, right])
}

/// Endpoints of a bar perpendicular to the last segment, centered on the final point.
pub fn t_bar(points: &[Point], half_len: f64) -> Option<(Point, Point)> {
    let (end, angle) = end_angle(points)?;
    let (sin, cos) = angle.sin_cos();
    Some((
        Point::new(end.x + half_len * sin, end.y - half_len * cos),
        Point::new(end.x - half_len * sin, end.y + half_len * cos),
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/curve.rs"]
mod tests;
