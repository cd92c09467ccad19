use crate::foundation::core::{FieldSize, Point};

/// Clamp a single coordinate into `[radius, dim - radius]`.
///
/// When the entity is wider than the field the lower bound wins, so the result never goes
/// negative.
pub fn clamp_axis(v: f64, radius: f64, dim: f64) -> f64 {
    radius.max(v.min(dim - radius))
}

/// Clamp a point so an entity of `radius` stays fully inside the field.
pub fn clamp_to_field(pos: Point, radius: f64, field: FieldSize) -> Point {
    Point::new(
        clamp_axis(pos.x, radius, field.width),
        clamp_axis(pos.y, radius, field.height),
    )
}

pub(crate) fn lerp_point(a: Point, b: Point, t: f64) -> Point {
    Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Squared distance from `p` to the segment `a..b`.
pub(crate) fn segment_distance_sq(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.hypot2();
    if len_sq <= f64::EPSILON {
        return (p - a).hypot2();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - lerp_point(a, b, t)).hypot2()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
