use super::*;

#[test]
fn clamp_keeps_points_inside_bounds() {
    let field = FieldSize::STANDARD;
    let p = clamp_to_field(Point::new(-50.0, 900.0), 30.0, field);
    assert_eq!(p, Point::new(30.0, 570.0));

    let p = clamp_to_field(Point::new(810.0, 10.0), 35.0, field);
    assert_eq!(p, Point::new(765.0, 35.0));
}

#[test]
fn clamp_leaves_interior_points_untouched() {
    let p = clamp_to_field(Point::new(400.0, 300.0), 30.0, FieldSize::STANDARD);
    assert_eq!(p, Point::new(400.0, 300.0));
}

#[test]
fn oversized_radius_prefers_lower_bound() {
    assert_eq!(clamp_axis(5.0, 60.0, 100.0), 60.0);
}

#[test]
fn segment_distance_projects_onto_segment() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 0.0);
    assert_eq!(segment_distance_sq(Point::new(5.0, 3.0), a, b), 9.0);
    assert_eq!(segment_distance_sq(Point::new(-4.0, 3.0), a, b), 25.0);
    assert_eq!(segment_distance_sq(Point::new(2.0, 2.0), a, a), 8.0);
}
