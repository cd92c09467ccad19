use super::*;
use kurbo::PathEl;

fn pts(v: &[(f64, f64)]) -> Vec<Point> {
    v.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

#[test]
fn linear_path_visits_every_point() {
    let path = linear_path(&pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]));
    let els = path.elements();
    assert_eq!(els.len(), 3);
    assert_eq!(els[0], PathEl::MoveTo(Point::new(0.0, 0.0)));
    assert_eq!(els[2], PathEl::LineTo(Point::new(10.0, 10.0)));
}

#[test]
fn basis_with_two_points_is_a_line() {
    let path = basis_path(&pts(&[(0.0, 0.0), (60.0, 0.0)]));
    assert_eq!(
        path.elements(),
        &[
            PathEl::MoveTo(Point::new(0.0, 0.0)),
            PathEl::LineTo(Point::new(60.0, 0.0))
        ]
    );
}

#[test]
fn basis_matches_reference_control_points() {
    let path = basis_path(&pts(&[(0.0, 0.0), (60.0, 0.0), (60.0, 60.0)]));
    let els = path.elements();
    assert_eq!(els.len(), 5);
    assert_eq!(els[0], PathEl::MoveTo(Point::new(0.0, 0.0)));
    assert_eq!(els[1], PathEl::LineTo(Point::new(10.0, 0.0)));
    let PathEl::CurveTo(c1, c2, end) = els[2] else {
        panic!("expected cubic, got {:?}", els[2]);
    };
    assert!(close(c1, Point::new(20.0, 0.0)));
    assert!(close(c2, Point::new(40.0, 0.0)));
    assert!(close(end, Point::new(50.0, 10.0)));
    let PathEl::CurveTo(_, _, end) = els[3] else {
        panic!("expected cubic, got {:?}", els[3]);
    };
    assert!(close(end, Point::new(60.0, 50.0)));
    assert_eq!(els[4], PathEl::LineTo(Point::new(60.0, 60.0)));
}

#[test]
fn smooth_route_ends_exactly_on_last_point() {
    let points = pts(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (200.0, 150.0)]);
    let path = route_path(&points, true).unwrap();
    assert_eq!(
        path.elements().last(),
        Some(&PathEl::LineTo(Point::new(200.0, 150.0)))
    );
    assert!(route_path(&points[..1], true).is_none());
}

#[test]
fn arrow_head_points_back_along_last_segment() {
    let head = arrow_head(&pts(&[(0.0, 0.0), (100.0, 0.0)]), 10.0, 10.0).unwrap();
    assert!(close(head[0], Point::new(100.0, 0.0)));
    assert!(close(head[1], Point::new(90.0, -10.0)));
    assert!(close(head[2], Point::new(90.0, 10.0)));

    let head = arrow_head(&pts(&[(0.0, 0.0), (0.0, 50.0)]), 10.0, 5.0).unwrap();
    assert!(close(head[0], Point::new(0.0, 50.0)));
    assert!(close(head[1], Point::new(5.0, 40.0)));
    assert!(close(head[2], Point::new(-5.0, 40.0)));
}

#[test]
fn t_bar_is_perpendicular_to_last_segment() {
    let (a, b) = t_bar(&pts(&[(0.0, 0.0), (100.0, 0.0)]), 10.0).unwrap();
    assert!(close(a, Point::new(100.0, -10.0)));
    assert!(close(b, Point::new(100.0, 10.0)));
    assert!(t_bar(&pts(&[(1.0, 1.0)]), 10.0).is_none());
}
