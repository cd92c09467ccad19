use super::*;
use serde_json::json;

fn player(id: &str, x: f64, y: f64) -> Player {
    Player {
        id: id.to_owned(),
        x,
        y,
        shape: Shape::Circle,
        fill: Color::new("#3B82F6"),
        text_color: Color::new("white"),
        border: false,
    }
}

fn two_player_scene() -> Scene {
    Scene::new(
        vec![player("X", 100.0, 350.0), player("Z", 500.0, 350.0)],
        vec![],
        vec![],
    )
}

#[test]
fn first_click_starts_route_at_player_position() {
    let mut scene = two_player_scene();
    let out = scene.add_route_point(0, Point::new(100.0, 200.0)).unwrap();
    assert_eq!(out, RoutePoint::Started(0));

    let r = &scene.routes()[0];
    assert_eq!(r.player_id, "X");
    assert_eq!(r.points, vec![Point::new(100.0, 350.0), Point::new(100.0, 200.0)]);
    assert_eq!(r.color, Color::new("#3B82F6"));
    assert_eq!(r.thickness, DEFAULT_ROUTE_THICKNESS);
    assert_eq!(r.end_marker, EndMarker::Arrow);
    assert!(!r.finished);
}

#[test]
fn later_clicks_extend_open_route() {
    let mut scene = two_player_scene();
    scene.add_route_point(0, Point::new(100.0, 200.0));
    let out = scene.add_route_point(0, Point::new(300.0, 200.0)).unwrap();
    assert_eq!(out, RoutePoint::Extended(0));
    assert_eq!(scene.routes().len(), 1);
    assert_eq!(scene.routes()[0].points.len(), 3);
}

#[test]
fn finished_route_makes_next_click_start_a_new_one() {
    let mut scene = two_player_scene();
    scene.add_route_point(0, Point::new(100.0, 200.0));
    assert!(scene.update_route(0, RouteProperty::Finished(true)));
    let out = scene.add_route_point(0, Point::new(200.0, 200.0)).unwrap();
    assert_eq!(out, RoutePoint::Started(1));
}

#[test]
fn open_route_lookup_prefers_most_recent() {
    let mut scene = two_player_scene();
    scene.add_route_point(0, Point::new(100.0, 200.0));
    scene.update_route(0, RouteProperty::Finished(true));
    scene.add_route_point(1, Point::new(500.0, 200.0));
    scene.add_route_point(0, Point::new(150.0, 150.0));
    assert_eq!(scene.open_route_for("X"), Some(2));
    assert_eq!(scene.open_route_for("Z"), Some(1));
}

#[test]
fn reopening_is_refused_while_another_route_is_open() {
    let mut scene = two_player_scene();
    scene.add_route_point(0, Point::new(100.0, 200.0));
    scene.update_route(0, RouteProperty::Finished(true));
    scene.add_route_point(0, Point::new(200.0, 200.0));
    assert!(!scene.update_route(0, RouteProperty::Finished(false)));
    assert!(scene.routes()[0].finished);
}

#[test]
fn mutations_replace_only_the_affected_collection() {
    let mut scene = two_player_scene();
    let before = scene.snapshot();
    scene.set_player_fill(0, Color::new("#111827"));
    assert!(scene.players_changed(&before));
    assert!(!scene.routes_changed(&before));
    assert!(!scene.notes_changed(&before));
    // The snapshot stays untouched.
    assert_eq!(before.players()[0].fill, Color::new("#3B82F6"));
}

#[test]
fn empty_labels_are_ignored_and_long_ones_truncated() {
    let mut scene = two_player_scene();
    assert!(!scene.set_player_label(0, "   "));
    assert_eq!(scene.players()[0].id, "X");
    assert!(scene.set_player_label(0, "WRXX"));
    assert_eq!(scene.players()[0].id, "WRX");
}

#[test]
fn move_player_is_clamped() {
    let mut scene = two_player_scene();
    scene.move_player(0, Point::new(-10.0, 1000.0), FieldSize::STANDARD);
    assert_eq!(scene.players()[0].position(), Point::new(30.0, 570.0));
}

#[test]
fn removing_points_never_shrinks_below_two() {
    let mut scene = two_player_scene();
    scene.add_route_point(0, Point::new(100.0, 200.0));
    scene.add_route_point(0, Point::new(200.0, 200.0));
    assert!(scene.remove_route_point(0, 1));
    assert_eq!(scene.routes()[0].points.len(), 2);
    assert!(scene.remove_route_point(0, 1));
    assert!(scene.routes().is_empty());
}

#[test]
fn invalid_thickness_is_ignored() {
    let mut scene = two_player_scene();
    scene.add_route_point(0, Point::new(100.0, 200.0));
    assert!(!scene.update_route(0, RouteProperty::Thickness(0.0)));
    assert!(!scene.update_route(0, RouteProperty::Thickness(f64::NAN)));
    assert!(scene.update_route(0, RouteProperty::Thickness(3.5)));
    assert_eq!(scene.routes()[0].thickness, 3.5);
}

#[test]
fn scaled_thickness_copy_leaves_original_alone() {
    let mut scene = two_player_scene();
    scene.add_route_point(0, Point::new(100.0, 200.0));
    let thick = scene.with_route_thickness_scaled(2.0);
    assert_eq!(thick.routes()[0].thickness, 14.0);
    assert_eq!(scene.routes()[0].thickness, 7.0);
}

#[test]
fn route_json_uses_flat_points_and_camel_case_names() {
    let v = json!({
        "playerId": "Q",
        "points": [400, 425, 400, 300, 600, 300],
        "color": "#EF4444",
        "style": "dashed",
        "endMarker": "T",
        "smooth": true,
        "finished": false,
        "showLastSegment": true
    });
    let r: Route = serde_json::from_value(v).unwrap();
    assert_eq!(r.points.len(), 3);
    assert_eq!(r.style, RouteStyle::Dashed);
    assert_eq!(r.end_marker, EndMarker::T);
    assert_eq!(r.thickness, DEFAULT_ROUTE_THICKNESS);

    let back = serde_json::to_value(&r).unwrap();
    assert_eq!(back["points"], json!([400.0, 425.0, 400.0, 300.0, 600.0, 300.0]));
    assert_eq!(back["playerId"], json!("Q"));
}

#[test]
fn odd_coordinate_count_is_rejected() {
    let v = json!({"playerId": "Q", "points": [1, 2, 3], "color": "red"});
    assert!(serde_json::from_value::<Route>(v).is_err());
}

#[test]
fn note_font_size_serializes_as_number() {
    let n = Note::default();
    let v = serde_json::to_value(&n).unwrap();
    assert_eq!(v["fontSize"], json!(16));
    assert_eq!(v["backgroundColor"], json!("#FFFFFF"));

    let bad = json!({
        "x": 0, "y": 0, "text": "a", "fontSize": 13,
        "fontColor": "#000", "backgroundColor": "#fff"
    });
    assert!(serde_json::from_value::<Note>(bad).is_err());
}

#[test]
fn degenerate_routes_are_dropped_on_construction() {
    let r = Route {
        player_id: "X".to_owned(),
        points: vec![Point::new(1.0, 1.0)],
        color: Color::new("red"),
        style: RouteStyle::Solid,
        thickness: 7.0,
        end_marker: EndMarker::Dot,
        smooth: false,
        finished: true,
    };
    let scene = Scene::new(vec![], vec![r], vec![]);
    assert!(scene.routes().is_empty());
}
