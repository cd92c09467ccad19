use super::*;
use crate::animation::clock::ManualClock;
use crate::foundation::core::{Color, FieldSize};
use crate::scene::model::{EndMarker, Player, RouteStyle, Shape};

fn player(id: &str, x: f64, y: f64) -> Player {
    Player {
        id: id.to_owned(),
        x,
        y,
        shape: Shape::Circle,
        fill: Color::new("red"),
        text_color: Color::new("white"),
        border: false,
    }
}

fn route(id: &str, pts: &[(f64, f64)]) -> Route {
    Route {
        player_id: id.to_owned(),
        points: pts.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        color: Color::new("red"),
        style: RouteStyle::Solid,
        thickness: 7.0,
        end_marker: EndMarker::Arrow,
        smooth: false,
        finished: false,
    }
}

fn l_route_scene() -> Scene {
    Scene::new(
        vec![player("A", 0.0, 0.0)],
        vec![route("A", &[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)])],
        vec![],
    )
}

fn assert_close(p: Point, x: f64, y: f64) {
    assert!((p.x - x).abs() < 1e-9 && (p.y - y).abs() < 1e-9, "{p:?} != ({x}, {y})");
}

#[test]
fn duration_is_distance_over_speed() {
    let scene = l_route_scene();
    assert!((route_duration(&scene.routes()[0], DEFAULT_SPEED) - 1.0).abs() < 1e-12);

    let segs = route_segments(&scene.routes()[0], DEFAULT_SPEED);
    assert_eq!(segs.len(), 2);
    assert_eq!(segs[0].duration, 0.5);
    assert_eq!(segs[1].duration, 0.5);
}

#[test]
fn quarter_second_lands_halfway_along_first_leg() {
    let scene = l_route_scene();
    let mut engine = PlaybackEngine::default();
    engine.play(&scene, &ManualClock::new());
    engine.advance(0.25);
    assert_close(engine.visual_positions(&scene)[0], 50.0, 0.0);
}

#[test]
fn leftover_time_carries_into_next_segment() {
    let scene = l_route_scene();
    let mut engine = PlaybackEngine::default();
    engine.play(&scene, &ManualClock::new());
    engine.advance(0.75);
    assert_close(engine.visual_positions(&scene)[0], 100.0, 50.0);
    assert_eq!(engine.tracks()[0].active_segment(), 1);
}

#[test]
fn finishes_at_last_point_after_total_duration() {
    let scene = l_route_scene();
    let mut engine = PlaybackEngine::default();
    engine.play(&scene, &ManualClock::new());
    engine.advance(1.0);
    assert!(engine.is_finished());
    assert_close(engine.visual_positions(&scene)[0], 100.0, 100.0);
    // Canonical position never moves.
    assert_eq!(scene.players()[0].position(), Point::new(0.0, 0.0));
}

#[test]
fn pause_freezes_and_resume_continues() {
    let scene = l_route_scene();
    let mut clock = ManualClock::new();
    let mut engine = PlaybackEngine::default();
    engine.play(&scene, &clock);
    clock.advance(0.1);
    engine.tick(&clock);

    engine.pause(&clock);
    assert_eq!(engine.tracks()[0].state(), TrackState::Paused);
    clock.advance(5.0);
    engine.tick(&clock);
    assert_close(engine.visual_positions(&scene)[0], 20.0, 0.0);

    engine.play(&scene, &clock);
    clock.advance(0.1);
    engine.tick(&clock);
    assert_close(engine.visual_positions(&scene)[0], 40.0, 0.0);
}

#[test]
fn time_between_play_and_first_tick_counts() {
    let scene = l_route_scene();
    let mut clock = ManualClock::new();
    clock.advance(3.0);
    let mut engine = PlaybackEngine::default();
    engine.play(&scene, &clock);
    clock.advance(0.25);
    engine.tick(&clock);
    assert_close(engine.visual_positions(&scene)[0], 50.0, 0.0);
}

#[test]
fn pause_freezes_at_the_moment_of_pausing() {
    let scene = l_route_scene();
    let mut clock = ManualClock::new();
    let mut engine = PlaybackEngine::default();
    engine.play(&scene, &clock);
    engine.tick(&clock);
    clock.advance(0.2);
    // No tick between the last frame and the pause.
    engine.pause(&clock);
    assert_close(engine.visual_positions(&scene)[0], 40.0, 0.0);

    clock.advance(1.0);
    engine.tick(&clock);
    assert_close(engine.visual_positions(&scene)[0], 40.0, 0.0);
}

#[test]
fn players_animate_concurrently_at_their_own_pace() {
    let scene = Scene::new(
        vec![player("A", 0.0, 0.0), player("B", 0.0, 200.0)],
        vec![
            route("A", &[(0.0, 0.0), (400.0, 0.0)]),
            route("B", &[(0.0, 200.0), (100.0, 200.0)]),
        ],
        vec![],
    );
    let mut engine = PlaybackEngine::default();
    engine.play(&scene, &ManualClock::new());
    engine.advance(0.5);
    let pos = engine.visual_positions(&scene);
    assert_close(pos[0], 100.0, 0.0);
    assert_close(pos[1], 100.0, 200.0);
    assert_eq!(engine.tracks()[1].state(), TrackState::Finished);
    assert_eq!(engine.tracks()[0].state(), TrackState::Playing);
}

#[test]
fn reset_is_idempotent_and_restores_canonical_positions() {
    let scene = l_route_scene();
    let mut engine = PlaybackEngine::default();
    engine.play(&scene, &ManualClock::new());
    engine.advance(0.3);
    engine.reset();
    let once = engine.visual_positions(&scene);
    engine.reset();
    let twice = engine.visual_positions(&scene);
    assert_eq!(once, twice);
    assert_eq!(once[0], Point::new(0.0, 0.0));
    assert!(engine.tracks().is_empty());
    assert!(!engine.is_playing());
}

#[test]
fn reset_flag_forces_reset_even_when_stopped() {
    let scene = l_route_scene();
    let mut engine = PlaybackEngine::default();
    engine.play(&scene, &ManualClock::new());
    engine.advance(0.3);
    engine.pause(&ManualClock::new());
    engine.sync_reset_flag(1);
    assert!(engine.tracks().is_empty());
    // Same flag again is a no-op.
    engine.play(&scene, &ManualClock::new());
    engine.sync_reset_flag(1);
    assert!(!engine.tracks().is_empty());
}

#[test]
fn chains_are_built_lazily_from_current_geometry() {
    let mut scene = l_route_scene();
    let mut engine = PlaybackEngine::default();
    scene.move_route_point(0, 1, Point::new(200.0, 0.0), FieldSize::STANDARD);
    engine.play(&scene, &ManualClock::new());
    let expected = 1.0 + 100f64.hypot(100.0) / 200.0;
    assert!((engine.tracks()[0].total_duration() - expected).abs() < 1e-9);

    // Edits made mid-playback do not touch the in-flight chain.
    let before = engine.tracks()[0].total_duration();
    scene.move_route_point(0, 2, Point::new(700.0, 500.0), FieldSize::STANDARD);
    engine.advance(0.1);
    assert_eq!(engine.tracks()[0].total_duration(), before);
}

#[test]
fn routes_without_a_matching_player_are_skipped() {
    let scene = Scene::new(
        vec![player("A", 0.0, 0.0)],
        vec![route("Z", &[(0.0, 0.0), (10.0, 0.0)])],
        vec![],
    );
    let mut engine = PlaybackEngine::default();
    engine.play(&scene, &ManualClock::new());
    assert!(engine.tracks().is_empty());
}
