use super::*;
use crate::foundation::core::{FieldSize, Point};
use crate::scene::template::template_scene;

fn moved(scene: &Scene, x: f64) -> Scene {
    let mut next = scene.clone();
    next.move_player(0, Point::new(x, 300.0), FieldSize::STANDARD);
    next
}

#[test]
fn undo_at_base_is_noop() {
    let base = template_scene(FieldSize::STANDARD);
    let mut h = History::new(base.clone());
    for _ in 0..3 {
        assert!(h.undo().is_none());
    }
    assert_eq!(h.depth(), 1);
    assert_eq!(h.top(), &base);
}

#[test]
fn undo_returns_entry_below_popped_top() {
    let s0 = template_scene(FieldSize::STANDARD);
    let mut h = History::new(s0.clone());

    // First edit: the pre-mutation scene is s0 again.
    h.push(s0.clone());
    let s1 = moved(&s0, 200.0);
    h.push(s1.clone());
    assert_eq!(h.depth(), 3);

    assert_eq!(h.undo(), Some(&s0));
    assert_eq!(h.depth(), 2);
    assert_eq!(h.undo(), Some(&s0));
    assert!(!h.can_undo());
}

#[test]
fn reset_discards_prior_entries() {
    let s0 = template_scene(FieldSize::STANDARD);
    let mut h = History::new(s0.clone());
    h.push(s0.clone());
    h.push(moved(&s0, 150.0));

    let loaded = moved(&s0, 600.0);
    h.reset(loaded.clone());
    assert_eq!(h.depth(), 1);
    assert_eq!(h.top(), &loaded);
    assert!(h.undo().is_none());
}
