//! Pointer-driven authoring: turns presses, moves and releases into editor actions.
//!
//! The machine is a pure function of the current [`Gesture`], the [`Selection`] and one
//! [`PointerInput`]. Hit-testing happens before input reaches it, so a press on a player while
//! another player is armed arrives as [`Hit::Player`] and becomes a selection change rather than a
//! route point.

use crate::editor::selection::Selection;
use crate::foundation::core::{Point, Vec2};
use crate::render::projector::Hit;

/// Pointer travel (field units) before a press on a draggable entity becomes a drag.
pub const DRAG_THRESHOLD: f64 = 3.0;

/// Authoring mode derived from the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthoringState {
    /// Nothing selected; empty clicks do nothing.
    Idle,
    /// A player is selected; empty clicks extend (or start) its open route.
    PlayerArmed(usize),
    /// A route is selected and exposes point handles.
    RouteSelected(usize),
    /// A note is selected for editing.
    NoteSelected(usize),
}

impl From<Selection> for AuthoringState {
    fn from(sel: Selection) -> Self {
        match sel {
            Selection::None => Self::Idle,
            Selection::Player(i) => Self::PlayerArmed(i),
            Selection::Route(i) => Self::RouteSelected(i),
            Selection::Note(i) => Self::NoteSelected(i),
        }
    }
}

/// Something that can be dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragTarget {
    /// Offensive player token.
    Player(usize),
    /// Note label.
    Note(usize),
    /// Point handle of a route.
    Handle {
        /// Route index.
        route: usize,
        /// Point index.
        point: usize,
    },
    /// Defensive marker.
    Defense(usize),
}

impl DragTarget {
    fn from_hit(hit: Hit) -> Option<Self> {
        match hit {
            Hit::Player(i) => Some(Self::Player(i)),
            Hit::Note(i) => Some(Self::Note(i)),
            Hit::Handle { route, point } => Some(Self::Handle { route, point }),
            Hit::Defense(i) => Some(Self::Defense(i)),
            Hit::Route(_) | Hit::Empty => None,
        }
    }
}

/// In-progress pointer gesture. Orthogonal to [`AuthoringState`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Gesture {
    /// No button held.
    #[default]
    Idle,
    /// Button held, not yet moved past [`DRAG_THRESHOLD`].
    Pressed {
        /// What was under the pointer.
        hit: Hit,
        /// Press position.
        origin: Point,
        /// Position of the pressed entity at press time.
        anchor: Point,
    },
    /// Dragging an entity.
    Dragging {
        /// Entity being dragged.
        target: DragTarget,
        /// Pointer position minus entity position at press time.
        grab: Vec2,
    },
}

impl Gesture {
    /// `true` while an entity is being dragged.
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// Pointer input in field units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
    /// Button pressed over `hit`; `anchor` is that entity's position (ignored for empty space).
    Down {
        /// Hit-test result at the press position.
        hit: Hit,
        /// Press position.
        at: Point,
        /// Entity position at press time.
        anchor: Point,
    },
    /// Pointer moved.
    Move(Point),
    /// Button released.
    Up(Point),
    /// Gesture aborted by the host (focus lost, pointer left the surface).
    Cancel,
}

/// Effect requested by a transition, applied by the editor session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    /// Replace the selection.
    Select(Selection),
    /// Clear a selected note, leaving player/route selection alone.
    ClearNoteSelection,
    /// Append a route point for the armed player.
    PlaceRoutePoint {
        /// Armed player index.
        player: usize,
        /// Pointer position.
        at: Point,
    },
    /// A drag started.
    BeginDrag(DragTarget),
    /// Dragged entity should now sit at `to` (before clamping).
    DragTo {
        /// Entity being dragged.
        target: DragTarget,
        /// Proposed entity position.
        to: Point,
    },
    /// Drag finished with the entity at `to` (before clamping).
    EndDrag {
        /// Entity that was dragged.
        target: DragTarget,
        /// Final proposed entity position.
        to: Point,
    },
    /// Drag aborted; the entity should return to where it was.
    CancelDrag(DragTarget),
}

/// Result of one transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Gesture after the input.
    pub gesture: Gesture,
    /// Actions to apply, in order.
    pub actions: Vec<Action>,
}

impl Transition {
    fn stay(gesture: Gesture) -> Self {
        Self {
            gesture,
            actions: Vec::new(),
        }
    }
}

fn click(hit: Hit, at: Point, selection: Selection) -> Vec<Action> {
    match hit {
        Hit::Player(i) => vec![Action::Select(Selection::Player(i))],
        Hit::Route(i) => vec![Action::Select(Selection::Route(i))],
        Hit::Note(i) => vec![Action::Select(Selection::Note(i))],
        Hit::Empty => {
            let mut out = vec![Action::ClearNoteSelection];
            if let AuthoringState::PlayerArmed(player) = AuthoringState::from(selection) {
                out.push(Action::PlaceRoutePoint { player, at });
            }
            out
        }
        // Handles and defensive markers only react to drags.
        Hit::Handle { .. } | Hit::Defense(_) => Vec::new(),
    }
}

/// Advance the gesture by one pointer input.
pub fn transition(gesture: Gesture, selection: Selection, input: PointerInput) -> Transition {
    match (gesture, input) {
        (_, PointerInput::Down { hit, at, anchor }) => {
            let mut actions = Vec::new();
            if let Gesture::Dragging { target, .. } = gesture {
                actions.push(Action::CancelDrag(target));
            }
            Transition {
                gesture: Gesture::Pressed {
                    hit,
                    origin: at,
                    anchor,
                },
                actions,
            }
        }

        (
            Gesture::Pressed {
                hit,
                origin,
                anchor,
            },
            PointerInput::Move(at),
        ) => {
            let Some(target) = DragTarget::from_hit(hit) else {
                return Transition::stay(gesture);
            };
            if (at - origin).hypot() < DRAG_THRESHOLD {
                return Transition::stay(gesture);
            }
            let grab = origin - anchor;
            Transition {
                gesture: Gesture::Dragging { target, grab },
                actions: vec![
                    Action::BeginDrag(target),
                    Action::DragTo {
                        target,
                        to: at - grab,
                    },
                ],
            }
        }

        (Gesture::Dragging { target, grab }, PointerInput::Move(at)) => Transition {
            gesture,
            actions: vec![Action::DragTo {
                target,
                to: at - grab,
            }],
        },

        (Gesture::Pressed { hit, .. }, PointerInput::Up(at)) => Transition {
            gesture: Gesture::Idle,
            actions: click(hit, at, selection),
        },

        (Gesture::Dragging { target, grab }, PointerInput::Up(at)) => Transition {
            gesture: Gesture::Idle,
            actions: vec![Action::EndDrag {
                target,
                to: at - grab,
            }],
        },

        (Gesture::Dragging { target, .. }, PointerInput::Cancel) => Transition {
            gesture: Gesture::Idle,
            actions: vec![Action::CancelDrag(target)],
        },

        (_, PointerInput::Cancel) | (Gesture::Idle, PointerInput::Up(_)) => {
            Transition::stay(Gesture::Idle)
        }

        (Gesture::Idle, PointerInput::Move(_)) => Transition::stay(Gesture::Idle),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/authoring.rs"]
mod tests;
