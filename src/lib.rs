//! gridplay is a football play-diagram engine.
//!
//! It owns the diagram itself and leaves windowing, sign-in and document storage to the host:
//!
//! - A copy-on-write [`Scene`] of players, routes and notes, with an undo [`History`]
//! - A pointer-driven authoring state machine wrapped by the [`PlayEditor`] session
//! - A clock-driven [`PlaybackEngine`] that moves tokens along their routes
//! - A [`RenderSurface`] that projects the scene to primitives, SVG and rasters
//! - A [`Compositor`] that turns the surface into framed, shareable PNG exports
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod editor;
pub(crate) mod export;
pub(crate) mod render;
pub(crate) mod scene;

pub use crate::foundation::core::{
    BezPath, Color, DEFENSE_RADIUS, FieldSize, PLAYER_RADIUS, Point, SCRIMMAGE_OFFSET, Vec2,
};
pub use crate::foundation::error::{PlayError, PlayResult};
pub use crate::foundation::math::{clamp_axis, clamp_to_field};

pub use crate::animation::clock::{FrameClock, ManualClock, SystemClock, Ticker};
pub use crate::animation::playback::{
    DEFAULT_SPEED, PlaybackEngine, RouteTrack, Segment, TrackState, route_duration, route_segments,
};
pub use crate::editor::authoring::{
    Action, AuthoringState, DRAG_THRESHOLD, DragTarget, Gesture, PointerInput, Transition,
    transition,
};
pub use crate::editor::history::History;
pub use crate::editor::notice::{Notice, Notices, SAVE_FAILED_MESSAGE, SAVED_MESSAGE};
pub use crate::editor::persist::{
    AuthStatus, InMemoryPlayStore, PlayRecord, PlayState, PlayStore, SaveContext, SavedPlay,
    generate_play_id, normalize_tags,
};
pub use crate::editor::selection::Selection;
pub use crate::editor::session::{EditorConfig, PlayEditor, SAVE_EXPORT_RATIO, THICKNESS_MULTIPLIER};
pub use crate::export::compositor::{
    Compositor, CropRect, ExportImage, ExportOptions, PLACEHOLDER_TITLE, crop_rect,
    export_file_name,
};
pub use crate::render::curve::{arrow_head, basis_path, linear_path, route_path, t_bar};
pub use crate::render::projector::{
    DisplayList, DrawItem, Hit, Primitive, Role, SELECTION_RING_SPIN, SceneView, Stroke,
    TextAnchor, Viewport, hit_test, note_bounds, project, token_path,
};
pub use crate::render::surface::{
    MAX_RASTER_DIM, RenderSurface, SurfaceOptions, display_list_svg, rasterize_svg,
    system_fontdb,
};
pub use crate::scene::defense::{DefenseOverlay, Formation};
pub use crate::scene::model::{
    DEFAULT_ROUTE_THICKNESS, EndMarker, FontSize, MAX_LABEL_CHARS, Note, NoteProperty, Player,
    Route, RoutePoint, RouteProperty, RouteStyle, Scene, Shape,
};
pub use crate::scene::template::{COLOR_OPTIONS, template_players, template_scene};
