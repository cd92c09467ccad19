use kurbo::{Affine, Circle, Ellipse, ParamCurveNearest, Rect, RoundedRect, Shape as _};

use crate::editor::selection::Selection;
use crate::foundation::core::{
    BezPath, Color, DEFENSE_RADIUS, FieldSize, PLAYER_RADIUS, Point, Vec2,
};
use crate::foundation::math::segment_distance_sq;
use crate::render::curve::{ARROW_LENGTH, ARROW_WIDTH, arrow_head, route_path, t_bar};
use crate::scene::model::{EndMarker, Note, Player, RouteStyle, Scene, Shape};

/// Spacing between drawn yard lines, in field units.
pub const YARD_LINE_SPACING: f64 = 110.0;

/// Radius of the draggable route point handles.
pub const HANDLE_RADIUS: f64 = 6.0;

/// Minimum stroke width used when hit-testing routes.
pub const ROUTE_HIT_WIDTH: f64 = 20.0;

/// Spin of the selection ring, in radians per second (half a turn).
pub const SELECTION_RING_SPIN: f64 = std::f64::consts::PI;

const SELECTION_RING_RADIUS: f64 = 40.0;
const LABEL_FONT_PX: f64 = 24.0;
const NOTE_PADDING: f64 = 4.0;
const FLATTEN_TOLERANCE: f64 = 0.1;

/// Uniform field-to-screen mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    field: FieldSize,
    scale: f64,
}

impl Viewport {
    /// Fit the field into a container: `scale = min(1, container_width / field.width)`.
    ///
    /// Degenerate container widths fall back to scale 1.
    pub fn fit(field: FieldSize, container_width: f64) -> Self {
        let scale = if container_width.is_finite() && container_width > 0.0 {
            (container_width / field.width).min(1.0)
        } else {
            tracing::warn!(container_width, "invalid container width, using scale 1");
            1.0
        };
        Self { field, scale }
    }

    /// Field dimensions.
    pub fn field(&self) -> FieldSize {
        self.field
    }

    /// Current scale factor (applies to both axes).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Convert a pointer position in screen pixels to field units.
    pub fn to_field(&self, screen: Point) -> Point {
        Point::new(screen.x / self.scale, screen.y / self.scale)
    }

    /// Convert a field position to screen pixels.
    pub fn to_screen(&self, field: Point) -> Point {
        Point::new(field.x * self.scale, field.y * self.scale)
    }

    /// On-screen size of the field in pixels.
    pub fn screen_size(&self) -> (f64, f64) {
        (self.field.width * self.scale, self.field.height * self.scale)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::fit(FieldSize::STANDARD, FieldSize::STANDARD.width)
    }
}

/// Everything the projector needs to draw one frame.
///
/// Position overrides are optional: an empty vector means "use canonical positions".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneView {
    /// Canonical scene.
    pub scene: Scene,
    /// Current selection.
    pub selection: Selection,
    /// Visual player positions (playback or drag preview), indexed like `scene.players()`.
    pub player_positions: Vec<Point>,
    /// Visual note positions (drag preview), indexed like `scene.notes()`.
    pub note_positions: Vec<Point>,
    /// Defensive marker positions.
    pub defense: Vec<Point>,
    /// Drag guide position.
    pub crosshair: Option<Point>,
    /// Rotation of the selection ring, in radians.
    pub ring_angle: f64,
}

impl SceneView {
    /// View of a scene with nothing selected and canonical positions.
    pub fn of(scene: Scene) -> Self {
        Self {
            scene,
            ..Self::default()
        }
    }

    /// Visual position of player `i`.
    pub fn player_position(&self, i: usize) -> Point {
        self.player_positions
            .get(i)
            .copied()
            .or_else(|| self.scene.players().get(i).map(Player::position))
            .unwrap_or_default()
    }

    /// Visual top-left corner of note `i`.
    pub fn note_position(&self, i: usize) -> Point {
        self.note_positions
            .get(i)
            .copied()
            .or_else(|| self.scene.notes().get(i).map(Note::position))
            .unwrap_or_default()
    }
}

/// Stroke parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in field units.
    pub width: f64,
    /// Optional `(dash, gap)` pattern.
    pub dash: Option<(f64, f64)>,
}

impl Stroke {
    fn solid(color: impl Into<Color>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
            dash: None,
        }
    }
}

/// Horizontal text alignment relative to the text origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// Origin is the left edge.
    Start,
    /// Origin is the horizontal center.
    Middle,
}

/// A drawable primitive in field units.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Filled and/or stroked outline.
    Shape {
        /// Outline.
        path: BezPath,
        /// Fill, if any.
        fill: Option<Color>,
        /// Stroke, if any.
        stroke: Option<Stroke>,
    },
    /// Single line of text; `origin.y` is the baseline.
    Text {
        /// Baseline anchor point.
        origin: Point,
        /// Text content.
        text: String,
        /// Font size in field units.
        size: f64,
        /// Fill color.
        color: Color,
        /// Bold weight.
        bold: bool,
        /// Horizontal alignment.
        anchor: TextAnchor,
    },
}

/// What a draw item represents; used for hit-testing and by tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Line of scrimmage or yard line.
    FieldLine,
    /// Route stroke.
    Route(usize),
    /// Route end decoration.
    EndMarker(usize),
    /// Point handle of the selected route.
    Handle {
        /// Route index.
        route: usize,
        /// Point index.
        point: usize,
    },
    /// Note background or text.
    Note(usize),
    /// Dashed ring around the selected player.
    SelectionRing,
    /// Player token or label.
    Player(usize),
    /// Defensive marker or label.
    Defense(usize),
    /// Drag guide line.
    Crosshair,
}

/// One entry of the display list.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawItem {
    /// What the primitive belongs to.
    pub role: Role,
    /// The primitive.
    pub primitive: Primitive,
}

/// Primitives in paint order (later items draw on top).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    /// Field dimensions the list was projected for.
    pub field: FieldSize,
    /// Draw items in paint order.
    pub items: Vec<DrawItem>,
}

impl DisplayList {
    fn shape(&mut self, role: Role, path: BezPath, fill: Option<Color>, stroke: Option<Stroke>) {
        self.items.push(DrawItem {
            role,
            primitive: Primitive::Shape { path, fill, stroke },
        });
    }

    #[allow(clippy::too_many_arguments)]
    fn text(
        &mut self,
        role: Role,
        origin: Point,
        text: &str,
        size: f64,
        color: &Color,
        bold: bool,
        anchor: TextAnchor,
    ) {
        self.items.push(DrawItem {
            role,
            primitive: Primitive::Text {
                origin,
                text: text.to_owned(),
                size,
                color: color.clone(),
                bold,
                anchor,
            },
        });
    }

    /// Items with the given role, in paint order.
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &DrawItem> {
        self.items.iter().filter(move |i| i.role == role)
    }
}

fn line(a: Point, b: Point) -> BezPath {
    let mut p = BezPath::new();
    p.move_to(a);
    p.line_to(b);
    p
}

fn polygon(points: &[Point]) -> BezPath {
    let mut p = BezPath::new();
    for (i, &pt) in points.iter().enumerate() {
        if i == 0 {
            p.move_to(pt);
        } else {
            p.line_to(pt);
        }
    }
    p.close_path();
    p
}

fn star(center: Point, inner: f64, outer: f64, spikes: usize) -> BezPath {
    let step = std::f64::consts::PI / spikes as f64;
    let pts: Vec<Point> = (0..spikes * 2)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let a = -std::f64::consts::FRAC_PI_2 + step * i as f64;
            Point::new(center.x + r * a.cos(), center.y + r * a.sin())
        })
        .collect();
    polygon(&pts)
}

fn down_triangle(center: Point, radius: f64) -> BezPath {
    let pts: Vec<Point> = (0..3)
        .map(|i| {
            let a = std::f64::consts::TAU * f64::from(i) / 3.0;
            Point::new(center.x - radius * a.sin(), center.y + radius * a.cos())
        })
        .collect();
    polygon(&pts)
}

/// Outline of a player token centered at `center`.
pub fn token_path(shape: Shape, center: Point) -> BezPath {
    let r = PLAYER_RADIUS;
    match shape {
        Shape::Circle => Circle::new(center, r).to_path(FLATTEN_TOLERANCE),
        Shape::Square => {
            Rect::from_center_size(center, (2.0 * r, 2.0 * r)).to_path(FLATTEN_TOLERANCE)
        }
        Shape::Oval => {
            Ellipse::new(center, Vec2::new(r, r * 2.0 / 3.0), 0.0).to_path(FLATTEN_TOLERANCE)
        }
        Shape::Star => star(center, r / 2.0, r, 5),
    }
}

fn token_contains(shape: Shape, center: Point, p: Point) -> bool {
    let d = p - center;
    let r = PLAYER_RADIUS;
    match shape {
        Shape::Circle | Shape::Star => d.hypot2() <= r * r,
        Shape::Square => d.x.abs() <= r && d.y.abs() <= r,
        Shape::Oval => {
            let ry = r * 2.0 / 3.0;
            (d.x / r).powi(2) + (d.y / ry).powi(2) <= 1.0
        }
    }
}

/// Approximate bounding box of a note label at `origin` (top-left).
///
/// Text width is estimated from the character count; there is no font shaping in the core.
pub fn note_bounds(note: &Note, origin: Point) -> Rect {
    let size = note.font_size.px();
    let lines: Vec<&str> = note.text.split('\n').collect();
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let w = longest as f64 * size * 0.6 + 2.0 * NOTE_PADDING;
    let h = lines.len() as f64 * size + 2.0 * NOTE_PADDING;
    Rect::new(origin.x, origin.y, origin.x + w, origin.y + h)
}

fn project_field_lines(field: FieldSize, out: &mut DisplayList) {
    let los = field.line_of_scrimmage_y();
    out.shape(
        Role::FieldLine,
        line(Point::new(0.0, los), Point::new(field.width, los)),
        None,
        Some(Stroke::solid("black", 3.0)),
    );
    let mut y = los - YARD_LINE_SPACING;
    while y >= 0.0 {
        out.shape(
            Role::FieldLine,
            line(Point::new(0.0, y), Point::new(field.width, y)),
            None,
            Some(Stroke::solid("#ccc", 1.0)),
        );
        y -= YARD_LINE_SPACING;
    }
    let mut y = los + YARD_LINE_SPACING;
    while y <= field.height {
        out.shape(
            Role::FieldLine,
            line(Point::new(0.0, y), Point::new(field.width, y)),
            None,
            Some(Stroke::solid("#ccc", 1.0)),
        );
        y += YARD_LINE_SPACING;
    }
}

fn project_routes(view: &SceneView, out: &mut DisplayList) {
    for (i, route) in view.scene.routes().iter().enumerate() {
        let Some(path) = route_path(&route.points, route.smooth) else {
            continue;
        };
        let dash = match route.style {
            RouteStyle::Solid => None,
            RouteStyle::Dashed => Some((10.0, 10.0)),
        };
        out.shape(
            Role::Route(i),
            path,
            None,
            Some(Stroke {
                color: route.color.clone(),
                width: route.thickness,
                dash,
            }),
        );

        match route.end_marker {
            EndMarker::Arrow => {
                if let Some(head) = arrow_head(&route.points, ARROW_LENGTH, ARROW_WIDTH) {
                    out.shape(
                        Role::EndMarker(i),
                        polygon(&head),
                        Some(route.color.clone()),
                        Some(Stroke::solid(route.color.clone(), 1.0)),
                    );
                }
            }
            EndMarker::Dot => {
                out.shape(
                    Role::EndMarker(i),
                    Circle::new(route.end(), route.thickness).to_path(FLATTEN_TOLERANCE),
                    Some(route.color.clone()),
                    None,
                );
            }
            EndMarker::T => {
                if let Some((a, b)) = t_bar(&route.points, ARROW_WIDTH) {
                    out.shape(
                        Role::EndMarker(i),
                        line(a, b),
                        None,
                        Some(Stroke::solid(route.color.clone(), route.thickness)),
                    );
                }
            }
        }

        if view.selection == Selection::Route(i) {
            for (pi, &p) in route.points.iter().enumerate() {
                out.shape(
                    Role::Handle { route: i, point: pi },
                    Circle::new(p, HANDLE_RADIUS).to_path(FLATTEN_TOLERANCE),
                    Some(Color::new("#FFD700")),
                    Some(Stroke::solid("#000", 1.0)),
                );
            }
        }
    }
}

fn project_notes(view: &SceneView, out: &mut DisplayList) {
    for (i, note) in view.scene.notes().iter().enumerate() {
        let origin = view.note_position(i);
        let bounds = note_bounds(note, origin);
        let border = note.border.then(|| Stroke::solid("#000", 1.0));
        out.shape(
            Role::Note(i),
            RoundedRect::from_rect(bounds, 4.0).to_path(FLATTEN_TOLERANCE),
            Some(note.background_color.clone()),
            border,
        );
        let size = note.font_size.px();
        for (li, text) in note.text.split('\n').enumerate() {
            let baseline = origin.y + NOTE_PADDING + size * (li as f64 + 0.8);
            out.text(
                Role::Note(i),
                Point::new(origin.x + NOTE_PADDING, baseline),
                text,
                size,
                &note.font_color,
                note.bold,
                TextAnchor::Start,
            );
        }
    }
}

fn project_players(view: &SceneView, out: &mut DisplayList) {
    for (i, player) in view.scene.players().iter().enumerate() {
        let center = view.player_position(i);
        if view.selection == Selection::Player(i) {
            let mut ring = Circle::new(center, SELECTION_RING_RADIUS).to_path(FLATTEN_TOLERANCE);
            ring.apply_affine(Affine::rotate_about(view.ring_angle, center));
            out.shape(
                Role::SelectionRing,
                ring,
                None,
                Some(Stroke {
                    color: Color::new("#FFA500"),
                    width: 3.0,
                    dash: Some((10.0, 5.0)),
                }),
            );
        }
        let border = player.border.then(|| Stroke::solid("#000", 2.0));
        out.shape(
            Role::Player(i),
            token_path(player.shape, center),
            Some(player.fill.clone()),
            border,
        );
        out.text(
            Role::Player(i),
            Point::new(center.x, center.y + LABEL_FONT_PX * 0.35),
            &player.id,
            LABEL_FONT_PX,
            &player.text_color,
            true,
            TextAnchor::Middle,
        );
    }
}

fn project_defense(view: &SceneView, out: &mut DisplayList) {
    let white = Color::new("white");
    for (i, &p) in view.defense.iter().enumerate() {
        out.shape(
            Role::Defense(i),
            down_triangle(p, DEFENSE_RADIUS),
            Some(Color::new("#6B7280")),
            None,
        );
        out.text(
            Role::Defense(i),
            Point::new(p.x, p.y + LABEL_FONT_PX * 0.35),
            "D",
            LABEL_FONT_PX,
            &white,
            true,
            TextAnchor::Middle,
        );
    }
}

/// Map a view to drawable primitives in paint order: field lines, routes (with handles), notes,
/// players, defensive markers, crosshair.
pub fn project(view: &SceneView, field: FieldSize) -> DisplayList {
    let mut out = DisplayList {
        field,
        items: Vec::new(),
    };
    project_field_lines(field, &mut out);
    project_routes(view, &mut out);
    project_notes(view, &mut out);
    project_players(view, &mut out);
    project_defense(view, &mut out);
    if let Some(c) = view.crosshair {
        let guide = Stroke::solid("#d1d5db", 1.0);
        out.shape(
            Role::Crosshair,
            line(Point::new(c.x, 0.0), Point::new(c.x, field.height)),
            None,
            Some(guide.clone()),
        );
        out.shape(
            Role::Crosshair,
            line(Point::new(0.0, c.y), Point::new(field.width, c.y)),
            None,
            Some(guide),
        );
    }
    out
}

/// Topmost interactive entity under a field-unit point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    /// Defensive marker.
    Defense(usize),
    /// Player token.
    Player(usize),
    /// Note label.
    Note(usize),
    /// Point handle of the selected route.
    Handle {
        /// Route index.
        route: usize,
        /// Point index.
        point: usize,
    },
    /// Route stroke.
    Route(usize),
    /// Bare field.
    Empty,
}

fn route_hit(view: &SceneView, idx: usize, p: Point) -> bool {
    let route = &view.scene.routes()[idx];
    let tol = route.thickness.max(ROUTE_HIT_WIDTH) / 2.0;
    let tol_sq = tol * tol;
    if !route.smooth {
        return route
            .points
            .windows(2)
            .any(|w| segment_distance_sq(p, w[0], w[1]) <= tol_sq);
    }
    let Some(path) = route_path(&route.points, true) else {
        return false;
    };
    path.segments()
        .any(|seg| seg.nearest(p, 1e-3).distance_sq <= tol_sq)
}

/// Hit-test in reverse paint order so the topmost entity wins.
pub fn hit_test(view: &SceneView, p: Point) -> Hit {
    for (i, &d) in view.defense.iter().enumerate().rev() {
        if (p - d).hypot2() <= DEFENSE_RADIUS * DEFENSE_RADIUS {
            return Hit::Defense(i);
        }
    }
    for (i, player) in view.scene.players().iter().enumerate().rev() {
        if token_contains(player.shape, view.player_position(i), p) {
            return Hit::Player(i);
        }
    }
    for (i, note) in view.scene.notes().iter().enumerate().rev() {
        if note_bounds(note, view.note_position(i)).contains(p) {
            return Hit::Note(i);
        }
    }
    let routes = view.scene.routes();
    if let Some(ri) = view.selection.route().filter(|&ri| ri < routes.len()) {
        let slop = HANDLE_RADIUS + 4.0;
        for (pi, &pt) in routes[ri].points.iter().enumerate().rev() {
            if (p - pt).hypot2() <= slop * slop {
                return Hit::Handle {
                    route: ri,
                    point: pi,
                };
            }
        }
    }
    for i in (0..routes.len()).rev() {
        if route_hit(view, i, p) {
            return Hit::Route(i);
        }
    }
    Hit::Empty
}

#[cfg(test)]
#[path = "../../tests/unit/render/projector.rs"]
mod tests;
