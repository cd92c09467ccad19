use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Color, FieldSize, PLAYER_RADIUS, Point};
use crate::foundation::math::clamp_to_field;

/// Stroke thickness given to new routes and assumed for records that omit it.
pub const DEFAULT_ROUTE_THICKNESS: f64 = 7.0;

/// Longest accepted player label, in characters.
pub const MAX_LABEL_CHARS: usize = 3;

/// Token shape of a player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Round token (default).
    #[default]
    Circle,
    /// Square token.
    Square,
    /// Horizontal ellipse.
    Oval,
    /// Five-pointed star.
    Star,
}

impl Shape {
    /// All shapes in menu order.
    pub const ALL: [Shape; 4] = [Shape::Circle, Shape::Square, Shape::Oval, Shape::Star];
}

/// An offensive player token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Short label (1-3 chars). Routes refer to players through this label.
    pub id: String,
    /// Canonical x in field units.
    pub x: f64,
    /// Canonical y in field units.
    pub y: f64,
    /// Token shape.
    #[serde(default)]
    pub shape: Shape,
    /// Token fill color.
    pub fill: Color,
    /// Label color.
    pub text_color: Color,
    /// Draw a black outline around the token.
    #[serde(default)]
    pub border: bool,
}

impl Player {
    /// Canonical position as a point.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Stroke style of a route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStyle {
    /// Continuous stroke.
    #[default]
    Solid,
    /// 10/10 dash pattern.
    Dashed,
}

/// Decoration drawn at the last point of a route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndMarker {
    /// Filled triangular arrow head.
    #[default]
    #[serde(rename = "arrow")]
    Arrow,
    /// Filled dot.
    #[serde(rename = "dot")]
    Dot,
    /// Perpendicular block bar.
    #[serde(rename = "T")]
    T,
}

impl EndMarker {
    /// All end markers in menu order.
    pub const ALL: [EndMarker; 3] = [EndMarker::Arrow, EndMarker::Dot, EndMarker::T];
}

/// A polyline attached to a player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Label of the owning player.
    pub player_id: String,
    /// Field-unit points; serialized as a flat `[x0, y0, x1, y1, ...]` array. Always >= 2 points.
    #[serde(with = "flat_points")]
    pub points: Vec<Point>,
    /// Stroke color.
    pub color: Color,
    /// Stroke style.
    #[serde(default)]
    pub style: RouteStyle,
    /// Stroke thickness in field units.
    #[serde(default = "default_thickness")]
    pub thickness: f64,
    /// End decoration.
    #[serde(default)]
    pub end_marker: EndMarker,
    /// Render as a basis spline instead of a polyline.
    #[serde(default)]
    pub smooth: bool,
    /// Finished routes no longer accept appended points.
    #[serde(default)]
    pub finished: bool,
}

fn default_thickness() -> f64 {
    DEFAULT_ROUTE_THICKNESS
}

impl Route {
    /// Start a route at the player's current position, heading to `first`.
    pub fn start(player: &Player, first: Point) -> Self {
        Self {
            player_id: player.id.clone(),
            points: vec![player.position(), first],
            color: player.fill.clone(),
            style: RouteStyle::Solid,
            thickness: DEFAULT_ROUTE_THICKNESS,
            end_marker: EndMarker::Arrow,
            smooth: false,
            finished: false,
        }
    }

    /// Last point of the route.
    pub fn end(&self) -> Point {
        self.points.last().copied().unwrap_or_default()
    }

    /// Sum of segment lengths in field units.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

/// Note font sizes offered by the editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum FontSize {
    /// 12px.
    Small,
    /// 16px.
    #[default]
    Medium,
    /// 20px.
    Large,
}

impl FontSize {
    /// Pixel size.
    pub fn px(self) -> f64 {
        f64::from(u32::from(self))
    }
}

impl From<FontSize> for u32 {
    fn from(value: FontSize) -> Self {
        match value {
            FontSize::Small => 12,
            FontSize::Medium => 16,
            FontSize::Large => 20,
        }
    }
}

impl TryFrom<u32> for FontSize {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            12 => Ok(Self::Small),
            16 => Ok(Self::Medium),
            20 => Ok(Self::Large),
            other => Err(format!("unsupported note font size {other} (expected 12, 16 or 20)")),
        }
    }
}

/// A free-standing text annotation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Top-left x in field units.
    pub x: f64,
    /// Top-left y in field units.
    pub y: f64,
    /// Text content.
    pub text: String,
    /// Font size.
    #[serde(default)]
    pub font_size: FontSize,
    /// Text color.
    pub font_color: Color,
    /// Bold text.
    #[serde(default)]
    pub bold: bool,
    /// Label background color.
    pub background_color: Color,
    /// Draw a black outline around the label.
    #[serde(default)]
    pub border: bool,
}

impl Default for Note {
    fn default() -> Self {
        Self {
            x: 100.0,
            y: 100.0,
            text: "New Note".to_owned(),
            font_size: FontSize::Medium,
            font_color: Color::new("#000000"),
            bold: false,
            background_color: Color::new("#FFFFFF"),
            border: false,
        }
    }
}

impl Note {
    /// Top-left corner as a point.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One editable attribute of a route.
#[derive(Clone, Debug, PartialEq)]
pub enum RouteProperty {
    /// Stroke color.
    Color(Color),
    /// Stroke style.
    Style(RouteStyle),
    /// Stroke thickness (must be finite and > 0).
    Thickness(f64),
    /// End decoration.
    EndMarker(EndMarker),
    /// Smooth/linear rendering.
    Smooth(bool),
    /// Finished flag.
    Finished(bool),
}

/// One editable attribute of a note.
#[derive(Clone, Debug, PartialEq)]
pub enum NoteProperty {
    /// Text content.
    Text(String),
    /// Font size.
    FontSize(FontSize),
    /// Text color.
    FontColor(Color),
    /// Bold flag.
    Bold(bool),
    /// Background color.
    BackgroundColor(Color),
    /// Border flag.
    Border(bool),
}

/// Result of placing a route point for an armed player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoutePoint {
    /// A new route was created at this index.
    Started(usize),
    /// The open route at this index received another point.
    Extended(usize),
}

impl RoutePoint {
    /// Index of the affected route.
    pub fn route_index(self) -> usize {
        match self {
            Self::Started(i) | Self::Extended(i) => i,
        }
    }
}

/// Canonical diagram state.
///
/// Each collection sits behind an `Arc` that is replaced, never mutated in place, whenever the
/// collection changes. Clones are therefore cheap, independent snapshots, and
/// [`Scene::players_changed`] and friends can detect change by pointer identity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    players: Arc<Vec<Player>>,
    routes: Arc<Vec<Route>>,
    notes: Arc<Vec<Note>>,
}

impl Scene {
    /// Build a scene, dropping routes with fewer than two points.
    pub fn new(players: Vec<Player>, routes: Vec<Route>, notes: Vec<Note>) -> Self {
        let before = routes.len();
        let routes: Vec<Route> = routes.into_iter().filter(|r| r.points.len() >= 2).collect();
        if routes.len() != before {
            tracing::warn!(
                dropped = before - routes.len(),
                "dropped routes with fewer than two points"
            );
        }
        Self {
            players: Arc::new(players),
            routes: Arc::new(routes),
            notes: Arc::new(notes),
        }
    }

    /// Players in z-order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Routes in z-order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Notes in z-order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// `true` when the player collection differs by identity from `prev`.
    pub fn players_changed(&self, prev: &Scene) -> bool {
        !Arc::ptr_eq(&self.players, &prev.players)
    }

    /// `true` when the route collection differs by identity from `prev`.
    pub fn routes_changed(&self, prev: &Scene) -> bool {
        !Arc::ptr_eq(&self.routes, &prev.routes)
    }

    /// `true` when the note collection differs by identity from `prev`.
    pub fn notes_changed(&self, prev: &Scene) -> bool {
        !Arc::ptr_eq(&self.notes, &prev.notes)
    }

    /// Independent copy of the full scene.
    pub fn snapshot(&self) -> Scene {
        self.clone()
    }

    /// Index of the player a route label resolves to. Duplicate labels resolve to the last one.
    pub fn resolve_player(&self, player_id: &str) -> Option<usize> {
        self.players.iter().rposition(|p| p.id == player_id)
    }

    /// Most recently created unfinished route for `player_id`.
    pub fn open_route_for(&self, player_id: &str) -> Option<usize> {
        self.routes
            .iter()
            .rposition(|r| r.player_id == player_id && !r.finished)
    }

    fn edit_players(&mut self, f: impl FnOnce(&mut Vec<Player>)) {
        let mut next = self.players.as_ref().clone();
        f(&mut next);
        self.players = Arc::new(next);
    }

    fn edit_routes(&mut self, f: impl FnOnce(&mut Vec<Route>)) {
        let mut next = self.routes.as_ref().clone();
        f(&mut next);
        self.routes = Arc::new(next);
    }

    fn edit_notes(&mut self, f: impl FnOnce(&mut Vec<Note>)) {
        let mut next = self.notes.as_ref().clone();
        f(&mut next);
        self.notes = Arc::new(next);
    }

    /// Move a player, clamped so the token stays inside the field.
    pub fn move_player(&mut self, index: usize, to: Point, field: FieldSize) -> bool {
        if index >= self.players.len() {
            return false;
        }
        let p = clamp_to_field(to, PLAYER_RADIUS, field);
        self.edit_players(|players| {
            players[index].x = p.x;
            players[index].y = p.y;
        });
        true
    }

    /// Relabel a player. Empty (after trimming) labels are ignored; longer ones are truncated.
    pub fn set_player_label(&mut self, index: usize, label: &str) -> bool {
        let label: String = label.trim().chars().take(MAX_LABEL_CHARS).collect();
        if label.is_empty() || index >= self.players.len() {
            return false;
        }
        self.edit_players(|players| players[index].id = label);
        true
    }

    /// Change a player's fill color.
    pub fn set_player_fill(&mut self, index: usize, fill: Color) -> bool {
        if index >= self.players.len() {
            return false;
        }
        self.edit_players(|players| players[index].fill = fill);
        true
    }

    /// Change a player's label color.
    pub fn set_player_text_color(&mut self, index: usize, color: Color) -> bool {
        if index >= self.players.len() {
            return false;
        }
        self.edit_players(|players| players[index].text_color = color);
        true
    }

    /// Change a player's token shape.
    pub fn set_player_shape(&mut self, index: usize, shape: Shape) -> bool {
        if index >= self.players.len() {
            return false;
        }
        self.edit_players(|players| players[index].shape = shape);
        true
    }

    /// Flip a player's border flag.
    pub fn toggle_player_border(&mut self, index: usize) -> bool {
        if index >= self.players.len() {
            return false;
        }
        self.edit_players(|players| players[index].border = !players[index].border);
        true
    }

    /// Append `at` to the player's open route, or start one seeded at the player's position.
    pub fn add_route_point(&mut self, player_index: usize, at: Point) -> Option<RoutePoint> {
        let player = self.players.get(player_index)?.clone();
        match self.open_route_for(&player.id) {
            Some(idx) => {
                self.edit_routes(|routes| routes[idx].points.push(at));
                Some(RoutePoint::Extended(idx))
            }
            None => {
                let idx = self.routes.len();
                self.edit_routes(|routes| routes.push(Route::start(&player, at)));
                Some(RoutePoint::Started(idx))
            }
        }
    }

    /// Remove a route entirely.
    pub fn delete_route(&mut self, index: usize) -> Option<Route> {
        let removed = self.routes.get(index)?.clone();
        self.edit_routes(|routes| {
            routes.remove(index);
        });
        Some(removed)
    }

    /// Move one route point, clamped to the field rectangle.
    pub fn move_route_point(
        &mut self,
        route: usize,
        point: usize,
        to: Point,
        field: FieldSize,
    ) -> bool {
        let valid = self
            .routes
            .get(route)
            .is_some_and(|r| point < r.points.len());
        if !valid {
            return false;
        }
        let p = clamp_to_field(to, 0.0, field);
        self.edit_routes(|routes| routes[route].points[point] = p);
        true
    }

    /// Remove one route point. A route that would drop below two points is deleted instead.
    pub fn remove_route_point(&mut self, route: usize, point: usize) -> bool {
        let Some(r) = self.routes.get(route) else {
            return false;
        };
        if point >= r.points.len() {
            return false;
        }
        if r.points.len() <= 2 {
            return self.delete_route(route).is_some();
        }
        self.edit_routes(|routes| {
            routes[route].points.remove(point);
        });
        true
    }

    /// Apply a property edit to a route.
    ///
    /// Reopening a route is refused while the same player already has another open route, and
    /// non-positive thicknesses are ignored.
    pub fn update_route(&mut self, index: usize, prop: RouteProperty) -> bool {
        let Some(route) = self.routes.get(index) else {
            return false;
        };
        match &prop {
            RouteProperty::Thickness(t) if !t.is_finite() || *t <= 0.0 => return false,
            RouteProperty::Finished(false) if route.finished => {
                if self.open_route_for(&route.player_id).is_some() {
                    return false;
                }
            }
            _ => {}
        }
        self.edit_routes(|routes| {
            let r = &mut routes[index];
            match prop {
                RouteProperty::Color(c) => r.color = c,
                RouteProperty::Style(s) => r.style = s,
                RouteProperty::Thickness(t) => r.thickness = t,
                RouteProperty::EndMarker(m) => r.end_marker = m,
                RouteProperty::Smooth(s) => r.smooth = s,
                RouteProperty::Finished(f) => r.finished = f,
            }
        });
        true
    }

    /// Append a note and return its index.
    pub fn add_note(&mut self, note: Note) -> usize {
        let idx = self.notes.len();
        self.edit_notes(|notes| notes.push(note));
        idx
    }

    /// Move a note's top-left corner.
    pub fn move_note(&mut self, index: usize, to: Point) -> bool {
        if index >= self.notes.len() {
            return false;
        }
        self.edit_notes(|notes| {
            notes[index].x = to.x;
            notes[index].y = to.y;
        });
        true
    }

    /// Apply a property edit to a note.
    pub fn update_note(&mut self, index: usize, prop: NoteProperty) -> bool {
        if index >= self.notes.len() {
            return false;
        }
        self.edit_notes(|notes| {
            let n = &mut notes[index];
            match prop {
                NoteProperty::Text(t) => n.text = t,
                NoteProperty::FontSize(s) => n.font_size = s,
                NoteProperty::FontColor(c) => n.font_color = c,
                NoteProperty::Bold(b) => n.bold = b,
                NoteProperty::BackgroundColor(c) => n.background_color = c,
                NoteProperty::Border(b) => n.border = b,
            }
        });
        true
    }

    /// Copy of the scene with every route thickness multiplied by `factor`.
    pub fn with_route_thickness_scaled(&self, factor: f64) -> Scene {
        let mut out = self.clone();
        out.edit_routes(|routes| {
            for r in routes.iter_mut() {
                r.thickness *= factor;
            }
        });
        out
    }
}

mod flat_points {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::foundation::core::Point;

    pub(super) fn serialize<S>(points: &[Point], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(points.iter().flat_map(|p| [p.x, p.y]))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Point>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let flat = Vec::<f64>::deserialize(deserializer)?;
        if flat.len() % 2 != 0 {
            return Err(D::Error::custom(
                "route points must hold an even number of coordinates",
            ));
        }
        Ok(flat.chunks_exact(2).map(|c| Point::new(c[0], c[1])).collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
