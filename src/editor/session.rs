use serde::{Deserialize, Serialize};

use crate::animation::clock::{FrameClock, Ticker};
use crate::animation::playback::{DEFAULT_SPEED, PlaybackEngine};
use crate::editor::authoring::{
    Action, AuthoringState, DragTarget, Gesture, PointerInput, Transition, transition,
};
use crate::editor::history::History;
use crate::editor::notice::{Notices, SAVE_FAILED_MESSAGE, SAVED_MESSAGE};
use crate::editor::persist::{
    AuthStatus, PlayRecord, PlayState, PlayStore, SaveContext, SavedPlay, generate_play_id,
    normalize_tags,
};
use crate::editor::selection::Selection;
use crate::export::compositor::{Compositor, ExportImage, ExportOptions, export_file_name};
use crate::foundation::core::{Color, FieldSize, PLAYER_RADIUS, Point};
use crate::foundation::error::{PlayError, PlayResult};
use crate::foundation::math::clamp_to_field;
use crate::render::projector::{
    DisplayList, Hit, SELECTION_RING_SPIN, SceneView, Viewport, hit_test,
};
use crate::render::surface::{RenderSurface, SurfaceOptions};
use crate::scene::defense::{DefenseOverlay, Formation};
use crate::scene::model::{NoteProperty, RouteProperty, Scene, Shape};
use crate::scene::template::template_scene;

/// Route thickness multiplier used for the print artifact stored with every save.
pub const THICKNESS_MULTIPLIER: f64 = 2.0;

/// Aspect ratio of the images stored with a save.
pub const SAVE_EXPORT_RATIO: f64 = 4.0 / 3.0;

/// Editor tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Field dimensions in field units.
    pub field: FieldSize,
    /// Playback speed in field units per second.
    pub speed: f64,
    /// Lifetime of the "saved" toast.
    pub toast_secs: f64,
    /// Lifetime of the save-failure banner.
    pub error_secs: f64,
    /// Route thickness multiplier for the print image.
    pub print_thickness_multiplier: f64,
    /// Aspect ratio of the saved images.
    pub export_ratio: f64,
    /// Export layout.
    pub export: ExportOptions,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            field: FieldSize::STANDARD,
            speed: DEFAULT_SPEED,
            toast_secs: 3.0,
            error_secs: 5.0,
            print_thickness_multiplier: THICKNESS_MULTIPLIER,
            export_ratio: SAVE_EXPORT_RATIO,
            export: ExportOptions::default(),
        }
    }
}

fn check_color(color: &Color) -> PlayResult<()> {
    if color.is_well_formed() {
        Ok(())
    } else {
        Err(PlayError::validation(format!("malformed color '{color}'")))
    }
}

/// One play being edited: canonical scene, undo history, selection, pointer gestures, playback,
/// the render surface and the save/export flows.
///
/// Everything runs on the caller's thread; hosts feed pointer events and clock ticks in and read
/// the display list back out.
#[derive(Debug)]
pub struct PlayEditor {
    config: EditorConfig,
    scene: Scene,
    history: History,
    selection: Selection,

    gesture: Gesture,
    preview: Option<(DragTarget, Point)>,
    drag_before: Option<Scene>,
    crosshair: Option<Point>,
    ring_angle: f64,

    name: String,
    tags_text: String,
    play_id: Option<String>,
    saved: Option<PlayState>,
    is_saving: bool,
    notices: Notices,
    ticker: Ticker,

    playback: PlaybackEngine,
    reset_flag: u64,
    defense: DefenseOverlay,

    surface: Option<RenderSurface>,
    compositor: Option<Compositor>,
}

impl Default for PlayEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl PlayEditor {
    /// Editor holding the template roster, with the initial state treated as saved.
    pub fn new(config: EditorConfig) -> Self {
        let scene = template_scene(config.field);
        let playback = PlaybackEngine::new(config.speed);
        let mut editor = Self {
            history: History::new(scene.clone()),
            scene,
            selection: Selection::None,
            gesture: Gesture::Idle,
            preview: None,
            drag_before: None,
            crosshair: None,
            ring_angle: 0.0,
            name: String::new(),
            tags_text: String::new(),
            play_id: None,
            saved: None,
            is_saving: false,
            notices: Notices::default(),
            ticker: Ticker::default(),
            playback,
            reset_flag: 0,
            defense: DefenseOverlay::default(),
            surface: None,
            compositor: None,
            config,
        };
        editor.saved = Some(editor.current_state());
        editor
    }

    /// Editor seeded from a play record.
    pub fn from_record(config: EditorConfig, record: PlayRecord) -> Self {
        let mut editor = Self::new(config);
        editor.load_play(record);
        editor
    }

    /// Editor configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Canonical scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Current selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Authoring mode implied by the selection.
    pub fn authoring_state(&self) -> AuthoringState {
        AuthoringState::from(self.selection)
    }

    /// In-progress pointer gesture.
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Drag guide position while dragging.
    pub fn crosshair(&self) -> Option<Point> {
        self.crosshair
    }

    /// Play name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw comma-separated tag field.
    pub fn tags_text(&self) -> &str {
        &self.tags_text
    }

    /// Store id, once loaded or saved.
    pub fn play_id(&self) -> Option<&str> {
        self.play_id.as_deref()
    }

    /// `true` while a save is exporting or writing.
    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    /// Toast and error banner.
    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    /// Undo stack depth, including the base entry.
    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }

    /// `true` when [`PlayEditor::undo`] would change the scene.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Playback engine.
    pub fn playback(&self) -> &PlaybackEngine {
        &self.playback
    }

    /// Playback reset counter.
    pub fn reset_flag(&self) -> u64 {
        self.reset_flag
    }

    /// Defensive overlay.
    pub fn defense(&self) -> &DefenseOverlay {
        &self.defense
    }

    // ----------------------------
    // Surface
    // ----------------------------

    /// Create the render surface. Until this is called, exports resolve to `None`.
    pub fn attach_surface(&mut self, opts: SurfaceOptions) {
        self.surface = Some(RenderSurface::new(self.config.field, opts));
        self.redraw();
    }

    /// Drop the render surface.
    pub fn detach_surface(&mut self) -> Option<RenderSurface> {
        self.surface.take()
    }

    /// Render surface, if attached.
    pub fn surface(&self) -> Option<&RenderSurface> {
        self.surface.as_ref()
    }

    /// Refit the surface to a new container width.
    pub fn resize(&mut self, container_width: f64) {
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(container_width);
        }
    }

    /// Field-to-screen mapping; scale 1 without a surface.
    pub fn viewport(&self) -> Viewport {
        match &self.surface {
            Some(surface) => surface.viewport(),
            None => Viewport::fit(self.config.field, self.config.field.width),
        }
    }

    /// Everything currently visible: canonical scene plus playback, drag previews and overlays.
    pub fn view(&self) -> SceneView {
        let mut player_positions = self.playback.visual_positions(&self.scene);
        let mut note_positions = Vec::new();
        match self.preview {
            Some((DragTarget::Player(i), p)) => {
                if let Some(slot) = player_positions.get_mut(i) {
                    *slot = p;
                }
            }
            Some((DragTarget::Note(i), p)) => {
                note_positions = self.scene.notes().iter().map(|n| n.position()).collect();
                if let Some(slot) = note_positions.get_mut(i) {
                    *slot = p;
                }
            }
            _ => {}
        }
        SceneView {
            scene: self.scene.clone(),
            selection: self.selection,
            player_positions,
            note_positions,
            defense: self.defense.markers().to_vec(),
            crosshair: self.crosshair,
            ring_angle: self.ring_angle,
        }
    }

    fn redraw(&mut self) {
        let view = self.view();
        if let Some(surface) = self.surface.as_mut() {
            surface.draw(view);
        }
    }

    /// Last projected display list, if a surface exists.
    pub fn render(&self) -> Option<&DisplayList> {
        self.surface.as_ref().map(RenderSurface::display_list)
    }

    // ----------------------------
    // Mutations
    // ----------------------------

    /// Apply `f` to the scene and record the pre-mutation snapshot if anything changed.
    fn commit(
        &mut self,
        what: &'static str,
        f: impl FnOnce(&mut Scene, FieldSize) -> bool,
    ) -> bool {
        let before = self.scene.clone();
        if !f(&mut self.scene, self.config.field) || self.scene == before {
            self.scene = before;
            return false;
        }
        self.history.push(before);
        tracing::debug!(action = what, "scene updated");
        self.redraw();
        true
    }

    /// Select an entity directly (keyboard or list UI). Out-of-range indices are ignored.
    pub fn select(&mut self, selection: Selection) -> bool {
        let valid = match selection {
            Selection::None => true,
            Selection::Player(i) => i < self.scene.players().len(),
            Selection::Route(i) => i < self.scene.routes().len(),
            Selection::Note(i) => i < self.scene.notes().len(),
        };
        if valid {
            self.selection = selection;
            self.redraw();
        }
        valid
    }

    fn selected_player(&self) -> Option<usize> {
        self.selection.player()
    }

    /// Rename the selected player. Empty labels are ignored; routes keep their old player id.
    pub fn set_player_label(&mut self, label: &str) -> bool {
        let Some(i) = self.selected_player() else {
            return false;
        };
        self.commit("label", |s, _| s.set_player_label(i, label))
    }

    /// Change the selected player's fill.
    pub fn set_player_fill(&mut self, color: Color) -> PlayResult<bool> {
        check_color(&color)?;
        let Some(i) = self.selected_player() else {
            return Ok(false);
        };
        Ok(self.commit("fill", |s, _| s.set_player_fill(i, color)))
    }

    /// Change the selected player's label color.
    pub fn set_player_text_color(&mut self, color: Color) -> PlayResult<bool> {
        check_color(&color)?;
        let Some(i) = self.selected_player() else {
            return Ok(false);
        };
        Ok(self.commit("text color", |s, _| s.set_player_text_color(i, color)))
    }

    /// Change the selected player's shape.
    pub fn set_player_shape(&mut self, shape: Shape) -> bool {
        let Some(i) = self.selected_player() else {
            return false;
        };
        self.commit("shape", |s, _| s.set_player_shape(i, shape))
    }

    /// Toggle the selected player's outline.
    pub fn toggle_player_border(&mut self) -> bool {
        let Some(i) = self.selected_player() else {
            return false;
        };
        self.commit("border", |s, _| s.toggle_player_border(i))
    }

    /// Move a player, clamped so the token stays on the field.
    pub fn move_player(&mut self, index: usize, to: Point) -> bool {
        self.commit("move player", |s, field| s.move_player(index, to, field))
    }

    /// Edit the selected route.
    pub fn update_selected_route(&mut self, prop: RouteProperty) -> PlayResult<bool> {
        if let RouteProperty::Color(c) = &prop {
            check_color(c)?;
        }
        let Some(i) = self.selection.route() else {
            return Ok(false);
        };
        Ok(self.commit("route property", |s, _| s.update_route(i, prop)))
    }

    /// Delete the selected route.
    pub fn delete_selected_route(&mut self) -> bool {
        let Some(i) = self.selection.route() else {
            return false;
        };
        let deleted = self.commit("delete route", |s, _| s.delete_route(i).is_some());
        if deleted {
            self.selection = Selection::None;
            self.redraw();
        }
        deleted
    }

    /// Remove one point of the selected route; a two-point route is deleted instead.
    pub fn remove_selected_route_point(&mut self, point: usize) -> bool {
        let Some(i) = self.selection.route() else {
            return false;
        };
        let before = self.scene.routes().len();
        let changed = self.commit("remove route point", |s, _| s.remove_route_point(i, point));
        if changed && self.scene.routes().len() < before {
            self.selection = Selection::None;
            self.redraw();
        }
        changed
    }

    /// Add a default note and return its index.
    pub fn add_note(&mut self) -> usize {
        let mut index = 0;
        self.commit("add note", |s, _| {
            index = s.add_note(Default::default());
            true
        });
        index
    }

    /// Edit the selected note.
    pub fn update_selected_note(&mut self, prop: NoteProperty) -> PlayResult<bool> {
        if let NoteProperty::FontColor(c) | NoteProperty::BackgroundColor(c) = &prop {
            check_color(c)?;
        }
        let Some(i) = self.selection.note() else {
            return Ok(false);
        };
        Ok(self.commit("note property", |s, _| s.update_note(i, prop)))
    }

    /// Restore the snapshot below the top of the history stack. No-op at the base.
    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.history.undo() else {
            return false;
        };
        self.scene = prev.clone();
        self.selection = Selection::None;
        self.clear_gesture();
        self.redraw();
        true
    }

    /// Start over from the template roster. History collapses to that single state.
    ///
    /// A new play has never been saved, so it reports unsaved changes until the first save.
    pub fn new_play(&mut self) {
        let scene = template_scene(self.config.field);
        self.history.reset(scene.clone());
        self.scene = scene;
        self.name.clear();
        self.tags_text.clear();
        self.play_id = None;
        self.saved = None;
        self.after_replace();
        tracing::info!("new play");
    }

    /// Replace the editor contents with `record`. The loaded state becomes the saved baseline.
    pub fn load_play(&mut self, record: PlayRecord) {
        let (id, state) = record.into_state(self.config.field);
        self.history.reset(state.scene.clone());
        self.scene = state.scene;
        self.name = state.name;
        self.tags_text = state.tags.join(", ");
        self.play_id = id;
        self.saved = Some(self.current_state());
        self.after_replace();
        tracing::info!(id = ?self.play_id, name = %self.name, "loaded play");
    }

    /// Parse and load a JSON play record.
    pub fn load_play_json(&mut self, json: &str) -> PlayResult<()> {
        let record = PlayRecord::from_json(json)?;
        self.load_play(record);
        Ok(())
    }

    fn after_replace(&mut self) {
        self.selection = Selection::None;
        self.notices.clear();
        self.clear_gesture();
        self.reset_playback();
    }

    /// Set the play name.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }

    /// Set the comma-separated tag field.
    pub fn set_tags_text(&mut self, text: &str) {
        self.tags_text = text.to_owned();
    }

    // ----------------------------
    // Pointer input
    // ----------------------------

    fn clear_gesture(&mut self) {
        self.gesture = Gesture::Idle;
        self.preview = None;
        self.drag_before = None;
        self.crosshair = None;
    }

    fn anchor_of(&self, view: &SceneView, hit: Hit, at: Point) -> Point {
        match hit {
            Hit::Player(i) => view.player_position(i),
            Hit::Note(i) => view.note_position(i),
            Hit::Handle { route, point } => self
                .scene
                .routes()
                .get(route)
                .and_then(|r| r.points.get(point).copied())
                .unwrap_or(at),
            Hit::Defense(i) => self.defense.markers().get(i).copied().unwrap_or(at),
            Hit::Route(_) | Hit::Empty => at,
        }
    }

    /// Pointer pressed at a screen position.
    pub fn pointer_down(&mut self, screen: Point) {
        let at = self.viewport().to_field(screen);
        let view = self.view();
        let hit = hit_test(&view, at);
        let anchor = self.anchor_of(&view, hit, at);
        tracing::trace!(?hit, x = at.x, y = at.y, "pointer down");
        self.feed(PointerInput::Down { hit, at, anchor });
    }

    /// Pointer moved to a screen position.
    pub fn pointer_move(&mut self, screen: Point) {
        let at = self.viewport().to_field(screen);
        self.feed(PointerInput::Move(at));
    }

    /// Pointer released at a screen position.
    pub fn pointer_up(&mut self, screen: Point) {
        let at = self.viewport().to_field(screen);
        self.feed(PointerInput::Up(at));
    }

    /// Pointer gesture aborted by the host.
    pub fn pointer_cancel(&mut self) {
        self.feed(PointerInput::Cancel);
    }

    fn feed(&mut self, input: PointerInput) {
        let Transition { gesture, actions } = transition(self.gesture, self.selection, input);
        self.gesture = gesture;
        for action in actions {
            self.apply(action);
        }
        self.redraw();
    }

    fn apply(&mut self, action: Action) {
        let field = self.config.field;
        match action {
            Action::Select(sel) => {
                self.selection = sel;
            }
            Action::ClearNoteSelection => {
                if self.selection.note().is_some() {
                    self.selection = Selection::None;
                }
            }
            Action::PlaceRoutePoint { player, at } => {
                let mut placed = None;
                self.commit("route point", |s, _| {
                    placed = s.add_route_point(player, at);
                    placed.is_some()
                });
                tracing::debug!(player, ?placed, "route point placed");
            }
            Action::BeginDrag(target) => {
                self.drag_before = Some(self.scene.clone());
                tracing::debug!(?target, "drag started");
            }
            Action::DragTo { target, to } => self.drag_to(target, to, field),
            Action::EndDrag { target, to } => {
                self.drag_to(target, to, field);
                match self.preview.take() {
                    Some((DragTarget::Player(i), p)) => {
                        self.scene.move_player(i, p, field);
                    }
                    Some((DragTarget::Note(i), p)) => {
                        self.scene.move_note(i, p);
                    }
                    _ => {}
                }
                if let Some(before) = self.drag_before.take()
                    && before != self.scene
                {
                    self.history.push(before);
                }
                self.crosshair = None;
                tracing::debug!(?target, "drag finished");
            }
            Action::CancelDrag(target) => {
                if let Some(before) = self.drag_before.take() {
                    self.scene = before;
                }
                self.preview = None;
                self.crosshair = None;
                tracing::debug!(?target, "drag cancelled");
            }
        }
    }

    fn drag_to(&mut self, target: DragTarget, to: Point, field: FieldSize) {
        let shown = match target {
            DragTarget::Player(i) => {
                let p = clamp_to_field(to, PLAYER_RADIUS, field);
                self.preview = Some((DragTarget::Player(i), p));
                p
            }
            DragTarget::Note(i) => {
                self.preview = Some((DragTarget::Note(i), to));
                to
            }
            DragTarget::Handle { route, point } => {
                self.scene.move_route_point(route, point, to, field);
                clamp_to_field(to, 0.0, field)
            }
            DragTarget::Defense(i) => {
                self.defense.move_marker(i, to, field);
                self.defense.markers().get(i).copied().unwrap_or(to)
            }
        };
        self.crosshair = Some(shown);
    }

    // ----------------------------
    // Overlays and playback
    // ----------------------------

    /// Show a defensive formation. Not recorded in history or saves.
    pub fn set_defense_formation(&mut self, formation: Formation) {
        self.defense.set_formation(formation, self.config.field);
        self.redraw();
    }

    /// Set the play/pause flag at `clock`'s current time; the first start builds tracks from the
    /// current routes.
    pub fn set_playing(&mut self, playing: bool, clock: &dyn FrameClock) {
        self.playback.set_playing(playing, &self.scene, clock);
        self.redraw();
    }

    /// Flip the play/pause flag.
    pub fn toggle_playback(&mut self, clock: &dyn FrameClock) {
        self.set_playing(!self.playback.is_playing(), clock);
    }

    /// Bump the reset counter, which unconditionally resets playback.
    pub fn reset_playback(&mut self) {
        self.reset_flag += 1;
        self.playback.sync_reset_flag(self.reset_flag);
        self.redraw();
    }

    /// Advance playback, notices and the selection ring spin to `clock`'s current time.
    pub fn tick(&mut self, clock: &dyn FrameClock) {
        let dt = self.ticker.tick(clock);
        self.notices.advance(dt);
        if self.selection.player().is_some() {
            self.ring_angle = (self.ring_angle + dt * SELECTION_RING_SPIN) % std::f64::consts::TAU;
        }
        self.playback.tick(clock);
        self.redraw();
    }

    // ----------------------------
    // Dirty tracking, export and saving
    // ----------------------------

    /// Scene, name and normalized tags as they stand now.
    pub fn current_state(&self) -> PlayState {
        PlayState {
            scene: self.scene.clone(),
            name: self.name.clone(),
            tags: normalize_tags(&self.tags_text),
        }
    }

    /// `true` when the current state differs from the last saved (or loaded) state.
    pub fn is_dirty(&self) -> bool {
        self.saved
            .as_ref()
            .is_none_or(|saved| *saved != self.current_state())
    }

    /// Hosts call this before closing to decide whether to warn.
    pub fn has_unsaved_changes(&self) -> bool {
        self.is_dirty()
    }

    /// Export at `ratio` with normal route thickness. `Ok(None)` when no surface is attached.
    pub fn export(&mut self, ratio: f64) -> PlayResult<Option<ExportImage>> {
        self.export_with(ratio, 1.0)
    }

    /// Suggested file name for exports of this play.
    pub fn export_file_name(&self) -> String {
        export_file_name(&self.name)
    }

    fn export_with(&mut self, ratio: f64, thickness: f64) -> PlayResult<Option<ExportImage>> {
        self.redraw();
        let compositor = self
            .compositor
            .get_or_insert_with(|| Compositor::new(self.config.export.clone()));
        compositor.export(self.surface.as_mut(), &self.name, ratio, thickness)
    }

    fn require_uid(auth: &AuthStatus, request_sign_in: &mut dyn FnMut()) -> PlayResult<String> {
        match auth {
            AuthStatus::SignedIn { uid } => Ok(uid.clone()),
            AuthStatus::SignedOut => {
                tracing::warn!("save attempted while signed out");
                request_sign_in();
                Err(PlayError::SignInRequired)
            }
        }
    }

    /// Save under the current id (or a fresh one) and name.
    pub fn save(&mut self, ctx: SaveContext<'_>) -> PlayResult<String> {
        if self.name.trim().is_empty() {
            tracing::warn!("save rejected: empty play name");
            return Err(PlayError::validation("Please provide a name for your play."));
        }
        let uid = Self::require_uid(ctx.auth, ctx.request_sign_in)?;
        let id = self.play_id.clone().unwrap_or_else(generate_play_id);
        let name = self.name.clone();
        self.persist(ctx.store, &uid, id, name)
    }

    /// Save a copy under a fresh id. An empty `new_name` keeps the current name.
    pub fn save_as(&mut self, new_name: &str, ctx: SaveContext<'_>) -> PlayResult<String> {
        let uid = Self::require_uid(ctx.auth, ctx.request_sign_in)?;
        let name = match new_name.trim() {
            "" => self.name.trim().to_owned(),
            n => n.to_owned(),
        };
        if name.is_empty() {
            tracing::warn!("save-as rejected: empty play name");
            return Err(PlayError::validation("Please provide a name for your play."));
        }
        self.persist(ctx.store, &uid, generate_play_id(), name)
    }

    fn persist(
        &mut self,
        store: &mut dyn PlayStore,
        uid: &str,
        id: String,
        name: String,
    ) -> PlayResult<String> {
        self.is_saving = true;
        let result = self.write_play(store, uid, &id, &name);
        self.is_saving = false;

        match result {
            Ok(()) => {
                self.play_id = Some(id.clone());
                self.name = name;
                self.saved = Some(self.current_state());
                self.notices.show_toast(SAVED_MESSAGE, self.config.toast_secs);
                tracing::info!(%id, name = %self.name, "play saved");
                Ok(id)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to save play");
                self.notices
                    .show_error(SAVE_FAILED_MESSAGE, self.config.error_secs);
                Err(err)
            }
        }
    }

    fn write_play(
        &mut self,
        store: &mut dyn PlayStore,
        uid: &str,
        id: &str,
        name: &str,
    ) -> PlayResult<()> {
        let ratio = self.config.export_ratio;
        let image = self.export_with(ratio, 1.0)?.map(|i| i.data_url());
        let print_image = self
            .export_with(ratio, self.config.print_thickness_multiplier)?
            .map(|i| i.data_url());

        let mut state = self.current_state();
        state.name = name.to_owned();
        store.save(uid, &SavedPlay::new(id, &state, image, print_image))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
