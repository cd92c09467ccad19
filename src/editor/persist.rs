//! Boundary with the external play store: loadable records, saved payloads, tags and ids.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::foundation::core::FieldSize;
use crate::foundation::error::{PlayError, PlayResult};
use crate::scene::model::{Note, Player, Route, Scene};
use crate::scene::template::template_players;

/// A play as supplied by the host. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayRecord {
    /// Store identifier.
    pub id: Option<String>,
    /// Roster; the template roster when missing.
    pub players: Option<Vec<Player>>,
    /// Routes; empty when missing.
    pub routes: Option<Vec<Route>>,
    /// Notes; empty when missing.
    pub notes: Option<Vec<Note>>,
    /// Play name; empty when missing.
    pub name: Option<String>,
    /// Tags; empty when missing.
    pub tags: Option<Vec<String>>,
}

impl PlayRecord {
    /// Parse a record from JSON. Saved payloads (with image fields) parse as well.
    pub fn from_json(json: &str) -> PlayResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Fill in defaults for missing fields.
    pub fn into_state(self, field: FieldSize) -> (Option<String>, PlayState) {
        let players = self.players.unwrap_or_else(|| template_players(field));
        let scene = Scene::new(
            players,
            self.routes.unwrap_or_default(),
            self.notes.unwrap_or_default(),
        );
        let state = PlayState {
            scene,
            name: self.name.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
        };
        (self.id, state)
    }
}

/// Everything the dirty indicator compares: scene plus name and normalized tags.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayState {
    /// Players, routes and notes.
    pub scene: Scene,
    /// Play name.
    pub name: String,
    /// Normalized tags.
    pub tags: Vec<String>,
}

/// Payload handed to the store on save.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPlay {
    /// Store identifier.
    pub id: String,
    /// Roster.
    pub players: Vec<Player>,
    /// Routes.
    pub routes: Vec<Route>,
    /// Notes.
    pub notes: Vec<Note>,
    /// Play name.
    pub name: String,
    /// Normalized tags.
    pub tags: Vec<String>,
    /// PNG data URL at normal thickness; `None` when no surface was available.
    pub image: Option<String>,
    /// PNG data URL at print thickness.
    pub print_image: Option<String>,
    /// Locked plays are read-only in the library. New saves are never locked.
    pub locked: bool,
}

impl SavedPlay {
    /// Assemble a payload from a play state.
    pub fn new(
        id: impl Into<String>,
        state: &PlayState,
        image: Option<String>,
        print_image: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            players: state.scene.players().to_vec(),
            routes: state.scene.routes().to_vec(),
            notes: state.scene.notes().to_vec(),
            name: state.name.clone(),
            tags: state.tags.clone(),
            image,
            print_image,
            locked: false,
        }
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> PlayResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Split a comma-separated tag field into trimmed, non-empty tags.
pub fn normalize_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Fresh identifier of the form `Play-<unix millis>-<0..999>`.
pub fn generate_play_id() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    // Consecutive ids within one millisecond still differ.
    static SEQ: AtomicU32 = AtomicU32::new(0);
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    let suffix = (now.subsec_nanos() / 1_000).wrapping_add(seq.wrapping_mul(7)) % 1_000;
    format!("Play-{}-{}", now.as_millis(), suffix)
}

/// Who the host says is signed in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthStatus {
    /// Authenticated user.
    SignedIn {
        /// User id the play is stored under.
        uid: String,
    },
    /// No user.
    #[default]
    SignedOut,
}

/// External document store.
pub trait PlayStore {
    /// Persist `play` for `uid`, replacing any play with the same id.
    fn save(&mut self, uid: &str, play: &SavedPlay) -> PlayResult<()>;
}

/// Store keeping plays in memory, keyed by user and play id.
#[derive(Clone, Debug, Default)]
pub struct InMemoryPlayStore {
    plays: BTreeMap<(String, String), SavedPlay>,
    reject: Option<String>,
}

impl InMemoryPlayStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects every save with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            plays: BTreeMap::new(),
            reject: Some(reason.into()),
        }
    }

    /// Look up a stored play.
    pub fn get(&self, uid: &str, id: &str) -> Option<&SavedPlay> {
        self.plays.get(&(uid.to_owned(), id.to_owned()))
    }

    /// Number of stored plays across users.
    pub fn len(&self) -> usize {
        self.plays.len()
    }

    /// `true` when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }
}

impl PlayStore for InMemoryPlayStore {
    fn save(&mut self, uid: &str, play: &SavedPlay) -> PlayResult<()> {
        if let Some(reason) = &self.reject {
            return Err(PlayError::persistence(reason.clone()));
        }
        self.plays
            .insert((uid.to_owned(), play.id.clone()), play.clone());
        Ok(())
    }
}

/// Collaborators a save needs, passed in explicitly by the host.
pub struct SaveContext<'a> {
    /// Current authentication status.
    pub auth: &'a AuthStatus,
    /// Destination store.
    pub store: &'a mut dyn PlayStore,
    /// Called when a save is attempted while signed out.
    pub request_sign_in: &'a mut dyn FnMut(),
}

#[cfg(test)]
#[path = "../../tests/unit/editor/persist.rs"]
mod tests;
