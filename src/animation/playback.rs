use crate::animation::clock::{FrameClock, Ticker};
use crate::foundation::core::Point;
use crate::foundation::math::lerp_point;
use crate::scene::model::{Route, Scene};

/// Reference playback speed in field units per second.
pub const DEFAULT_SPEED: f64 = 200.0;

/// Lifecycle of one route's animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackState {
    /// Built but never started.
    Stopped,
    /// Advancing with the frame clock.
    Playing,
    /// Frozen mid-segment; resumes from the same progress.
    Paused,
    /// Reached the last point.
    Finished,
}

/// One straight leg of a route, traversed at constant speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
    /// Seconds needed to traverse the leg.
    pub duration: f64,
}

/// Split a route into segments whose duration is `length / speed`.
pub fn route_segments(route: &Route, speed: f64) -> Vec<Segment> {
    route
        .points
        .windows(2)
        .map(|w| Segment {
            from: w[0],
            to: w[1],
            duration: w[0].distance(w[1]) / speed,
        })
        .collect()
}

/// Total playback time of a route at `speed`.
pub fn route_duration(route: &Route, speed: f64) -> f64 {
    route.length() / speed
}

/// Animation state for one route: a chain of segments with exactly one active at a time.
#[derive(Clone, Debug)]
pub struct RouteTrack {
    route_index: usize,
    player_index: usize,
    segments: Vec<Segment>,
    active: usize,
    elapsed: f64,
    state: TrackState,
}

impl RouteTrack {
    fn new(route_index: usize, player_index: usize, segments: Vec<Segment>) -> Self {
        Self {
            route_index,
            player_index,
            segments,
            active: 0,
            elapsed: 0.0,
            state: TrackState::Stopped,
        }
    }

    /// Index of the route this track was built from.
    pub fn route_index(&self) -> usize {
        self.route_index
    }

    /// Index of the animated player.
    pub fn player_index(&self) -> usize {
        self.player_index
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TrackState {
        self.state
    }

    /// Index of the active segment (equals the segment count once finished).
    pub fn active_segment(&self) -> usize {
        self.active
    }

    /// Sum of all segment durations.
    pub fn total_duration(&self) -> f64 {
        self.segments.iter().map(|s| s.duration).sum()
    }

    /// Interpolated visual position.
    pub fn position(&self) -> Point {
        let Some(seg) = self.segments.get(self.active) else {
            return self.segments.last().map(|s| s.to).unwrap_or_default();
        };
        let t = if seg.duration > 0.0 {
            (self.elapsed / seg.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        lerp_point(seg.from, seg.to, t)
    }

    fn advance(&mut self, dt: f64) {
        if self.state != TrackState::Playing {
            return;
        }
        let mut remaining = dt;
        while let Some(seg) = self.segments.get(self.active) {
            let left = seg.duration - self.elapsed;
            if remaining < left {
                self.elapsed += remaining;
                return;
            }
            // Leftover time carries into the next segment.
            remaining -= left;
            self.active += 1;
            self.elapsed = 0.0;
        }
        self.state = TrackState::Finished;
    }
}

/// Drives player tokens along their routes without touching canonical positions.
///
/// Tracks are built lazily from the route geometry present when playback first starts; later
/// edits only apply after a reset.
#[derive(Clone, Debug)]
pub struct PlaybackEngine {
    speed: f64,
    tracks: Vec<RouteTrack>,
    playing: bool,
    reset_seen: u64,
    ticker: Ticker,
}

impl Default for PlaybackEngine {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED)
    }
}

impl PlaybackEngine {
    /// Engine moving tokens at `speed` field units per second. Non-positive speeds fall back to
    /// [`DEFAULT_SPEED`].
    pub fn new(speed: f64) -> Self {
        let speed = if speed.is_finite() && speed > 0.0 {
            speed
        } else {
            DEFAULT_SPEED
        };
        Self {
            speed,
            tracks: Vec::new(),
            playing: false,
            reset_seen: 0,
            ticker: Ticker::default(),
        }
    }

    /// Playback speed in field units per second.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Current play/pause flag.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Built tracks, in route order.
    pub fn tracks(&self) -> &[RouteTrack] {
        &self.tracks
    }

    /// `true` once every built track reached its last point.
    pub fn is_finished(&self) -> bool {
        !self.tracks.is_empty() && self.tracks.iter().all(|t| t.state == TrackState::Finished)
    }

    fn build(&mut self, scene: &Scene) {
        self.tracks = scene
            .routes()
            .iter()
            .enumerate()
            .filter_map(|(idx, route)| {
                let player = scene.resolve_player(&route.player_id)?;
                Some(RouteTrack::new(idx, player, route_segments(route, self.speed)))
            })
            .collect();
        tracing::debug!(tracks = self.tracks.len(), "built playback tracks");
    }

    /// Flip the play/pause flag at `clock`'s current time. Starting with no tracks builds them
    /// from `scene`.
    ///
    /// Playing tracks are first advanced to the current time, so a pause freezes where the
    /// tokens are now and a start counts from this moment rather than from the next tick.
    pub fn set_playing(&mut self, playing: bool, scene: &Scene, clock: &dyn FrameClock) {
        self.tick(clock);
        if playing {
            if self.tracks.is_empty() {
                self.build(scene);
            }
            for t in &mut self.tracks {
                if matches!(t.state, TrackState::Stopped | TrackState::Paused) {
                    t.state = TrackState::Playing;
                }
            }
        } else {
            for t in &mut self.tracks {
                if t.state == TrackState::Playing {
                    t.state = TrackState::Paused;
                }
            }
        }
        self.playing = playing;
    }

    /// Start or resume playback.
    pub fn play(&mut self, scene: &Scene, clock: &dyn FrameClock) {
        self.set_playing(true, scene, clock);
    }

    /// Freeze every active segment at `clock`'s current time.
    pub fn pause(&mut self, clock: &dyn FrameClock) {
        self.tick(clock);
        for t in &mut self.tracks {
            if t.state == TrackState::Playing {
                t.state = TrackState::Paused;
            }
        }
        self.playing = false;
    }

    /// Drop all tracks and progress; tokens snap back to canonical positions.
    pub fn reset(&mut self) {
        self.tracks.clear();
        self.playing = false;
        self.ticker.rebase();
        tracing::debug!("playback reset");
    }

    /// Reset whenever `flag` differs from the last observed value.
    pub fn sync_reset_flag(&mut self, flag: u64) {
        if flag != self.reset_seen {
            self.reset_seen = flag;
            self.reset();
        }
    }

    /// Advance playing tracks by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        if !self.playing || dt.is_nan() || dt <= 0.0 {
            return;
        }
        for t in &mut self.tracks {
            t.advance(dt);
        }
    }

    /// Sample `clock` and advance by the elapsed time since the previous tick.
    pub fn tick(&mut self, clock: &dyn FrameClock) {
        let dt = self.ticker.tick(clock);
        self.advance(dt);
    }

    /// Visual position of every player: canonical unless a started track moves it.
    ///
    /// When several routes animate the same player, the later route wins.
    pub fn visual_positions(&self, scene: &Scene) -> Vec<Point> {
        let mut out: Vec<Point> = scene.players().iter().map(|p| p.position()).collect();
        for t in &self.tracks {
            if t.state == TrackState::Stopped {
                continue;
            }
            if let Some(slot) = out.get_mut(t.player_index) {
                *slot = t.position();
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/playback.rs"]
mod tests;
