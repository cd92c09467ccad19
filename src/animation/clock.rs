use std::time::Instant;

/// Monotonic time source in seconds, sampled once per frame.
pub trait FrameClock {
    /// Seconds since an arbitrary, fixed origin.
    fn now_secs(&self) -> f64;
}

/// Wall-clock time based on [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start a clock at zero.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn now_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Clock that only moves when told to. Used by tests and offline sampling.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    /// Clock starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `secs` (negative values are ignored).
    pub fn advance(&mut self, secs: f64) {
        self.now += secs.max(0.0);
    }
}

impl FrameClock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now
    }
}

/// Converts successive clock samples into per-frame deltas.
///
/// The first sample after construction or [`Ticker::rebase`] yields a zero delta.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ticker {
    last: Option<f64>,
}

impl Ticker {
    /// Sample the clock and return seconds elapsed since the previous sample.
    pub fn tick(&mut self, clock: &dyn FrameClock) -> f64 {
        let now = clock.now_secs();
        let dt = self.last.map_or(0.0, |prev| (now - prev).max(0.0));
        self.last = Some(now);
        dt
    }

    /// Forget the previous sample.
    pub fn rebase(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
