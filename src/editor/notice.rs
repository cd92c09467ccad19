/// Message shown after a successful save.
pub const SAVED_MESSAGE: &str = "Play saved";

/// Message shown when the store rejects a save.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save play.";

/// A transient message with a countdown.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    message: String,
    remaining: f64,
}

impl Notice {
    /// Message text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Seconds until the notice clears itself.
    pub fn remaining(&self) -> f64 {
        self.remaining
    }
}

/// Toast and error banner slots. Each slot holds at most one notice; showing a new one replaces
/// the old one and restarts its timer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Notices {
    toast: Option<Notice>,
    error: Option<Notice>,
}

impl Notices {
    /// Show a success toast for `secs` seconds.
    pub fn show_toast(&mut self, message: impl Into<String>, secs: f64) {
        self.toast = Some(Notice {
            message: message.into(),
            remaining: secs.max(0.0),
        });
    }

    /// Show an error banner for `secs` seconds.
    pub fn show_error(&mut self, message: impl Into<String>, secs: f64) {
        self.error = Some(Notice {
            message: message.into(),
            remaining: secs.max(0.0),
        });
    }

    /// Count both slots down by `dt` seconds, clearing expired notices.
    pub fn advance(&mut self, dt: f64) {
        if dt.is_nan() || dt <= 0.0 {
            return;
        }
        for slot in [&mut self.toast, &mut self.error] {
            if let Some(n) = slot {
                n.remaining -= dt;
                if n.remaining <= 0.0 {
                    *slot = None;
                }
            }
        }
    }

    /// Current toast, if any.
    pub fn toast(&self) -> Option<&Notice> {
        self.toast.as_ref()
    }

    /// Current error banner, if any.
    pub fn error(&self) -> Option<&Notice> {
        self.error.as_ref()
    }

    /// Drop both notices.
    pub fn clear(&mut self) {
        self.toast = None;
        self.error = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/notice.rs"]
mod tests;
