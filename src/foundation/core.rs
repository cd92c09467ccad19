pub use kurbo::{BezPath, Point, Vec2};

/// Radius used to clamp offensive player tokens inside the field.
pub const PLAYER_RADIUS: f64 = 30.0;

/// Radius used to clamp defensive markers inside the field.
pub const DEFENSE_RADIUS: f64 = 35.0;

/// Distance from the bottom edge of the field to the line of scrimmage.
pub const SCRIMMAGE_OFFSET: f64 = 250.0;

/// Logical field dimensions in field units.
///
/// All canonical geometry (players, routes, notes) is stored in this space, independent of the
/// on-screen scale.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldSize {
    /// Width in field units.
    pub width: f64,
    /// Height in field units.
    pub height: f64,
}

impl FieldSize {
    /// Standard 800x600 field.
    pub const STANDARD: Self = Self {
        width: 800.0,
        height: 600.0,
    };

    /// Horizontal center line.
    pub fn center_x(self) -> f64 {
        self.width / 2.0
    }

    /// Y coordinate of the line of scrimmage.
    pub fn line_of_scrimmage_y(self) -> f64 {
        self.height - SCRIMMAGE_OFFSET
    }
}

impl Default for FieldSize {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A CSS/SVG color string (`#RRGGBB`, `#RGB` or a named color such as `white`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    /// Wrap a color string as-is.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the color string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return `true` for `#RGB`, `#RRGGBB`, `#RRGGBBAA` or a plain alphabetic color name.
    pub fn is_well_formed(&self) -> bool {
        let s = self.0.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
        }
        !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic())
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
