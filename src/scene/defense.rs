use std::str::FromStr;

use crate::foundation::core::{DEFENSE_RADIUS, FieldSize, Point};
use crate::foundation::error::PlayError;
use crate::foundation::math::clamp_to_field;

/// Named defensive alignment shown as an overlay of `D` markers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Formation {
    /// No defenders drawn.
    #[default]
    #[serde(rename = "No")]
    None,
    /// Four linemen, three linebackers.
    #[serde(rename = "4-3")]
    FourThree,
    /// Three linemen, four linebackers.
    #[serde(rename = "3-4")]
    ThreeFour,
    /// Four linemen, two linebackers, five defensive backs.
    #[serde(rename = "Nickel")]
    Nickel,
}

impl Formation {
    /// All formations in menu order.
    pub const ALL: [Formation; 4] = [
        Formation::None,
        Formation::FourThree,
        Formation::ThreeFour,
        Formation::Nickel,
    ];

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "No",
            Self::FourThree => "4-3",
            Self::ThreeFour => "3-4",
            Self::Nickel => "Nickel",
        }
    }

    /// Marker positions for this formation, mirrored around the field center and placed relative
    /// to the line of scrimmage.
    pub fn positions(self, field: FieldSize) -> Vec<Point> {
        let cx = field.center_x();
        let los = field.line_of_scrimmage_y();
        let line = los - 50.0;
        let backers = los - 130.0;
        let corners = los - 90.0;
        let safeties = los - 230.0;

        // (x offset from center, y) pairs.
        let rows: Vec<(f64, f64)> = match self {
            Self::None => vec![],
            Self::FourThree => vec![
                (-150.0, line),
                (-50.0, line),
                (50.0, line),
                (150.0, line),
                (-150.0, backers),
                (0.0, backers),
                (150.0, backers),
                (-300.0, corners),
                (300.0, corners),
                (-100.0, safeties),
                (100.0, safeties),
            ],
            Self::ThreeFour => vec![
                (-100.0, line),
                (0.0, line),
                (100.0, line),
                (-200.0, backers),
                (-50.0, backers),
                (50.0, backers),
                (200.0, backers),
                (-300.0, corners),
                (300.0, corners),
                (-100.0, safeties),
                (100.0, safeties),
            ],
            Self::Nickel => vec![
                (-150.0, line),
                (-50.0, line),
                (50.0, line),
                (150.0, line),
                (-75.0, backers),
                (75.0, backers),
                (-300.0, corners),
                (300.0, corners),
                (200.0, corners - 20.0),
                (-100.0, safeties),
                (100.0, safeties),
            ],
        };
        rows.into_iter()
            .map(|(dx, y)| clamp_to_field(Point::new(cx + dx, y), DEFENSE_RADIUS, field))
            .collect()
    }
}

impl FromStr for Formation {
    type Err = PlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") {
            return Ok(Self::None);
        }
        Self::ALL
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| PlayError::validation(format!("unknown defense formation \"{s}\"")))
    }
}

/// Transient defensive markers. Not recorded in history or saved with the play.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DefenseOverlay {
    formation: Formation,
    markers: Vec<Point>,
}

impl DefenseOverlay {
    /// Active formation.
    pub fn formation(&self) -> Formation {
        self.formation
    }

    /// Marker positions in field units.
    pub fn markers(&self) -> &[Point] {
        &self.markers
    }

    /// Switch formation, discarding any dragged marker positions.
    pub fn set_formation(&mut self, formation: Formation, field: FieldSize) {
        self.formation = formation;
        self.markers = formation.positions(field);
    }

    /// Move one marker, clamped with the defensive radius.
    pub fn move_marker(&mut self, index: usize, to: Point, field: FieldSize) -> bool {
        let Some(m) = self.markers.get_mut(index) else {
            return false;
        };
        *m = clamp_to_field(to, DEFENSE_RADIUS, field);
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/defense.rs"]
mod tests;
