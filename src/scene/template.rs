use crate::foundation::core::{Color, FieldSize};
use crate::scene::model::{Player, Scene, Shape};

/// Fill colors offered by the player editor.
pub const COLOR_OPTIONS: [&str; 10] = [
    "#1E40AF", "#93C5FD", "#065F46", "#6EE7B7", "#C2410C", "#FDBA74", "#991B1B", "#FCA5A5",
    "#111827", "#9CA3AF",
];

fn token(id: &str, x: f64, y: f64, shape: Shape, fill: &str, text: &str) -> Player {
    Player {
        id: id.to_owned(),
        x,
        y,
        shape,
        fill: Color::new(fill),
        text_color: Color::new(text),
        border: false,
    }
}

/// Default offensive roster: center, two receivers, flanker and quarterback.
pub fn template_players(field: FieldSize) -> Vec<Player> {
    let cx = field.center_x();
    let los = field.line_of_scrimmage_y();
    vec![
        token("C", cx, los, Shape::Square, "#374151", "white"),
        token("Y", 100.0, los, Shape::Circle, "#3B82F6", "white"),
        token("Z", cx + 100.0, los, Shape::Circle, "#10B981", "white"),
        token("X", field.width - 100.0, los, Shape::Circle, "#F97316", "black"),
        token("Q", cx, los + 75.0, Shape::Circle, "#EF4444", "white"),
    ]
}

/// Template roster with no routes or notes.
pub fn template_scene(field: FieldSize) -> Scene {
    Scene::new(template_players(field), vec![], vec![])
}

#[cfg(test)]
#[path = "../../tests/unit/scene/template.rs"]
mod tests;
