use super::*;

#[test]
fn template_matches_standard_formation() {
    let players = template_players(FieldSize::STANDARD);
    let ids: Vec<&str> = players.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["C", "Y", "Z", "X", "Q"]);

    assert_eq!((players[0].x, players[0].y), (400.0, 350.0));
    assert_eq!(players[0].shape, Shape::Square);
    assert_eq!((players[3].x, players[3].y), (700.0, 350.0));
    assert_eq!(players[3].text_color, Color::new("black"));
    assert_eq!((players[4].x, players[4].y), (400.0, 425.0));
}

#[test]
fn palette_entries_are_hex_colors() {
    assert!(COLOR_OPTIONS.iter().all(|c| Color::new(*c).is_well_formed()));
}
