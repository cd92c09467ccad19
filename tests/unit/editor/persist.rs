use super::*;
use serde_json::json;

#[test]
fn tags_are_trimmed_and_filtered() {
    assert_eq!(
        normalize_tags(" red zone, ,3rd down,,  goal line "),
        vec!["red zone", "3rd down", "goal line"]
    );
    assert!(normalize_tags("  ").is_empty());
}

#[test]
fn empty_record_defaults_to_template() {
    let (id, state) = PlayRecord::from_json("{}")
        .unwrap()
        .into_state(FieldSize::STANDARD);
    assert_eq!(id, None);
    assert_eq!(state.scene.players().len(), 5);
    assert!(state.scene.routes().is_empty());
    assert!(state.scene.notes().is_empty());
    assert_eq!(state.name, "");
    assert!(state.tags.is_empty());
}

#[test]
fn record_keeps_supplied_fields() {
    let raw = json!({
        "id": "Play-1-2",
        "players": [{
            "id": "Q", "x": 400, "y": 425, "shape": "star",
            "fill": "#EF4444", "textColor": "white"
        }],
        "routes": [{"playerId": "Q", "points": [400, 425, 400, 300], "color": "#EF4444"}],
        "name": "Slant",
        "tags": ["quick"],
        "image": "data:image/png;base64,AAAA",
        "locked": true
    });
    let (id, state) = PlayRecord::from_json(&raw.to_string())
        .unwrap()
        .into_state(FieldSize::STANDARD);
    assert_eq!(id.as_deref(), Some("Play-1-2"));
    assert_eq!(state.scene.players()[0].id, "Q");
    assert_eq!(state.scene.routes()[0].thickness, 7.0);
    assert_eq!(state.name, "Slant");
    assert_eq!(state.tags, vec!["quick"]);
}

#[test]
fn saved_play_serializes_camel_case() {
    let (_, state) = PlayRecord::default().into_state(FieldSize::STANDARD);
    let saved = SavedPlay::new("Play-9-9", &state, None, Some("data:x".to_owned()));
    let v: serde_json::Value = serde_json::from_str(&saved.to_json().unwrap()).unwrap();
    assert_eq!(v["id"], "Play-9-9");
    assert_eq!(v["printImage"], "data:x");
    assert_eq!(v["image"], serde_json::Value::Null);
    assert_eq!(v["locked"], false);
    assert_eq!(v["players"][0]["textColor"], "white");
}

#[test]
fn play_ids_follow_pattern() {
    let id = generate_play_id();
    let parts: Vec<&str> = id.split('-').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "Play");
    assert!(parts[1].parse::<u128>().is_ok());
    assert!(parts[2].parse::<u32>().unwrap() < 1000);
}

#[test]
fn in_memory_store_round_trip_and_rejection() {
    let (_, state) = PlayRecord::default().into_state(FieldSize::STANDARD);
    let play = SavedPlay::new("p1", &state, None, None);

    let mut store = InMemoryPlayStore::new();
    store.save("u1", &play).unwrap();
    assert_eq!(store.get("u1", "p1"), Some(&play));
    assert!(store.get("u2", "p1").is_none());

    let mut bad = InMemoryPlayStore::rejecting("quota exceeded");
    let err = bad.save("u1", &play).unwrap_err();
    assert!(matches!(err, PlayError::Persistence(ref m) if m == "quota exceeded"));
    assert!(bad.is_empty());
}
