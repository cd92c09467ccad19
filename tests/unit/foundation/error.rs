use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PlayError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(PlayError::export("x").to_string().contains("export error:"));
    assert!(
        PlayError::persistence("x")
            .to_string()
            .contains("persistence error:")
    );
    assert!(
        PlayError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert_eq!(PlayError::SignInRequired.to_string(), "sign-in required");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PlayError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: PlayError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, PlayError::Serde(_)));
}
