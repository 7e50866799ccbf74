use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MipbufError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MipbufError::invalid_target("x")
            .to_string()
            .contains("invalid target:")
    );
    assert!(
        MipbufError::sandbox("x")
            .to_string()
            .contains("sandbox error:")
    );
    assert!(
        MipbufError::extension("x")
            .to_string()
            .contains("extension error:")
    );
    assert!(MipbufError::codec("x").to_string().contains("codec error:"));
    assert!(
        MipbufError::alloc("x")
            .to_string()
            .contains("allocation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MipbufError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
