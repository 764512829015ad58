use super::*;

#[test]
fn family_stack_parsing() {
    assert_eq!(
        parse_family_stack(r#"'Playfair Display', "Georgia" , serif,,"#),
        vec!["Playfair Display", "Georgia", "serif"]
    );
    assert!(parse_family_stack("  ").is_empty());
}

#[test]
fn empty_database_is_a_render_error() {
    let mut book = FontBook::from_database(fontdb::Database::new());
    let err = book
        .resolve("Arial, sans-serif", FontWeight::Normal, FontStyle::Normal)
        .unwrap_err();
    assert!(matches!(err, StayframeError::Render(_)), "{err}");
}

#[test]
fn unknown_family_falls_back_to_some_face_if_present() {
    let mut book = FontBook::new(&FontConfig::default());
    if book.face_count() == 0 {
        return;
    }
    let a = book
        .resolve("No Such Family 1234", FontWeight::Bold, FontStyle::Italic)
        .unwrap();
    assert!(!a.data.is_empty());
    let again = book
        .resolve("no such family 1234", FontWeight::Bold, FontStyle::Italic)
        .unwrap();
    assert_eq!(a, again);
    assert!(Arc::ptr_eq(&a.data, &again.data));
}

#[test]
fn config_defaults_to_system_fonts() {
    let cfg: FontConfig = serde_json::from_str(r#"{"font_dirs": ["/tmp/fonts"]}"#).unwrap();
    assert!(cfg.use_system_fonts);
    assert_eq!(cfg.font_dirs, vec![PathBuf::from("/tmp/fonts")]);
}
