//! Config file parsing and persistence

mod common;

use quill::config::EditorConfig;
use quill::model::FontSize;
use quill::theme::ThemeId;
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let config = EditorConfig::default();
    assert_eq!(config.font_family, None);
    assert_eq!(config.font_size(), FontSize::new(12).unwrap());
    assert_eq!(config.status_message_duration().as_secs(), 3);
    assert_eq!(config.theme, ThemeId::Light);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let config = EditorConfig::parse("font_size: 16\ntheme: dark\n").unwrap();
    assert_eq!(config.font_size(), FontSize::new(16).unwrap());
    assert_eq!(config.theme, ThemeId::Dark);
    assert_eq!(config.window_width, 800);
    assert_eq!(config.status_message_ms, 3000);
}

#[test]
fn test_out_of_range_font_size_is_clamped() {
    let small = EditorConfig::parse("font_size: 2").unwrap();
    assert_eq!(small.font_size().points(), 8);
    let large = EditorConfig::parse("font_size: 400").unwrap();
    assert_eq!(large.font_size().points(), 29);
}

#[test]
fn test_invalid_yaml_is_an_error() {
    assert!(EditorConfig::parse("font_size: [oops").is_err());
    assert!(EditorConfig::parse("theme: sepia").is_err());
}

#[test]
fn test_load_from_missing_or_broken_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    assert_eq!(
        EditorConfig::load_from(&dir.path().join("absent.yaml")),
        EditorConfig::default()
    );

    let broken = dir.path().join("broken.yaml");
    std::fs::write(&broken, "font_size: {").unwrap();
    assert_eq!(EditorConfig::load_from(&broken), EditorConfig::default());
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = EditorConfig {
        font_family: Some("DejaVuSerif".to_string()),
        font_size: 18,
        theme: ThemeId::Dark,
        ..EditorConfig::default()
    };
    config.save_to(&path).unwrap();

    assert_eq!(EditorConfig::load_from(&path), config);
}

#[test]
fn test_configured_size_becomes_document_default() {
    let config = EditorConfig {
        font_size: 20,
        ..EditorConfig::default()
    };
    let model = quill::AppModel::new(
        config,
        common::test_fonts(),
        Box::new(quill::clipboard::MemoryClipboard::default()),
        (800, 600),
        1.0,
    );
    assert_eq!(model.current_style().size, FontSize::new(20).unwrap());
}

#[test]
fn test_configured_family_is_default_when_installed() {
    let config = EditorConfig {
        font_family: Some("georgia".to_string()),
        ..EditorConfig::default()
    };
    let model = quill::AppModel::new(
        config,
        common::test_fonts(),
        Box::new(quill::clipboard::MemoryClipboard::default()),
        (800, 600),
        1.0,
    );
    assert_eq!(model.default_family(), Some("Georgia"));
}
