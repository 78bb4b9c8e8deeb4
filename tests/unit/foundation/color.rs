use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c = Color::parse("#ff0000").unwrap();
    assert_eq!(c, Color::rgba(1.0, 0.0, 0.0, 1.0));

    let c = Color::parse("#0000ff80").unwrap();
    assert!((c.b - 1.0).abs() < 1e-9);
    assert!((c.a - (128.0 / 255.0)).abs() < 1e-9);
}

#[test]
fn named_tokens_are_case_insensitive() {
    assert_eq!(Color::parse("yellow").unwrap(), Color::YELLOW);
    assert_eq!(
        Color::parse("GREY_B").unwrap(),
        Color::parse("#bbbbbb").unwrap()
    );
}

#[test]
fn unknown_token_is_a_construction_error() {
    let err = Color::parse("MAUVE_Z").unwrap_err();
    assert!(matches!(err, BeatlineError::Construction(_)));
    assert!(Color::parse("#12345").is_err());
}

#[test]
fn deserializes_token_object_and_array() {
    let c: Color = serde_json::from_value(json!("#44aaff")).unwrap();
    assert_eq!(c.to_svg_hex(), "#44aaff");

    let c: Color = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, Color::rgba(0.25, 0.5, 0.75, 1.0));

    let c: Color = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, Color::rgba(0.25, 0.5, 0.75, 0.9));

    assert!(serde_json::from_value::<Color>(json!("not-a-color")).is_err());
}

#[test]
fn premul_scales_channels_by_alpha() {
    let p = Color::rgba(1.0, 0.5, 0.0, 0.5).to_rgba8_premul();
    assert_eq!(p.a, 128);
    assert_eq!(p.r, 128);
    assert_eq!(p.b, 0);
}
