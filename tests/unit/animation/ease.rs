use super::*;

const ALL: [Ease; 11] = [
    Ease::Linear,
    Ease::Smooth,
    Ease::RushInto,
    Ease::RushFrom,
    Ease::ThereAndBack,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
];

#[test]
fn endpoints_are_exact() {
    for ease in ALL {
        assert!(ease.apply(0.0).abs() < 1e-9, "{ease:?} at 0");
        let end = if ease.returns_to_start() { 0.0 } else { 1.0 };
        assert!((ease.apply(1.0) - end).abs() < 1e-9, "{ease:?} at 1");
    }
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::Linear.apply(-1.0), 0.0);
    assert_eq!(Ease::Linear.apply(2.0), 1.0);
}

#[test]
fn smooth_is_symmetric_around_midpoint() {
    assert!((Ease::Smooth.apply(0.5) - 0.5).abs() < 1e-9);
    let a = Ease::Smooth.apply(0.2);
    let b = Ease::Smooth.apply(0.8);
    assert!((a + b - 1.0).abs() < 1e-9);
}

#[test]
fn there_and_back_peaks_at_midpoint() {
    assert!((Ease::ThereAndBack.apply(0.5) - 1.0).abs() < 1e-9);
}

#[test]
fn rush_into_starts_slow_rush_from_starts_fast() {
    assert!(Ease::RushInto.apply(0.25) < 0.25);
    assert!(Ease::RushFrom.apply(0.25) > 0.25);
}

#[test]
fn default_is_smooth_and_serializes_snake_case() {
    assert_eq!(Ease::default(), Ease::Smooth);
    assert_eq!(
        serde_json::to_string(&Ease::ThereAndBack).unwrap(),
        "\"there_and_back\""
    );
}
