use super::*;
use kurbo::Shape as _;

fn square_path() -> BezPath {
    kurbo::Rect::new(0.0, 0.0, 1.0, 1.0).to_path(1e-3)
}

#[test]
fn length_of_a_unit_square_is_four() {
    assert!((path_length(&square_path()) - 4.0).abs() < 1e-6);
}

#[test]
fn trimming_keeps_the_requested_fraction() {
    let p = square_path();
    let half = trim_path(&p, 0.0, 0.5);
    assert!((path_length(&half) - 2.0).abs() < 1e-6);
    let mid = trim_path(&p, 0.125, 0.375);
    assert!((path_length(&mid) - 1.0).abs() < 1e-6);
}

#[test]
fn full_and_empty_intervals() {
    let p = square_path();
    assert_eq!(trim_path(&p, -1.0, 2.0), p);
    assert!(trim_path(&p, 0.6, 0.6).elements().is_empty());
    assert!(trim_path(&BezPath::new(), 0.0, 0.5).elements().is_empty());
}
