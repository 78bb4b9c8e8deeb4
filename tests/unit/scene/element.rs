use super::*;
use kurbo::Shape as _;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn rectangle_bounds_are_centered_on_position() {
    let spec = rectangle(2.0, 1.0).shift(Vec2::new(1.0, -1.0));
    let b = spec.bounds();
    assert!(approx(b.x0, 0.0));
    assert!(approx(b.x1, 2.0));
    assert!(approx(b.y0, -1.5));
    assert!(approx(b.y1, -0.5));
}

#[test]
fn move_to_places_bounds_center() {
    let spec = line(Point::new(0.0, 0.0), Point::new(2.0, 0.0)).move_to(Point::new(5.0, 1.0));
    let c = spec.bounds().center();
    assert!(approx(c.x, 5.0));
    assert!(approx(c.y, 1.0));
}

#[test]
fn rotation_and_scale_pivot_on_bounds_center() {
    let spec = rectangle(2.0, 1.0)
        .move_to(Point::new(3.0, 3.0))
        .rotate(std::f64::consts::FRAC_PI_2)
        .scale(2.0);
    let b = spec.bounds();
    assert!(approx(b.center().x, 3.0));
    assert!(approx(b.center().y, 3.0));
    assert!(approx(b.width(), 2.0));
    assert!(approx(b.height(), 4.0));
}

#[test]
fn invalid_parameters_fail_fast() {
    assert!(circle(-1.0).validate().is_err());
    assert!(rectangle(f64::NAN, 1.0).validate().is_err());
    assert!(rounded_rectangle(1.0, 1.0, 0.6).validate().is_err());
    assert!(polygon([ORIGIN, Point::new(1.0, 0.0)]).validate().is_err());
    assert!(arrow(ORIGIN, ORIGIN).validate().is_err());
    assert!(text("   ", 48.0).validate().is_err());
    assert!(text("x", 0.0).validate().is_err());
    assert!(square(1.0).opacity(1.5).validate().is_err());
    assert!(square(1.0).stroke_width(-2.0).validate().is_err());
    assert!(formula(r"\nosuchcommand", 48.0).validate().is_err());
}

#[test]
fn valid_primitives_pass_validation() {
    for spec in [
        rectangle(1.0, 2.0),
        rounded_rectangle(2.0, 1.0, 0.2),
        circle(0.5),
        arc(ORIGIN, 1.0, 0.0, std::f64::consts::PI),
        dashed_line(ORIGIN, Point::new(1.0, 1.0), 0.1),
        arrow(ORIGIN, Point::new(2.0, 0.0)).buff(0.1),
        dot(Point::new(1.0, 1.0), 0.08),
        polygon([ORIGIN, Point::new(1.0, 0.0), Point::new(0.0, 1.0)]),
        text("CHSH", 36.0).bold(),
        formula(r"S \leq 2\sqrt{2}", 48.0),
    ] {
        spec.validate().unwrap();
    }
}

#[test]
fn arrow_tip_is_capped_to_a_quarter_of_its_length() {
    let shape = Shape::Arrow {
        start: ORIGIN,
        end: Point::new(0.4, 0.0),
        tip_length: 0.35,
    };
    let paths = shape.paths();
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[1].1, PaintRole::Solid);
    let tip = paths[1].0.bounding_box();
    assert!(approx(tip.width(), 0.1));
}

#[test]
fn buff_shortens_both_ends() {
    let spec = arrow(ORIGIN, Point::new(2.0, 0.0)).buff(0.25);
    let ElementKind::Shape(Shape::Arrow { start, end, .. }) = spec.kind else {
        panic!("expected arrow");
    };
    assert!(approx(start.x, 0.25));
    assert!(approx(end.x, 1.75));
}

#[test]
fn text_extent_grows_with_characters_and_lines() {
    let one = text("ab", 80.0).bounds();
    let two = text("abcd", 80.0).bounds();
    assert!(approx(one.height(), 1.0));
    assert!(approx(two.width(), 2.0 * one.width()));

    let multi = text("ab\ncd", 80.0).bounds();
    assert!(approx(multi.height(), 2.2));
    assert!(approx(multi.width(), one.width()));
}

#[test]
fn formula_lines_use_display_form() {
    let el = formula(r"\langle A_0 \rangle", 48.0).to_element(ElementId(1));
    assert_eq!(el.display_lines(), vec!["⟨A₀⟩".to_owned()]);
}

#[test]
fn fill_color_falls_back_to_stroke_color() {
    let style = Style {
        color: Color::YELLOW,
        ..Style::default()
    };
    assert_eq!(style.fill_color(), Color::YELLOW);
    let spec = square(1.0).fill(Color::BLACK, 0.5);
    assert_eq!(spec.style.fill_color(), Color::BLACK);
    assert_eq!(spec.style.fill_opacity, 0.5);
}

#[test]
fn buff_that_consumes_the_segment_is_rejected() {
    let too_long = arrow(ORIGIN, Point::new(0.4, 0.0)).buff(0.2);
    let err = too_long.validate().unwrap_err();
    assert!(matches!(err, BeatlineError::Construction(_)), "{err}");
    assert!(line(ORIGIN, Point::new(2.0, 0.0)).buff(-0.1).validate().is_err());
    assert!(line(ORIGIN, Point::new(2.0, 0.0)).buff(f64::NAN).validate().is_err());

    // Rejected endpoints are left untouched.
    let ElementKind::Shape(Shape::Arrow { start, end, .. }) = too_long.kind else {
        panic!("expected arrow");
    };
    assert_eq!((start, end), (ORIGIN, Point::new(0.4, 0.0)));
}
