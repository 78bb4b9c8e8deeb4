use super::*;

#[test]
fn scalar_and_vector_lerp_hit_endpoints() {
    assert_eq!(<f64 as Lerp>::lerp(&2.0, &4.0, 0.5), 3.0);
    assert_eq!(
        <Vec2 as Lerp>::lerp(&Vec2::new(0.0, 0.0), &Vec2::new(2.0, -2.0), 0.25),
        Vec2::new(0.5, -0.5)
    );
    assert_eq!(
        <Point as Lerp>::lerp(&Point::new(1.0, 1.0), &Point::new(3.0, 3.0), 1.0),
        Point::new(3.0, 3.0)
    );
}

#[test]
fn color_lerp_blends_every_channel() {
    let c = <Color as Lerp>::lerp(&Color::BLACK, &Color::WHITE.with_alpha(0.0), 0.5);
    assert_eq!(c, Color::rgba(0.5, 0.5, 0.5, 0.5));
}

#[test]
fn rect_lerp_moves_all_edges() {
    let a = Rect::new(0.0, 0.0, 2.0, 2.0);
    let b = Rect::new(2.0, 2.0, 6.0, 4.0);
    assert_eq!(<Rect as Lerp>::lerp(&a, &b, 0.5), Rect::new(1.0, 1.0, 4.0, 3.0));
}
