use super::*;

fn unit_box_at(x0: f64, y0: f64) -> Rect {
    Rect::new(x0, y0, x0 + 1.0, y0 + 1.0)
}

#[test]
fn stack_right_places_second_box_after_gap() {
    let boxes = [unit_box_at(0.0, 0.0), unit_box_at(5.0, 3.0)];
    let offs = stack(&boxes, Direction::Right, 0.5);
    assert_eq!(offs[0], Vec2::ZERO);
    let placed = boxes[1] + offs[1];
    assert!((placed.x0 - 1.5).abs() < 1e-12);
    assert!((placed.y0 - 0.0).abs() < 1e-12);
}

#[test]
fn stack_down_chains_from_the_previous_box() {
    let boxes = [
        Rect::new(-1.0, -0.5, 1.0, 0.5),
        Rect::new(0.0, 0.0, 1.0, 2.0),
        Rect::new(0.0, 0.0, 4.0, 1.0),
    ];
    let offs = stack(&boxes, Direction::Down, 0.25);
    let second = boxes[1] + offs[1];
    let third = boxes[2] + offs[2];
    assert!((second.y1 - (-0.75)).abs() < 1e-12);
    assert!((third.y1 - (second.y0 - 0.25)).abs() < 1e-12);
    assert!((third.center().x).abs() < 1e-12);
}

#[test]
fn stack_aligned_flushes_cross_edges() {
    let boxes = [Rect::new(0.0, 0.0, 4.0, 1.0), Rect::new(7.0, 0.0, 8.0, 1.0)];
    let offs = stack_aligned(&boxes, Direction::Down, 0.0, CrossAlign::Start);
    assert!(((boxes[1] + offs[1]).x0).abs() < 1e-12);
    let offs = stack_aligned(&boxes, Direction::Down, 0.0, CrossAlign::End);
    assert!(((boxes[1] + offs[1]).x1 - 4.0).abs() < 1e-12);
}

#[test]
fn stacking_nothing_is_a_no_op() {
    assert!(stack(&[], Direction::Right, 1.0).is_empty());
}

#[test]
fn align_below_leaves_buffer() {
    let a = Rect::new(-1.0, -1.0, 1.0, 1.0);
    let b = Rect::new(3.0, 3.0, 4.0, 3.5);
    let placed = b + align(b, a, Direction::Down, 0.2);
    assert!((placed.y1 - (-1.2)).abs() < 1e-12);
    assert!((placed.center().x).abs() < 1e-12);
}

#[test]
fn align_to_a_point_is_coincident() {
    let p = Rect::new(2.0, 2.0, 2.0, 2.0);
    let b = Rect::new(0.0, 0.0, 1.0, 1.0);
    let placed = b + align(b, p, Direction::Right, 0.0);
    assert!((placed.x0 - 2.0).abs() < 1e-12);
    assert!((placed.center().y - 2.0).abs() < 1e-12);
}

#[test]
fn align_to_and_to_edge_only_move_one_axis() {
    let frame = Rect::new(-7.0, -4.0, 7.0, 4.0);
    let b = Rect::new(0.0, 0.0, 1.0, 1.0);
    let up = b + to_edge(b, frame, Direction::Up, 0.5);
    assert!((up.y1 - 3.5).abs() < 1e-12);
    assert_eq!(up.x0, 0.0);

    let r = Rect::new(-3.0, -3.0, -2.0, 2.0);
    let left = b + align_to(b, r, Direction::Left);
    assert_eq!(left.x0, -3.0);
    assert_eq!(left.y0, 0.0);
}

#[test]
fn operators_are_pure_and_repeatable() {
    let a = Rect::new(-1.0, -1.0, 1.0, 1.0);
    let b = Rect::new(3.0, 3.0, 4.0, 3.5);
    assert_eq!(align(b, a, Direction::Left, 0.3), align(b, a, Direction::Left, 0.3));
    assert_eq!(move_to(b, Point::new(1.0, 1.0)), Vec2::new(-2.5, -2.25));
    assert_eq!(a, Rect::new(-1.0, -1.0, 1.0, 1.0));
}
