use super::*;
use crate::scene::element::{circle, square, text};

#[test]
fn arrange_stacks_and_keeps_the_run_centered() {
    let mut b = SceneBuilder::new("Arrange");
    let x = b.add(square(1.0)).unwrap();
    let y = b.add(square(1.0)).unwrap();
    let z = b.add(square(1.0)).unwrap();
    b.arrange(&[x, y, z], Direction::Right, 0.5).unwrap();
    let bx = b.bounds(x).unwrap();
    let by = b.bounds(y).unwrap();
    let bz = b.bounds(z).unwrap();
    assert!((by.x0 - bx.x0 - 1.5).abs() < 1e-9);
    assert!((bz.x0 - by.x0 - 1.5).abs() < 1e-9);
    assert!(by.center().x.abs() < 1e-9);
}

#[test]
fn next_to_and_to_edge_move_whole_groups() {
    let mut b = SceneBuilder::new("Layout");
    let title = b.add(text("Title", 48.0)).unwrap();
    b.to_edge(title, Direction::Up, MED_LARGE_BUFF).unwrap();
    assert!((b.bounds(title).unwrap().y1 - 3.5).abs() < 1e-9);

    let a = b.add(circle(0.5)).unwrap();
    let c = b.add(circle(0.5).shift(Vec2::new(2.0, 0.0))).unwrap();
    let g = b.group(&[a, c]).unwrap();
    b.next_to(g, title, Direction::Down, 0.2).unwrap();
    let t = b.bounds(title).unwrap();
    let gb = b.bounds(g).unwrap();
    assert!((gb.y1 - (t.y0 - 0.2)).abs() < 1e-9);
    assert!((b.bounds(a).unwrap().y1 - gb.y1).abs() < 1e-9);
}

#[test]
fn unknown_targets_fail_before_the_beat_is_recorded() {
    let mut b = SceneBuilder::new("FailFast");
    let a = b.add(square(1.0)).unwrap();
    b.play(vec![Step::create(a)]).unwrap();
    let err = b
        .play(vec![Step::fade_in(a), Step::create(ElementId(42))])
        .unwrap_err();
    assert!(matches!(err, BeatlineError::Reference(_)));
    let err = b
        .play(vec![Step::transform(a, ElementId(9))])
        .unwrap_err();
    assert!(matches!(err, BeatlineError::Reference(_)));
    let scene = b.build().unwrap();
    assert_eq!(scene.timeline.beats().len(), 1);
    assert_eq!(scene.duration(), 1.0);
}

#[test]
fn invalid_elements_are_construction_errors() {
    let mut b = SceneBuilder::new("Invalid");
    let err = b.add(circle(-0.1)).unwrap_err();
    assert!(matches!(err, BeatlineError::Construction(_)));
    assert!(b.tree().is_empty());
}

#[test]
fn show_marks_group_leaves_visible() {
    let mut b = SceneBuilder::new("Show");
    let a = b.add(square(1.0)).unwrap();
    let c = b.add(square(1.0)).unwrap();
    let g = b.group(&[a, c]).unwrap();
    b.show(g).unwrap();
    let scene = b.build().unwrap();
    assert!(scene.visible_at_start.contains(&a));
    assert!(scene.visible_at_start.contains(&c));
    assert!(!scene.visible_at_start.contains(&g));
}

#[test]
fn surrounding_rectangle_wraps_target_bounds() {
    let mut b = SceneBuilder::new("Surround");
    let a = b.add(square(1.0).shift(Vec2::new(1.0, 1.0))).unwrap();
    let r = b.surrounding_rectangle(a, 0.1, Color::YELLOW).unwrap();
    let rb = b.bounds(r).unwrap();
    assert!((rb.width() - 1.2).abs() < 1e-9);
    assert!((rb.center().x - 1.0).abs() < 1e-9);
}

#[test]
fn play_with_rescales_the_beat() {
    let mut b = SceneBuilder::new("Timing");
    let a = b.add(square(1.0)).unwrap();
    assert_eq!(b.play_with(vec![Step::create(a)], 2.0).unwrap(), 2.0);
    b.wait(0.5).unwrap();
    assert_eq!(b.duration(), 2.5);
    assert!(SceneBuilder::new("  ").build().is_err());
}

#[test]
fn zero_scale_fails_for_layout_and_steps() {
    let mut b = SceneBuilder::new("ZeroScale");
    let a = b.add(square(1.0)).unwrap();
    assert!(b.scale(a, 0.0).is_err());
    assert!(b.play(vec![Step::scale(a, 0.0)]).is_err());
    assert!(b.build().unwrap().timeline.beats().is_empty());
}
